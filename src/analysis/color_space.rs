//! Luma/chroma color conversion.
//!
//! Converts 8-bit RGB(A) images to YCrCb and back with the ITU-R BT.601
//! coefficients and a chroma offset of 128. Channel order of the converted
//! image is Y, Cr, Cb.
//!
//! The arithmetic is 14-bit fixed point, the same integer scheme OpenCV uses
//! for `COLOR_BGR2YCrCb` on 8-bit data. Cr and Cb are derived from the
//! already-rounded integer Y, so the planes match OpenCV level for level.
//!
//! ## Supported Formats
//!
//! - **Grayscale (1 channel)**: rejected, there is no chroma to compute
//! - **RGB (3 channels)**: converted
//! - **RGBA (4 channels)**: RGB converted, alpha dropped

use ndarray::{Array3, ArrayView3};

use crate::error::{AnalysisError, Result};

const SHIFT: u32 = 14;
const ROUND: i32 = 1 << (SHIFT - 1);
const CHROMA_OFFSET: i32 = 128;
const CHROMA_DELTA: i32 = CHROMA_OFFSET << SHIFT;

/// BT.601 luma weights (0.299, 0.587, 0.114) scaled by 2^14
const LUMA_R: i32 = 4899;
const LUMA_G: i32 = 9617;
const LUMA_B: i32 = 1868;

/// Chroma scales 0.713 and 0.564 scaled by 2^14
const CR_SCALE: i32 = 11682;
const CB_SCALE: i32 = 9241;

// Inverse transform: 1.403, -0.714, -0.344, 1.773 scaled by 2^14
const CR_TO_R: i32 = 22987;
const CR_TO_G: i32 = -11698;
const CB_TO_G: i32 = -5636;
const CB_TO_B: i32 = 29049;

/// Round a fixed-point value back to an integer. `>>` floors negative values.
#[inline]
fn descale(v: i32) -> i32 {
    (v + ROUND) >> SHIFT
}

#[inline]
fn saturate_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Convert one RGB pixel to (Y, Cr, Cb).
#[inline]
pub fn rgb_to_ycrcb(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let y = descale(r * LUMA_R + g * LUMA_G + b * LUMA_B);
    let cr = descale((r - y) * CR_SCALE + CHROMA_DELTA);
    let cb = descale((b - y) * CB_SCALE + CHROMA_DELTA);
    (saturate_u8(y), saturate_u8(cr), saturate_u8(cb))
}

/// Convert one (Y, Cr, Cb) pixel back to RGB.
#[inline]
pub fn ycrcb_to_rgb(y: u8, cr: u8, cb: u8) -> (u8, u8, u8) {
    let y = y as i32;
    let cr = cr as i32 - CHROMA_OFFSET;
    let cb = cb as i32 - CHROMA_OFFSET;
    let r = y + descale(cr * CR_TO_R);
    let g = y + descale(cb * CB_TO_G + cr * CR_TO_G);
    let b = y + descale(cb * CB_TO_B);
    (saturate_u8(r), saturate_u8(g), saturate_u8(b))
}

fn check_color_channels(channels: usize) -> Result<()> {
    if channels == 3 || channels == 4 {
        Ok(())
    } else {
        Err(AnalysisError::UnsupportedChannels(channels))
    }
}

/// Convert an RGB or RGBA u8 image to a 3-channel YCrCb image.
///
/// # Arguments
/// * `input` - Image with 3 or 4 channels (height, width, channels)
///
/// # Returns
/// Image of shape (height, width, 3) holding Y, Cr, Cb
pub fn rgb_to_ycrcb_u8(input: ArrayView3<u8>) -> Result<Array3<u8>> {
    let (height, width, channels) = input.dim();
    check_color_channels(channels)?;
    let mut output = Array3::<u8>::zeros((height, width, 3));

    for y in 0..height {
        for x in 0..width {
            let (luma, cr, cb) =
                rgb_to_ycrcb(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
            output[[y, x, 0]] = luma;
            output[[y, x, 1]] = cr;
            output[[y, x, 2]] = cb;
        }
    }
    Ok(output)
}

/// Convert a 3-channel YCrCb u8 image back to RGB.
pub fn ycrcb_to_rgb_u8(input: ArrayView3<u8>) -> Result<Array3<u8>> {
    let (height, width, channels) = input.dim();
    if channels != 3 {
        return Err(AnalysisError::UnsupportedChannels(channels));
    }
    let mut output = Array3::<u8>::zeros((height, width, 3));

    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = ycrcb_to_rgb(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
            output[[y, x, 0]] = r;
            output[[y, x, 1]] = g;
            output[[y, x, 2]] = b;
        }
    }
    Ok(output)
}
