//! WebAssembly exports for the channel metrics.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Channels are
//! passed as flat row-major `Uint8Array`s with explicit width and height.
//! Errors surface as JavaScript exceptions carrying the error message.

use ndarray::{Array2, Array3};
use wasm_bindgen::prelude::*;

use crate::analysis::color_space::rgb_to_ycrcb_u8;
use crate::analysis::correlation::{adjacent_correlation, correlation_between, Direction};
use crate::analysis::entropy::{global_entropy, local_entropy};
use crate::analysis::fidelity::fidelity;
use crate::analysis::histogram::Histogram;
use crate::error::AnalysisError;

fn js_error(err: AnalysisError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn channel_from_slice(data: &[u8], width: usize, height: usize) -> Result<Array2<u8>, JsValue> {
    Array2::from_shape_vec((height, width), data.to_vec())
        .map_err(|_| JsValue::from_str("Invalid dimensions"))
}

// ============================================================================
// Correlation
// ============================================================================

/// Pearson correlation between two channels of identical size.
#[wasm_bindgen]
pub fn correlation_wasm(a: &[u8], b: &[u8], width: usize, height: usize) -> Result<f64, JsValue> {
    let a = channel_from_slice(a, width, height)?;
    let b = channel_from_slice(b, width, height)?;
    correlation_between(a.view(), b.view()).map_err(js_error)
}

/// Adjacent-pixel correlation.
///
/// # Arguments
/// * `direction` - "horizontal", "vertical" or "diagonal"
#[wasm_bindgen]
pub fn adjacent_correlation_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    direction: &str,
) -> Result<f64, JsValue> {
    let direction: Direction = direction.parse().map_err(js_error)?;
    let channel = channel_from_slice(data, width, height)?;
    adjacent_correlation(channel.view(), direction).map_err(js_error)
}

// ============================================================================
// Histogram
// ============================================================================

/// 256 bin counts as floats (JavaScript numbers).
#[wasm_bindgen]
pub fn histogram_wasm(data: &[u8]) -> Vec<f64> {
    let hist = Histogram::from_samples(data.iter().copied());
    hist.bins().iter().map(|&c| c as f64).collect()
}

/// Uniformity statistics.
///
/// # Returns
/// `[expected, chi_square, max_deviation, irregular_deviation, normalized_deviation]`
#[wasm_bindgen]
pub fn histogram_stats_wasm(data: &[u8]) -> Result<Vec<f64>, JsValue> {
    let stats = Histogram::from_samples(data.iter().copied())
        .uniformity()
        .map_err(js_error)?;
    Ok(vec![
        stats.expected,
        stats.chi_square,
        stats.max_deviation,
        stats.irregular_deviation,
        stats.normalized_deviation,
    ])
}

// ============================================================================
// Entropy
// ============================================================================

#[wasm_bindgen]
pub fn global_entropy_wasm(data: &[u8], width: usize, height: usize) -> Result<f64, JsValue> {
    let channel = channel_from_slice(data, width, height)?;
    global_entropy(channel.view()).map_err(js_error)
}

/// Local entropy grid, flattened row-major.
///
/// The grid has `floor(height / window_size)` rows and
/// `floor(width / window_size)` columns. Its mean is the average local entropy.
#[wasm_bindgen]
pub fn local_entropy_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    window_size: usize,
) -> Result<Vec<f64>, JsValue> {
    let channel = channel_from_slice(data, width, height)?;
    // No thread pool in the browser
    let local = local_entropy(channel.view(), window_size, false).map_err(js_error)?;
    Ok(local.grid.into_raw_vec_and_offset().0)
}

// ============================================================================
// Fidelity
// ============================================================================

/// # Returns
/// `[mse, mae, psnr]`, psnr is `Infinity` for identical channels
#[wasm_bindgen]
pub fn fidelity_wasm(
    a: &[u8],
    b: &[u8],
    width: usize,
    height: usize,
    max_pixel_value: f64,
) -> Result<Vec<f64>, JsValue> {
    let a = channel_from_slice(a, width, height)?;
    let b = channel_from_slice(b, width, height)?;
    let m = fidelity(a.view(), b.view(), max_pixel_value).map_err(js_error)?;
    Ok(vec![m.mse, m.mae, m.psnr])
}

// ============================================================================
// Color Space
// ============================================================================

/// Convert flat RGBA bytes to flat YCrCb bytes (3 per pixel).
#[wasm_bindgen]
pub fn rgba_to_ycrcb_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = Array3::from_shape_vec((height, width, 4), data.to_vec())
        .map_err(|_| JsValue::from_str("Invalid dimensions"))?;
    let result = rgb_to_ycrcb_u8(input.view()).map_err(js_error)?;
    Ok(result.into_raw_vec_and_offset().0)
}
