//! Signal fidelity between a plain channel and its encrypted counterpart.
//!
//! For a cipher image these should be as bad as possible: large MSE and MAE,
//! low PSNR.

use ndarray::ArrayView2;

use crate::analysis::channel::ensure_same_shape;
use crate::config::DEFAULT_MAX_PIXEL_VALUE;
use crate::error::{AnalysisError, Result};

/// MSE, MAE and PSNR of one channel pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FidelityMetrics {
    pub mse: f64,
    pub mae: f64,
    /// Decibels. `f64::INFINITY` for identical channels.
    pub psnr: f64,
}

/// Sum of squared and absolute differences, widened to f64 per sample.
fn difference_sums(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<(f64, f64, usize)> {
    ensure_same_shape(&a, &b)?;
    let n = a.len();
    if n == 0 {
        return Err(AnalysisError::EmptyChannel);
    }

    let (sq, abs) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f64, 0.0f64), |(sq, abs), (&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            (sq + d * d, abs + d.abs())
        });
    Ok((sq, abs, n))
}

/// Mean squared error.
pub fn mse(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<f64> {
    let (sq, _, n) = difference_sums(a, b)?;
    Ok(sq / n as f64)
}

/// Mean absolute error.
pub fn mae(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<f64> {
    let (_, abs, n) = difference_sums(a, b)?;
    Ok(abs / n as f64)
}

/// PSNR in decibels for a known MSE.
///
/// Zero MSE means identical signals and is defined as positive infinity.
/// The peak must be finite and greater than zero, otherwise the logarithm
/// yields NaN or negative infinity.
pub fn psnr_from_mse(mse: f64, max_pixel_value: f64) -> Result<f64> {
    if !max_pixel_value.is_finite() || max_pixel_value <= 0.0 {
        return Err(AnalysisError::InvalidPeak(max_pixel_value));
    }
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(20.0 * (max_pixel_value / mse.sqrt()).log10())
}

/// Peak signal-to-noise ratio with a peak of 255.
pub fn psnr(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<f64> {
    psnr_from_mse(mse(a, b)?, DEFAULT_MAX_PIXEL_VALUE)
}

/// All three metrics from a single pass over the channels.
pub fn fidelity(a: ArrayView2<u8>, b: ArrayView2<u8>, max_pixel_value: f64) -> Result<FidelityMetrics> {
    let (sq, abs, n) = difference_sums(a, b)?;
    let mse = sq / n as f64;
    Ok(FidelityMetrics {
        mse,
        mae: abs / n as f64,
        psnr: psnr_from_mse(mse, max_pixel_value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_identical_channels() {
        let a = Array2::from_elem((4, 4), 100u8);
        let m = fidelity(a.view(), a.view(), 255.0).unwrap();

        assert_eq!(m.mse, 0.0);
        assert_eq!(m.mae, 0.0);
        assert!(m.psnr.is_infinite() && m.psnr > 0.0);
    }

    #[test]
    fn test_no_u8_overflow() {
        let a = Array2::from_elem((2, 2), 0u8);
        let b = Array2::from_elem((2, 2), 255u8);

        assert_eq!(mse(a.view(), b.view()).unwrap(), 65025.0);
        assert_eq!(mae(a.view(), b.view()).unwrap(), 255.0);
        // 20 * log10(255 / 255) = 0
        assert!(psnr(a.view(), b.view()).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_symmetric() {
        let a = Array2::from_shape_fn((5, 7), |(y, x)| (y * 13 + x * 29) as u8);
        let b = Array2::from_shape_fn((5, 7), |(y, x)| (y * 3 + x * 101) as u8);

        assert_eq!(mse(a.view(), b.view()).unwrap(), mse(b.view(), a.view()).unwrap());
        assert_eq!(mae(a.view(), b.view()).unwrap(), mae(b.view(), a.view()).unwrap());
    }

    #[test]
    fn test_known_psnr() {
        let a = Array2::from_elem((2, 2), 10u8);
        let b = Array2::from_elem((2, 2), 11u8);
        // MSE = 1 -> 20 * log10(255) = 48.13 dB
        let p = psnr(a.view(), b.view()).unwrap();
        assert!((p - 48.130803608679).abs() < 1e-6);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Array2::<u8>::zeros((3, 3));
        let b = Array2::<u8>::zeros((3, 4));
        assert!(matches!(
            fidelity(a.view(), b.view(), 255.0),
            Err(AnalysisError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_peak_rejected() {
        let a = Array2::from_elem((2, 2), 10u8);
        let b = Array2::from_elem((2, 2), 11u8);

        for peak in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(fidelity(a.view(), b.view(), peak), Err(AnalysisError::InvalidPeak(_))),
                "peak {} accepted",
                peak
            );
        }
        // Identical channels still check the peak
        assert!(matches!(
            fidelity(a.view(), a.view(), 0.0),
            Err(AnalysisError::InvalidPeak(_))
        ));
        assert!(matches!(psnr_from_mse(1.0, -255.0), Err(AnalysisError::InvalidPeak(_))));
    }

    #[test]
    fn test_custom_peak() {
        // 10-bit peak with MSE 1 -> 20 * log10(1023)
        let p = psnr_from_mse(1.0, 1023.0).unwrap();
        assert!((p - 20.0 * 1023f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_channels() {
        let a = Array2::<u8>::zeros((0, 0));
        assert!(matches!(mse(a.view(), a.view()), Err(AnalysisError::EmptyChannel)));
    }
}
