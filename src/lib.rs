//! imgcrypt_metrics
//!
//! Channel-wise statistics for judging how well an image cipher hides its
//! plain image, with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Metrics run on single 8-bit channels of shape (height, width). Full images
//! are converted from RGB(A) to YCrCb first:
//! - **Y**: luma
//! - **Cr**: red color difference
//! - **Cb**: blue color difference
//!
//! All sums and differences are computed in `f64`.
//!
//! ## Metrics
//! - Pearson correlation between images and between adjacent pixels
//! - Histogram uniformity (chi-square and deviations from flat)
//! - Global and local Shannon entropy
//! - MSE, MAE and PSNR
//!
//! Degenerate input (constant channels, empty channels, mismatched shapes)
//! yields an [`AnalysisError`] instead of NaN.

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;

#[cfg(feature = "image")]
pub mod io;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray1, PyArray2, PyArray3, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::prelude::*;

    use crate::analysis::color_space;
    use crate::analysis::correlation::{self as correlation_mod, Direction};
    use crate::analysis::entropy;
    use crate::analysis::fidelity as fidelity_mod;
    use crate::analysis::histogram::Histogram;

    // ========================================================================
    // Correlation
    // ========================================================================

    /// Pearson correlation between two equal-shaped u8 channels.
    #[pyfunction]
    pub fn correlation(a: PyReadonlyArray2<'_, u8>, b: PyReadonlyArray2<'_, u8>) -> PyResult<f64> {
        Ok(correlation_mod::correlation_between(a.as_array(), b.as_array())?)
    }

    /// Correlation of each pixel with its neighbour.
    ///
    /// # Arguments
    /// * `channel` - 2D u8 channel
    /// * `direction` - "horizontal", "vertical" or "diagonal"
    #[pyfunction]
    #[pyo3(signature = (channel, direction="horizontal"))]
    pub fn adjacent_correlation(channel: PyReadonlyArray2<'_, u8>, direction: &str) -> PyResult<f64> {
        let direction: Direction = direction.parse()?;
        Ok(correlation_mod::adjacent_correlation(channel.as_array(), direction)?)
    }

    // ========================================================================
    // Histogram
    // ========================================================================

    /// 256-bin count histogram of a u8 channel.
    #[pyfunction]
    pub fn histogram<'py>(py: Python<'py>, channel: PyReadonlyArray2<'py, u8>) -> Bound<'py, PyArray1<u64>> {
        let hist = Histogram::from_channel(channel.as_array());
        hist.bins().to_vec().into_pyarray(py)
    }

    /// Uniformity statistics of a u8 channel.
    ///
    /// # Returns
    /// Tuple (expected, chi_square, max_deviation, irregular_deviation, normalized_deviation)
    #[pyfunction]
    pub fn histogram_stats(channel: PyReadonlyArray2<'_, u8>) -> PyResult<(f64, f64, f64, f64, f64)> {
        let stats = Histogram::from_channel(channel.as_array()).uniformity()?;
        Ok((
            stats.expected,
            stats.chi_square,
            stats.max_deviation,
            stats.irregular_deviation,
            stats.normalized_deviation,
        ))
    }

    // ========================================================================
    // Entropy
    // ========================================================================

    #[pyfunction]
    pub fn global_entropy(channel: PyReadonlyArray2<'_, u8>) -> PyResult<f64> {
        Ok(entropy::global_entropy(channel.as_array())?)
    }

    /// Tiled entropy map.
    ///
    /// # Returns
    /// Tuple (grid, mean) where grid has one entropy value per tile
    #[pyfunction]
    #[pyo3(signature = (channel, window_size=8))]
    pub fn local_entropy<'py>(
        py: Python<'py>,
        channel: PyReadonlyArray2<'py, u8>,
        window_size: usize,
    ) -> PyResult<(Bound<'py, PyArray2<f64>>, f64)> {
        let local = entropy::local_entropy(channel.as_array(), window_size, true)?;
        Ok((local.grid.into_pyarray(py), local.mean))
    }

    // ========================================================================
    // Fidelity
    // ========================================================================

    /// MSE, MAE and PSNR of two equal-shaped u8 channels.
    ///
    /// # Returns
    /// Tuple (mse, mae, psnr); psnr is inf for identical channels
    #[pyfunction]
    #[pyo3(signature = (a, b, max_pixel_value=255.0))]
    pub fn fidelity(
        a: PyReadonlyArray2<'_, u8>,
        b: PyReadonlyArray2<'_, u8>,
        max_pixel_value: f64,
    ) -> PyResult<(f64, f64, f64)> {
        let m = fidelity_mod::fidelity(a.as_array(), b.as_array(), max_pixel_value)?;
        Ok((m.mse, m.mae, m.psnr))
    }

    // ========================================================================
    // Color Space
    // ========================================================================

    /// Convert an RGB(A) u8 image to YCrCb (channel order Y, Cr, Cb).
    #[pyfunction]
    pub fn rgb_to_ycrcb<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = color_space::rgb_to_ycrcb_u8(image.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// Convert a YCrCb u8 image back to RGB.
    #[pyfunction]
    pub fn ycrcb_to_rgb<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = color_space::ycrcb_to_rgb_u8(image.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// imgcrypt_metrics extension module
    #[pymodule]
    pub fn imgcrypt_metrics(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Correlation
        m.add_function(wrap_pyfunction!(correlation, m)?)?;
        m.add_function(wrap_pyfunction!(adjacent_correlation, m)?)?;

        // Histogram
        m.add_function(wrap_pyfunction!(histogram, m)?)?;
        m.add_function(wrap_pyfunction!(histogram_stats, m)?)?;

        // Entropy
        m.add_function(wrap_pyfunction!(global_entropy, m)?)?;
        m.add_function(wrap_pyfunction!(local_entropy, m)?)?;

        // Fidelity
        m.add_function(wrap_pyfunction!(fidelity, m)?)?;

        // Color space
        m.add_function(wrap_pyfunction!(rgb_to_ycrcb, m)?)?;
        m.add_function(wrap_pyfunction!(ycrcb_to_rgb, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::imgcrypt_metrics;
