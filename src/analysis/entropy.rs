//! Shannon entropy of a channel, globally and over square tiles.
//!
//! Global entropy close to 8 bits says the channel uses all levels evenly.
//! Local entropy catches regions where the cipher leaves structure behind,
//! which a single global number averages away.

use ndarray::{s, Array2, ArrayView2};
use rayon::prelude::*;

use crate::analysis::histogram::Histogram;
use crate::error::{AnalysisError, Result};

/// Entropy in bits of a histogram with a nonzero total.
///
/// Empty bins are skipped, they contribute nothing and would yield NaN.
fn entropy_bits(hist: &Histogram) -> f64 {
    let total = hist.total() as f64;
    let h: f64 = hist
        .bins()
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            p * p.log2()
        })
        .sum();
    // Avoid reporting -0.0 for single-valued input
    if h == 0.0 { 0.0 } else { -h }
}

/// Shannon entropy in bits of the distribution described by `hist`.
pub fn shannon_entropy(hist: &Histogram) -> Result<f64> {
    if hist.is_empty() {
        return Err(AnalysisError::EmptyChannel);
    }
    Ok(entropy_bits(hist))
}

/// Entropy of the whole channel over 256 bins.
pub fn global_entropy(channel: ArrayView2<u8>) -> Result<f64> {
    shannon_entropy(&Histogram::from_channel(channel))
}

/// Per-tile entropy map of a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalEntropy {
    /// One entropy value per tile, indexed by tile row and column.
    pub grid: Array2<f64>,
    /// Arithmetic mean over all tiles.
    pub mean: f64,
    pub window_size: usize,
}

/// Entropy of non-overlapping `window_size` x `window_size` tiles.
///
/// Tiles that would cross the right or bottom border are dropped, so the grid
/// has shape `(height / window_size, width / window_size)`.
///
/// # Arguments
/// * `channel` - Single 8-bit channel
/// * `window_size` - Tile side length, must be positive
/// * `parallel` - Compute tiles on the rayon pool
pub fn local_entropy(
    channel: ArrayView2<u8>,
    window_size: usize,
    parallel: bool,
) -> Result<LocalEntropy> {
    if window_size == 0 {
        return Err(AnalysisError::InvalidWindow);
    }
    let (height, width) = channel.dim();
    let rows = height / window_size;
    let cols = width / window_size;
    if rows == 0 || cols == 0 {
        return Err(AnalysisError::EmptyChannel);
    }

    let tile_entropy = |index: usize| {
        let (ty, tx) = (index / cols, index % cols);
        let y0 = ty * window_size;
        let x0 = tx * window_size;
        let tile = channel.slice(s![y0..y0 + window_size, x0..x0 + window_size]);
        entropy_bits(&Histogram::from_channel(tile))
    };

    let values: Vec<f64> = if parallel {
        (0..rows * cols).into_par_iter().map(tile_entropy).collect()
    } else {
        (0..rows * cols).map(tile_entropy).collect()
    };

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let grid = Array2::from_shape_vec((rows, cols), values)
        .map_err(|_| AnalysisError::EmptyChannel)?;

    Ok(LocalEntropy { grid, mean, window_size })
}
