//! Pearson correlation between channels and between adjacent pixels.
//!
//! A well-encrypted image shows correlation close to 0 both against its
//! plain image and between neighbouring pixels, while natural images sit
//! close to 1 for adjacent pixels.

use ndarray::{s, ArrayView2};

use crate::analysis::channel::ensure_same_shape;
use crate::error::{AnalysisError, Result};

/// Neighbour direction used to pair samples within one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Pixel and its right neighbour. Last column excluded.
    Horizontal,
    /// Pixel and the one directly below. Last row excluded.
    Vertical,
    /// Pixel and the one below-right. Last row and column excluded.
    Diagonal,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Self::Horizontal, Self::Vertical, Self::Diagonal];

    pub fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
            Self::Diagonal => "Diagonal",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            "diagonal" | "d" => Ok(Self::Diagonal),
            _ => Err(AnalysisError::UnknownDirection(s.to_string())),
        }
    }
}

/// Adjacent-pixel correlation of one channel in every direction.
///
/// Each direction is computed on its own: a single-row channel still has a
/// horizontal value even though it has no vertical pairs.
#[derive(Debug)]
pub struct AdjacencyCorrelation {
    pub horizontal: Result<f64>,
    pub vertical: Result<f64>,
    pub diagonal: Result<f64>,
}

impl AdjacencyCorrelation {
    pub fn get(&self, direction: Direction) -> &Result<f64> {
        match direction {
            Direction::Horizontal => &self.horizontal,
            Direction::Vertical => &self.vertical,
            Direction::Diagonal => &self.diagonal,
        }
    }
}

/// Pearson correlation coefficient of two equal-length sequences.
///
/// Fails with [`AnalysisError::ZeroVariance`] when either sequence is
/// constant, instead of returning NaN.
pub fn pearson<X, Y>(xs: X, ys: Y) -> Result<f64>
where
    X: ExactSizeIterator<Item = f64> + Clone,
    Y: ExactSizeIterator<Item = f64> + Clone,
{
    let n = xs.len();
    if n != ys.len() {
        return Err(AnalysisError::LengthMismatch { left: n, right: ys.len() });
    }
    if n < 2 {
        return Err(AnalysisError::TooFewSamples(n));
    }

    let count = n as f64;
    let mean_x = xs.clone().sum::<f64>() / count;
    let mean_y = ys.clone().sum::<f64>() / count;

    let (mut cov, mut var_x, mut var_y) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in xs.zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Err(AnalysisError::ZeroVariance);
    }

    // Rounding can push |r| slightly past 1
    Ok((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pearson correlation of two slices.
pub fn pearson_slices(xs: &[f64], ys: &[f64]) -> Result<f64> {
    pearson(xs.iter().copied(), ys.iter().copied())
}

/// Correlation between the same channel of two images.
///
/// Both channels are flattened in row-major order.
pub fn correlation_between(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<f64> {
    ensure_same_shape(&a, &b)?;
    pearson(
        a.iter().map(|&v| f64::from(v)),
        b.iter().map(|&v| f64::from(v)),
    )
}

/// Correlation of each sample with its neighbour in `direction`.
pub fn adjacent_correlation(channel: ArrayView2<u8>, direction: Direction) -> Result<f64> {
    let (height, width) = channel.dim();
    if height == 0 || width == 0 {
        return Err(AnalysisError::TooFewSamples(0));
    }
    let (first, second) = match direction {
        Direction::Horizontal => (
            channel.slice(s![.., ..width - 1]),
            channel.slice(s![.., 1..]),
        ),
        Direction::Vertical => (
            channel.slice(s![..height - 1, ..]),
            channel.slice(s![1.., ..]),
        ),
        Direction::Diagonal => (
            channel.slice(s![..height - 1, ..width - 1]),
            channel.slice(s![1.., 1..]),
        ),
    };
    correlation_between(first, second)
}

/// Horizontal, vertical and diagonal adjacency correlation in one call.
pub fn adjacency_correlation(channel: ArrayView2<u8>) -> AdjacencyCorrelation {
    AdjacencyCorrelation {
        horizontal: adjacent_correlation(channel, Direction::Horizontal),
        vertical: adjacent_correlation(channel, Direction::Vertical),
        diagonal: adjacent_correlation(channel, Direction::Diagonal),
    }
}
