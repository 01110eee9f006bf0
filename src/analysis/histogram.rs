//! 256-bin histograms and their divergence from a flat distribution.
//!
//! An ideal cipher image spreads every channel evenly over all 256 levels.
//! The statistics here measure how far a channel's histogram is from that.

use ndarray::ArrayView2;

use crate::error::{AnalysisError, Result};

/// Number of bins, one per 8-bit level over [0, 256).
pub const NUM_BINS: usize = 256;

/// Chi-square critical value for 255 degrees of freedom at the 5% level.
pub const CHI_SQUARE_CRITICAL_5_PERCENT: f64 = 293.2478;

/// Count histogram of an 8-bit channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; NUM_BINS],
    total: u64,
}

impl Histogram {
    /// Count every sample of the channel into its bin.
    pub fn from_channel(channel: ArrayView2<u8>) -> Self {
        Self::from_samples(channel.iter().copied())
    }

    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut bins = [0u64; NUM_BINS];
        for v in samples {
            bins[v as usize] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    pub fn from_counts(bins: [u64; NUM_BINS]) -> Self {
        let total = bins.iter().sum();
        Self { bins, total }
    }

    pub fn bins(&self) -> &[u64; NUM_BINS] {
        &self.bins
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Per-bin count expected under a perfectly flat distribution.
    pub fn uniform_expectation(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(AnalysisError::EmptyChannel);
        }
        Ok(self.total as f64 / NUM_BINS as f64)
    }

    /// Divergence-from-uniform statistics of this histogram.
    pub fn uniformity(&self) -> Result<UniformityStats> {
        let expected = self.uniform_expectation()?;

        let mut chi_square = 0.0f64;
        let mut max_deviation = 0.0f64;
        let mut abs_sum = 0.0f64;
        let mut sq_sum = 0.0f64;

        for &count in self.bins.iter() {
            let diff = count as f64 - expected;
            let sq = diff * diff;
            chi_square += sq / expected;
            max_deviation = max_deviation.max(diff.abs());
            abs_sum += diff.abs();
            sq_sum += sq;
        }

        Ok(UniformityStats {
            expected,
            chi_square,
            max_deviation,
            irregular_deviation: abs_sum / NUM_BINS as f64,
            normalized_deviation: sq_sum.sqrt() / NUM_BINS as f64,
        })
    }
}

/// How far a histogram is from the flat histogram with the same sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformityStats {
    /// Uniform count per bin: total / 256.
    pub expected: f64,
    /// Sum of (observed - expected)^2 / expected.
    pub chi_square: f64,
    /// Largest |observed - expected| over all bins.
    pub max_deviation: f64,
    /// Mean |observed - expected| over all bins.
    pub irregular_deviation: f64,
    /// L2 norm of (observed - expected), divided by the bin count.
    pub normalized_deviation: f64,
}

impl UniformityStats {
    /// Whether the chi-square test accepts uniformity at the 5% level.
    pub fn passes_chi_square(&self) -> bool {
        self.chi_square < CHI_SQUARE_CRITICAL_5_PERCENT
    }
}

/// Histogram and uniformity statistics of a channel in one call.
pub fn histogram_stats(channel: ArrayView2<u8>) -> Result<(Histogram, UniformityStats)> {
    let hist = Histogram::from_channel(channel);
    let stats = hist.uniformity()?;
    Ok((hist, stats))
}
