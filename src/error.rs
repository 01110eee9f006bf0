//! Error type shared by every analysis function.
//!
//! Each variant describes why a single metric could not be computed.
//! Degenerate inputs are reported here instead of leaking NaN or infinity
//! into downstream statistics.

use std::path::PathBuf;

use thiserror::Error;

/// Analysis error types
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to load image {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("channel shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch { left: (usize, usize), right: (usize, usize) },

    #[error("sequence lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("correlation needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    #[error("sequence has zero variance, correlation is undefined")]
    ZeroVariance,

    #[error("channel has no samples")]
    EmptyChannel,

    #[error("window size must be positive")]
    InvalidWindow,

    #[error("unknown adjacency direction: {0}")]
    UnknownDirection(String),

    #[error("expected 3 or 4 color channels, got {0}")]
    UnsupportedChannels(usize),

    #[error("channel index {index} out of range for {channels} channels")]
    ChannelOutOfRange { index: usize, channels: usize },

    #[error("peak pixel value must be finite and positive, got {0}")]
    InvalidPeak(f64),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(feature = "python")]
impl From<AnalysisError> for pyo3::PyErr {
    fn from(err: AnalysisError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
