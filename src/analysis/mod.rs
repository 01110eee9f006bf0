//! Channel statistics for judging image encryption quality.
//!
//! ## Input Format
//!
//! Every metric works on single channels:
//!
//! | Input | Shape | Type | Description |
//! |-------|-------|------|-------------|
//! | Channel | (H, W) | u8 | One plane, 0-255 |
//! | Image | (H, W, 3 or 4) | u8 | RGB(A), only for color conversion |
//!
//! Use [`color_space::rgb_to_ycrcb_u8`] and [`channel::channel_view`] to get
//! the Y, Cr and Cb planes of an image.
//!
//! ## Architecture
//!
//! - **Pure** - no metric keeps state or touches the filesystem
//! - **Widened arithmetic** - samples are converted to f64 before any sum
//! - **Explicit failure** - degenerate input returns an error, never NaN
//!
//! ## Metric Categories
//!
//! - **Correlation**: inter-image and adjacent-pixel Pearson coefficients
//! - **Histogram**: chi-square and deviations from a flat histogram
//! - **Entropy**: global and tiled Shannon entropy
//! - **Fidelity**: MSE, MAE, PSNR

pub mod channel;
pub mod color_space;
pub mod correlation;
pub mod entropy;
pub mod fidelity;
pub mod histogram;

pub use channel::{channel_view, ChannelKind};
pub use correlation::{
    adjacency_correlation, adjacent_correlation, correlation_between, AdjacencyCorrelation, Direction,
};
pub use entropy::{global_entropy, local_entropy, shannon_entropy, LocalEntropy};
pub use fidelity::{fidelity, mae, mse, psnr, psnr_from_mse, FidelityMetrics};
pub use histogram::{histogram_stats, Histogram, UniformityStats};
