//! Runs every channel metric over the Y, Cr and Cb planes of an image.
//!
//! Each metric keeps its own `Result`, so a degenerate channel or a failed
//! statistic never hides the others.

use std::fmt::Debug;

use ndarray::{ArrayView2, ArrayView3};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::analysis::channel::{channel_view, ChannelKind};
use crate::analysis::color_space::rgb_to_ycrcb_u8;
use crate::analysis::correlation::{
    adjacency_correlation, correlation_between, AdjacencyCorrelation, Direction,
};
use crate::analysis::entropy::{global_entropy, local_entropy, LocalEntropy};
use crate::analysis::fidelity::{fidelity, FidelityMetrics};
use crate::analysis::histogram::{Histogram, UniformityStats};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};

/// Results for one YCrCb plane.
///
/// Pair metrics are `None` when only a single image was analysed.
#[derive(Debug)]
pub struct ChannelReport {
    pub channel: ChannelKind,
    /// Correlation between the original and encrypted plane.
    pub inter_correlation: Option<Result<f64>>,
    /// Adjacent-pixel correlation, one `Result` per direction.
    pub adjacency: AdjacencyCorrelation,
    pub histogram: Histogram,
    pub uniformity: Result<UniformityStats>,
    pub global_entropy: Result<f64>,
    pub local_entropy: Result<LocalEntropy>,
    pub fidelity: Option<Result<FidelityMetrics>>,
}

impl ChannelReport {
    /// Names and errors of every metric that could not be computed.
    pub fn failures(&self) -> Vec<(&'static str, &AnalysisError)> {
        let mut out = Vec::new();
        if let Some(Err(e)) = &self.inter_correlation {
            out.push(("inter_correlation", e));
        }
        for direction in Direction::ALL {
            if let Err(e) = self.adjacency.get(direction) {
                out.push((adjacency_metric(direction), e));
            }
        }
        if let Err(e) = &self.uniformity {
            out.push(("uniformity", e));
        }
        if let Err(e) = &self.global_entropy {
            out.push(("global_entropy", e));
        }
        if let Err(e) = &self.local_entropy {
            out.push(("local_entropy", e));
        }
        if let Some(Err(e)) = &self.fidelity {
            out.push(("fidelity", e));
        }
        out
    }
}

/// Per-channel results in Y, Cr, Cb order.
#[derive(Debug)]
pub struct ImageReport {
    pub channels: Vec<ChannelReport>,
}

impl ImageReport {
    pub fn channel(&self, kind: ChannelKind) -> Option<&ChannelReport> {
        self.channels.iter().find(|c| c.channel == kind)
    }

    pub fn has_failures(&self) -> bool {
        self.channels.iter().any(|c| !c.failures().is_empty())
    }
}

fn adjacency_metric(direction: Direction) -> &'static str {
    match direction {
        Direction::Horizontal => "adjacency_horizontal",
        Direction::Vertical => "adjacency_vertical",
        Direction::Diagonal => "adjacency_diagonal",
    }
}

fn adjacency_logged(channel: ArrayView2<u8>, kind: ChannelKind) -> AdjacencyCorrelation {
    let AdjacencyCorrelation { horizontal, vertical, diagonal } = adjacency_correlation(channel);
    AdjacencyCorrelation {
        horizontal: logged(kind, adjacency_metric(Direction::Horizontal), horizontal),
        vertical: logged(kind, adjacency_metric(Direction::Vertical), vertical),
        diagonal: logged(kind, adjacency_metric(Direction::Diagonal), diagonal),
    }
}

fn logged<T: Debug>(channel: ChannelKind, metric: &str, result: Result<T>) -> Result<T> {
    match &result {
        Ok(value) => debug!(channel = channel.label(), metric, ?value, "metric computed"),
        Err(err) => warn!(channel = channel.label(), metric, %err, "metric failed"),
    }
    result
}

fn local_entropy_logged(
    channel: ArrayView2<u8>,
    kind: ChannelKind,
    config: &AnalysisConfig,
) -> Result<LocalEntropy> {
    let result = local_entropy(channel, config.window_size, config.parallel);
    match &result {
        Ok(local) => debug!(
            channel = kind.label(),
            tiles = local.grid.len(),
            mean = local.mean,
            "local entropy computed"
        ),
        Err(err) => warn!(channel = kind.label(), metric = "local_entropy", %err, "metric failed"),
    }
    result
}

/// Single-image metrics of one channel.
pub fn analyze_channel(
    channel: ArrayView2<u8>,
    kind: ChannelKind,
    config: &AnalysisConfig,
) -> ChannelReport {
    let histogram = Histogram::from_channel(channel);
    let uniformity = logged(kind, "uniformity", histogram.uniformity());

    ChannelReport {
        channel: kind,
        inter_correlation: None,
        adjacency: adjacency_logged(channel, kind),
        histogram,
        uniformity,
        global_entropy: logged(kind, "global_entropy", global_entropy(channel)),
        local_entropy: local_entropy_logged(channel, kind, config),
        fidelity: None,
    }
}

/// Single-image metrics of `encrypted` plus the pair metrics against `original`.
pub fn compare_channels(
    original: ArrayView2<u8>,
    encrypted: ArrayView2<u8>,
    kind: ChannelKind,
    config: &AnalysisConfig,
) -> ChannelReport {
    let mut report = analyze_channel(encrypted, kind, config);
    report.inter_correlation = Some(logged(
        kind,
        "inter_correlation",
        correlation_between(original, encrypted),
    ));
    report.fidelity = Some(logged(
        kind,
        "fidelity",
        fidelity(original, encrypted, config.max_pixel_value),
    ));
    report
}

fn for_each_channel<F>(config: &AnalysisConfig, run: F) -> ImageReport
where
    F: Fn(ChannelKind) -> ChannelReport + Sync + Send,
{
    let channels = if config.parallel {
        ChannelKind::ALL.par_iter().map(|&kind| run(kind)).collect()
    } else {
        ChannelKind::ALL.iter().map(|&kind| run(kind)).collect()
    };
    ImageReport { channels }
}

/// Y, Cr and Cb planes of a converted image, indexed by [`ChannelKind::index`].
fn ycrcb_planes(ycrcb: ArrayView3<'_, u8>) -> Result<Vec<ArrayView2<'_, u8>>> {
    ChannelKind::ALL
        .iter()
        .map(|kind| channel_view(ycrcb, kind.index()))
        .collect()
}

/// Convert an RGB(A) image to YCrCb and analyse each plane.
pub fn analyze_image(rgb: ArrayView3<u8>, config: &AnalysisConfig) -> Result<ImageReport> {
    let ycrcb = rgb_to_ycrcb_u8(rgb)?;
    debug!(shape = ?ycrcb.dim(), "converted image to YCrCb");
    let planes = ycrcb_planes(ycrcb.view())?;

    Ok(for_each_channel(config, |kind| {
        analyze_channel(planes[kind.index()], kind, config)
    }))
}

/// Convert both images to YCrCb and compare them plane by plane.
///
/// Differently sized images still get their single-image metrics; the pair
/// metrics of every channel then carry [`AnalysisError::ShapeMismatch`].
pub fn compare_images(
    original_rgb: ArrayView3<u8>,
    encrypted_rgb: ArrayView3<u8>,
    config: &AnalysisConfig,
) -> Result<ImageReport> {
    let original = rgb_to_ycrcb_u8(original_rgb)?;
    let encrypted = rgb_to_ycrcb_u8(encrypted_rgb)?;
    if original.dim() != encrypted.dim() {
        warn!(
            original = ?original.dim(),
            encrypted = ?encrypted.dim(),
            "image shapes differ, pair metrics will fail"
        );
    }

    let original_planes = ycrcb_planes(original.view())?;
    let encrypted_planes = ycrcb_planes(encrypted.view())?;

    Ok(for_each_channel(config, |kind| {
        compare_channels(
            original_planes[kind.index()],
            encrypted_planes[kind.index()],
            kind,
            config,
        )
    }))
}
