//! Channel helpers: slicing planes out of `(H, W, C)` arrays and the shape
//! check every two-channel metric runs.

use ndarray::{ArrayView2, ArrayView3, Axis};

use crate::error::{AnalysisError, Result};

/// One plane of a YCrCb image, in the order the color-space converter emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Luma,
    ChromaRed,
    ChromaBlue,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [Self::Luma, Self::ChromaRed, Self::ChromaBlue];

    /// Index of this plane along the channel axis.
    pub fn index(self) -> usize {
        match self {
            Self::Luma => 0,
            Self::ChromaRed => 1,
            Self::ChromaBlue => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Luma => "Y (Luminance)",
            Self::ChromaRed => "Cr (Chroma Red)",
            Self::ChromaBlue => "Cb (Chroma Blue)",
        }
    }
}

/// Borrow a single channel out of a `(height, width, channels)` image.
pub fn channel_view(image: ArrayView3<'_, u8>, index: usize) -> Result<ArrayView2<'_, u8>> {
    let channels = image.len_of(Axis(2));
    if index >= channels {
        return Err(AnalysisError::ChannelOutOfRange { index, channels });
    }
    Ok(image.index_axis_move(Axis(2), index))
}

/// Fail with [`AnalysisError::ShapeMismatch`] unless both channels have the same dimensions.
pub fn ensure_same_shape<A, B>(left: &ArrayView2<A>, right: &ArrayView2<B>) -> Result<()> {
    if left.dim() != right.dim() {
        return Err(AnalysisError::ShapeMismatch {
            left: left.dim(),
            right: right.dim(),
        });
    }
    Ok(())
}
