//! Tunable parameters for a full channel analysis run.

/// Default side length of the square tiles used for local entropy.
pub const DEFAULT_WINDOW_SIZE: usize = 8;

/// Peak sample value for 8-bit channels, used by PSNR.
pub const DEFAULT_MAX_PIXEL_VALUE: f64 = 255.0;

/// Configuration for [`crate::report`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Side length of local-entropy tiles. Partial border tiles are dropped.
    pub window_size: usize,
    /// Peak signal value for PSNR.
    pub max_pixel_value: f64,
    /// Spread tiles and channels over the rayon pool.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_pixel_value: DEFAULT_MAX_PIXEL_VALUE,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_max_pixel_value(mut self, max_pixel_value: f64) -> Self {
        self.max_pixel_value = max_pixel_value;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
