//! Image loading into `(height, width, 3)` RGB arrays.

use std::path::Path;

use ndarray::Array3;
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// Load an image file as 8-bit RGB.
///
/// Any format the `image` crate decodes is accepted; alpha and higher bit
/// depths are reduced to 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<Array3<u8>> {
    let path = path.as_ref();
    let load_error = |reason: String| AnalysisError::Load {
        path: path.to_path_buf(),
        reason,
    };

    let rgb = image::open(path)
        .map_err(|e| load_error(e.to_string()))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!(path = %path.display(), width, height, "loaded image");

    Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())
        .map_err(|e| load_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_rgb("/nonexistent/definitely_missing.png").unwrap_err();
        match err {
            AnalysisError::Load { path, .. } => {
                assert!(path.ends_with("definitely_missing.png"));
            }
            other => panic!("expected load error, got {:?}", other),
        }
    }

    #[test]
    fn test_png_roundtrip_shape() {
        let dir = std::env::temp_dir().join(format!("imgcrypt_io_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("gradient.png");

        let img = image::RgbImage::from_fn(5, 3, |x, y| image::Rgb([x as u8 * 40, y as u8 * 80, 7]));
        img.save(&file).unwrap();

        let arr = load_rgb(&file).unwrap();
        assert_eq!(arr.dim(), (3, 5, 3));
        assert_eq!(arr[[2, 4, 0]], 160);
        assert_eq!(arr[[2, 4, 1]], 160);
        assert_eq!(arr[[2, 4, 2]], 7);

        std::fs::remove_dir_all(&dir).ok();
    }
}
