//! PNG snapshot output, gated behind the `png` feature.

use std::path::Path;

use dotfield_core::config::Config;
use dotfield_core::dot::Dot;
use dotfield_core::error::CoreError;
use dotfield_core::scene::SceneState;

use crate::pixel::rasterize;

/// Rasterizes the dots and writes the frame to `path` as a PNG.
pub fn write_png(
    path: &Path,
    dots: &[Dot],
    config: &Config,
    scene: &SceneState,
) -> Result<(), CoreError> {
    let width = scene.width().round() as i64;
    let height = scene.height().round() as i64;
    if width <= 0 || height <= 0 {
        return Err(CoreError::InvalidDimensions);
    }

    let buf = rasterize(dots, config, scene);
    let img = image::RgbaImage::from_raw(width as u32, height as u32, buf)
        .ok_or_else(|| CoreError::Io("pixel buffer size mismatch".to_string()))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| CoreError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::build_dots;
    use dotfield_core::prng::Xorshift64;

    #[test]
    fn writes_a_decodable_png() {
        let config = Config::default();
        let scene = SceneState::recompute(&config, 64.0, 48.0);
        let dots = build_dots(&config, &scene, &mut Xorshift64::new(42));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&path, &dots, &config, &scene).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let config = Config::default();
        let scene = SceneState::recompute(&config, 0.0, 48.0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let err = write_png(&path, &[], &config, &scene).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimensions));
        assert!(!path.exists());
    }
}
