use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use lm_core::frame::PixelGrid;

/// Convert a decoded image to a luminosity grid (BT.709, alpha ignored).
///
/// # Errors
/// Returns an error if the image has an empty axis.
///
/// # Example
/// ```
/// use image::{DynamicImage, RgbaImage, Rgba};
/// use lm_source::image::grayscale;
///
/// let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 0])));
/// let grid = grayscale(&img).unwrap();
/// assert_eq!((grid.height(), grid.width()), (2, 3));
/// assert_eq!(grid.get(1, 2), 255);
/// ```
pub fn grayscale(img: &DynamicImage) -> Result<PixelGrid> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok(PixelGrid::from_rgba(h as usize, w as usize, rgba.as_raw())?)
}

/// Charge une image depuis le disque en niveaux de gris.
///
/// # Errors
/// Returns an error if the image cannot be decoded or is empty.
///
/// # Example
/// ```no_run
/// use lm_source::image::load_grayscale;
/// use std::path::Path;
/// let grid = load_grayscale(Path::new("samples/girl.png")).unwrap();
/// ```
pub fn load_grayscale(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let grid = grayscale(&img).with_context(|| format!("Image vide : {}", path.display()))?;
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn gray_input_is_preserved() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_fn(4, 2, |x, _| Luma([(x * 60) as u8])));
        let grid = grayscale(&img).unwrap();
        assert_eq!(grid.row(0), &[0, 60, 120, 180]);
        assert_eq!(grid.row(1), &[0, 60, 120, 180]);
    }

    #[test]
    fn color_uses_bt709_weights() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([0, 255, 0])));
        let grid = grayscale(&img).unwrap();
        assert_eq!(grid.get(0, 0), lm_core::frame::luma_bt709(0, 255, 0));
    }

    #[test]
    fn load_roundtrips_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(5, 3, Luma([128])).save(&path).unwrap();

        let grid = load_grayscale(&path).unwrap();
        assert_eq!((grid.height(), grid.width()), (3, 5));
        assert!((0..3).all(|y| grid.row(y).iter().all(|&v| v == 128)));
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_grayscale(&path).is_err());
    }
}
