//! Source image loading and PNG export

use crate::geometry::canvas::Canvas;
use crate::io::error::{GenerationError, Result};
use image::RgbImage;
use ndarray::{Array2, Array3};
use std::path::Path;

/// Alpha / mask value at or above which a pixel counts as valid
const VALID_THRESHOLD: u8 = 128;

/// Load a source image into a canvas
///
/// Transparent pixels (alpha below the threshold) are excluded from the
/// valid region. An optional grayscale mask image further restricts the
/// region: only pixels bright in the mask stay valid.
///
/// # Errors
///
/// Returns an error when either file cannot be decoded, the mask dimensions
/// differ from the image, or the valid region ends up empty.
pub fn load_canvas(path: &Path, mask_path: Option<&Path>) -> Result<Canvas> {
    let rgba = image::open(path)
        .map_err(|source| GenerationError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgb = Array3::zeros((height as usize, width as usize, 3));
    let mut valid = Array2::from_elem((height as usize, width as usize), false);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let (row, col) = (y as usize, x as usize);
        let [r, g, b, a] = pixel.0;
        for (channel, value) in [r, g, b].into_iter().enumerate() {
            if let Some(slot) = rgb.get_mut([row, col, channel]) {
                *slot = value;
            }
        }
        if let Some(flag) = valid.get_mut([row, col]) {
            *flag = a >= VALID_THRESHOLD;
        }
    }

    if let Some(mask_path) = mask_path {
        let mask = image::open(mask_path)
            .map_err(|source| GenerationError::ImageLoad {
                path: mask_path.to_path_buf(),
                source,
            })?
            .to_luma8();
        if mask.dimensions() != (width, height) {
            return Err(GenerationError::InvalidSourceData {
                reason: format!(
                    "mask is {}x{} but image is {width}x{height}",
                    mask.width(),
                    mask.height()
                ),
            });
        }
        for (x, y, pixel) in mask.enumerate_pixels() {
            let [level] = pixel.0;
            if level < VALID_THRESHOLD
                && let Some(flag) = valid.get_mut([y as usize, x as usize])
            {
                *flag = false;
            }
        }
    }

    if !valid.iter().any(|v| *v) {
        return Err(GenerationError::InvalidSourceData {
            reason: "image has no valid pixels after masking".to_owned(),
        });
    }
    Canvas::new(width, height, rgb, valid)
}

/// Write a rendered image as PNG
///
/// # Errors
///
/// Returns an error when encoding or the file write fails.
pub fn export_png(path: &Path, image: &RgbImage) -> Result<()> {
    image.save(path).map_err(|source| GenerationError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}
