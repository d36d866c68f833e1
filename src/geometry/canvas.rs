//! Immutable canvas dimensions, color buffer, and validity mask
//!
//! A [`Canvas`] is created once per run from the source image and never
//! mutated afterwards; samplers, the cascade engine, and the color sampler
//! all read from the same instance.

use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array2, Array3};

/// Read-only source data for a generation run
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    /// RGB color buffer indexed as `(row, col, channel)`
    rgb: Array3<u8>,
    /// Pixels eligible for sampling and placement
    valid: Array2<bool>,
}

impl Canvas {
    /// Create a canvas from a color buffer and validity mask
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the buffer shapes do
    /// not match the stated dimensions.
    pub fn new(width: u32, height: u32, rgb: Array3<u8>, valid: Array2<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "canvas_size",
                &format!("{width}x{height}"),
                &"canvas dimensions must be positive",
            ));
        }
        let expected_rgb = (height as usize, width as usize, 3);
        if rgb.dim() != expected_rgb {
            return Err(invalid_parameter(
                "color_buffer",
                &format!("{:?}", rgb.dim()),
                &format!("expected {expected_rgb:?}"),
            ));
        }
        if valid.dim() != (height as usize, width as usize) {
            return Err(invalid_parameter(
                "validity_mask",
                &format!("{:?}", valid.dim()),
                &format!("expected ({height}, {width})"),
            ));
        }
        Ok(Self {
            width,
            height,
            rgb,
            valid,
        })
    }

    /// Create a uniformly colored, fully valid canvas
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Result<Self> {
        let rgb = Array3::from_shape_fn((height as usize, width as usize, 3), |(_, _, channel)| {
            color.get(channel).copied().unwrap_or(0)
        });
        let valid = Array2::from_elem((height as usize, width as usize), true);
        Self::new(width, height, rgb, valid)
    }

    /// Canvas width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// RGB color at a pixel, black outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let (row, col) = (y as usize, x as usize);
        [
            self.rgb.get([row, col, 0]).copied().unwrap_or(0),
            self.rgb.get([row, col, 1]).copied().unwrap_or(0),
            self.rgb.get([row, col, 2]).copied().unwrap_or(0),
        ]
    }

    /// Whether a pixel is inside the valid (unmasked) region
    pub fn is_valid(&self, x: u32, y: u32) -> bool {
        self.valid
            .get([y as usize, x as usize])
            .copied()
            .unwrap_or(false)
    }

    /// Number of valid pixels
    pub fn valid_pixel_count(&self) -> usize {
        self.valid.iter().filter(|v| **v).count()
    }
}
