//! Pixel occupancy tracking for cascade placement
//!
//! A compact bit-per-pixel mask records which pixels committed shapes cover.
//! A chamfer distance transform over the mask drives both the open-space
//! priority map and the buffer-zone overlap rejection.

use crate::geometry::shape::Shape;
use bitvec::prelude::{BitVec, Lsb0, bitvec};
use ndarray::Array2;

/// Chamfer weight for diagonal steps
const DIAGONAL_WEIGHT: f64 = std::f64::consts::SQRT_2;

/// Bit-per-pixel occupancy grid with an occupied-pixel counter
#[derive(Debug, Clone)]
pub struct OccupancyMask {
    width: u32,
    height: u32,
    bits: BitVec<usize, Lsb0>,
    occupied: usize,
}

impl OccupancyMask {
    /// Create an empty mask for the given canvas dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            bits: bitvec![usize, Lsb0; 0; len],
            occupied: 0,
        }
    }

    /// Mask width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Whether a pixel is covered by a committed shape
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.index(x, y)
            .and_then(|i| self.bits.get(i).map(|b| *b))
            .unwrap_or(false)
    }

    /// Mark a single pixel as occupied
    pub fn mark_pixel(&mut self, x: u32, y: u32) {
        if let Some(i) = self.index(x, y)
            && let Some(mut bit) = self.bits.get_mut(i)
            && !bit.replace(true)
        {
            self.occupied += 1;
        }
    }

    /// Mark every pixel of a shape footprint as occupied
    pub fn mark_shape(&mut self, shape: &Shape) {
        let (width, height) = (self.width, self.height);
        shape.for_each_pixel(width, height, |x, y| self.mark_pixel(x, y));
    }

    /// Number of occupied pixels
    pub const fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Fraction of the mask that is occupied
    pub fn coverage(&self) -> f64 {
        let total = self.width as usize * self.height as usize;
        if total == 0 {
            return 0.0;
        }
        self.occupied as f64 / total as f64
    }

    /// Distance from each free pixel to the nearest occupied pixel
    ///
    /// Two-pass chamfer transform with 1 / sqrt(2) step weights. When no
    /// pixel is occupied the whole field saturates at a value larger than
    /// any canvas distance.
    // Every index stays within the (rows, cols) the field was allocated with.
    #[allow(clippy::indexing_slicing)]
    pub fn distance_field(&self) -> Array2<f64> {
        let (rows, cols) = (self.height as usize, self.width as usize);
        let saturation = (self.width + self.height) as f64;
        let mut field = Array2::from_elem((rows, cols), saturation);
        for row in 0..rows {
            for col in 0..cols {
                if self.is_occupied(col as u32, row as u32) {
                    field[[row, col]] = 0.0;
                }
            }
        }
        if self.occupied == 0 {
            return field;
        }

        // Forward pass: upper-left neighbors.
        for row in 0..rows {
            for col in 0..cols {
                let mut best = field[[row, col]];
                if col > 0 {
                    best = best.min(field[[row, col - 1]] + 1.0);
                }
                if row > 0 {
                    best = best.min(field[[row - 1, col]] + 1.0);
                    if col > 0 {
                        best = best.min(field[[row - 1, col - 1]] + DIAGONAL_WEIGHT);
                    }
                    if col + 1 < cols {
                        best = best.min(field[[row - 1, col + 1]] + DIAGONAL_WEIGHT);
                    }
                }
                field[[row, col]] = best;
            }
        }
        // Backward pass: lower-right neighbors.
        for row in (0..rows).rev() {
            for col in (0..cols).rev() {
                let mut best = field[[row, col]];
                if col + 1 < cols {
                    best = best.min(field[[row, col + 1]] + 1.0);
                }
                if row + 1 < rows {
                    best = best.min(field[[row + 1, col]] + 1.0);
                    if col + 1 < cols {
                        best = best.min(field[[row + 1, col + 1]] + DIAGONAL_WEIGHT);
                    }
                    if col > 0 {
                        best = best.min(field[[row + 1, col - 1]] + DIAGONAL_WEIGHT);
                    }
                }
                field[[row, col]] = best;
            }
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marking_updates_count_once() {
        let mut mask = OccupancyMask::new(10, 10);
        mask.mark_pixel(3, 4);
        mask.mark_pixel(3, 4);
        assert_eq!(mask.occupied_count(), 1);
        assert!(mask.is_occupied(3, 4));
        assert!(!mask.is_occupied(4, 3));
    }

    #[test]
    fn shape_footprint_matches_pixel_count() {
        let mut mask = OccupancyMask::new(20, 20);
        let rect = Shape::Rect {
            x: 2.0,
            y: 2.0,
            width: 5.0,
            height: 4.0,
            rotation: 0.0,
        };
        mask.mark_shape(&rect);
        assert_eq!(mask.occupied_count(), rect.pixel_count(20, 20));
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut mask = OccupancyMask::new(5, 5);
        mask.mark_pixel(9, 9);
        assert_eq!(mask.occupied_count(), 0);
    }

    #[test]
    fn distance_field_grows_away_from_occupied() {
        let mut mask = OccupancyMask::new(9, 9);
        mask.mark_pixel(4, 4);
        let field = mask.distance_field();
        assert!((field[[4, 4]] - 0.0).abs() < 1e-9);
        assert!((field[[4, 8]] - 4.0).abs() < 1e-9);
        assert!((field[[0, 0]] - 4.0 * DIAGONAL_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn empty_mask_field_saturates() {
        let mask = OccupancyMask::new(6, 6);
        let field = mask.distance_field();
        assert!(field.iter().all(|d| *d >= 12.0));
        assert!((mask.coverage() - 0.0).abs() < 1e-12);
    }
}
