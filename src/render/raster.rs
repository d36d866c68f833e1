//! Raster (PNG) rendering
//!
//! Paints placed shapes in order onto a solid background. Footprints come
//! from the same rasterization as occupancy marking, so the painted pixels
//! match what the engine reserved.

use crate::geometry::shape::PlacedShape;
use image::{Rgb, RgbImage};

/// Render an ordered shape list to an RGB image
pub fn render(shapes: &[PlacedShape], width: u32, height: u32, background: [u8; 3]) -> RgbImage {
    let mut image = RgbImage::from_pixel(width.max(1), height.max(1), Rgb(background));
    for placed in shapes {
        let fill = Rgb(placed.fill);
        placed.shape.for_each_pixel(width, height, |x, y| {
            image.put_pixel(x, y, fill);
        });
    }
    image
}
