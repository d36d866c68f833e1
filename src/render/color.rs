//! Footprint color sampling from the source canvas
//!
//! A placed shape takes its fill from the pixels it covers. Small
//! footprints average; large ones use the per-channel median, which keeps
//! fills stable across high-contrast regions. Shapes whose footprint
//! rasterizes to nothing fall back to the pixel under their centroid.

use crate::geometry::canvas::Canvas;
use crate::geometry::shape::Shape;

/// Footprint size above which the median replaces the mean
const MEDIAN_THRESHOLD_PIXELS: usize = 4_096;

/// Sample the fill color for a shape from the canvas
pub fn sample_color(canvas: &Canvas, shape: &Shape) -> [u8; 3] {
    let mut samples: Vec<[u8; 3]> = Vec::new();
    shape.for_each_pixel(canvas.width(), canvas.height(), |x, y| {
        samples.push(canvas.pixel(x, y));
    });

    if samples.is_empty() {
        return centroid_color(canvas, shape);
    }
    if samples.len() > MEDIAN_THRESHOLD_PIXELS {
        median_color(&samples)
    } else {
        mean_color(&samples)
    }
}

/// Pixel under the shape centroid, clamped into the canvas
fn centroid_color(canvas: &Canvas, shape: &Shape) -> [u8; 3] {
    let c = shape.centroid();
    let x = (c.x.max(0.0) as u32).min(canvas.width().saturating_sub(1));
    let y = (c.y.max(0.0) as u32).min(canvas.height().saturating_sub(1));
    canvas.pixel(x, y)
}

fn mean_color(samples: &[[u8; 3]]) -> [u8; 3] {
    let mut sums = [0_u64; 3];
    for sample in samples {
        for (sum, channel) in sums.iter_mut().zip(sample) {
            *sum += u64::from(*channel);
        }
    }
    let count = samples.len() as u64;
    [
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ]
}

fn median_color(samples: &[[u8; 3]]) -> [u8; 3] {
    [
        channel_median(samples.iter().map(|s| s[0]).collect()),
        channel_median(samples.iter().map(|s| s[1]).collect()),
        channel_median(samples.iter().map(|s| s[2]).collect()),
    ]
}

fn channel_median(mut values: Vec<u8>) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let mid = values.len() / 2;
    let (_, median, _) = values.select_nth_unstable(mid);
    *median
}
