//! Point sampling over the valid region of a canvas
//!
//! Both samplers draw exclusively from a seeded RNG and the canvas validity
//! mask, so a fixed (canvas, count, seed, mode) tuple always produces the
//! same points. Shortfalls against the requested count are reported by the
//! returned length, never by an error.

/// Poisson-disk sampling via Bridson's algorithm
pub mod poisson;

use crate::geometry::canvas::Canvas;
use crate::geometry::shape::Point;
use crate::io::configuration::SAMPLE_ATTEMPTS_PER_POINT;
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Point distribution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleMode {
    /// Independent uniform draws over the valid region
    Uniform,
    /// Blue-noise distribution with a minimum spacing between points
    Poisson,
}

/// Sample up to `count` points from the valid region of the canvas
///
/// May return fewer points than requested when the valid region is small or
/// the Poisson spacing constraint saturates; callers read the shortfall from
/// the returned length.
pub fn sample(canvas: &Canvas, count: usize, seed: u64, mode: SampleMode) -> Vec<Point> {
    match mode {
        SampleMode::Uniform => uniform(canvas, count, seed),
        SampleMode::Poisson => poisson::sample(canvas, count, seed, None),
    }
}

/// Uniform rejection sampling with a bounded attempt budget
fn uniform(canvas: &Canvas, count: usize, seed: u64) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let (width, height) = (f64::from(canvas.width()), f64::from(canvas.height()));
    let budget = count.saturating_mul(SAMPLE_ATTEMPTS_PER_POINT);

    let mut points = Vec::with_capacity(count);
    for _ in 0..budget {
        if points.len() == count {
            break;
        }
        let x = rng.random::<f64>() * width;
        let y = rng.random::<f64>() * height;
        if canvas.is_valid(x as u32, y as u32) {
            points.push(Point::new(x, y));
        }
    }
    points
}

/// Append the four canvas corners in a fixed order
///
/// Hull-dependent builders (Delaunay, Voronoi) use this so the partition
/// reaches the canvas edges. Order is top-left, top-right, bottom-left,
/// bottom-right.
pub fn append_corners(points: &mut Vec<Point>, width: u32, height: u32) {
    let right = f64::from(width);
    let bottom = f64::from(height);
    points.push(Point::new(0.0, 0.0));
    points.push(Point::new(right, 0.0));
    points.push(Point::new(0.0, bottom));
    points.push(Point::new(right, bottom));
}
