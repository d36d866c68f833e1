//! Rectangle grid and split-packing builders

use crate::geometry::shape::Shape;
use crate::io::configuration::{SPLIT_FRACTION_MAX, SPLIT_FRACTION_MIN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest rectangle side the split packer will produce
const MIN_SPLIT_SIDE: f64 = 4.0;

/// Cover the canvas with a regular grid of roughly `target` rectangles
///
/// Rows and columns are chosen so cells stay close to the canvas aspect
/// ratio. Returns an empty list for a zero-sized canvas or zero target.
pub fn grid(width: f64, height: f64, target: usize) -> Vec<Shape> {
    if width <= 0.0 || height <= 0.0 || target == 0 {
        return Vec::new();
    }

    let aspect = width / height;
    let rows = ((target as f64 / aspect).sqrt().round().max(1.0)) as usize;
    let cols = (target as f64 / rows as f64).ceil().max(1.0) as usize;

    let cell_w = width / cols as f64;
    let cell_h = height / rows as f64;
    let mut shapes = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            shapes.push(Shape::Rect {
                x: col as f64 * cell_w,
                y: row as f64 * cell_h,
                width: cell_w,
                height: cell_h,
                rotation: 0.0,
            });
        }
    }
    shapes
}

/// Partition the canvas into `target` rectangles by recursive binary splits
///
/// The largest rectangle is repeatedly cut across its longer side at a
/// seeded random fraction, so the layout is irregular but gapless and
/// deterministic for a fixed seed. Splitting stops early when every
/// remaining rectangle is too small to cut.
pub fn split(width: f64, height: f64, target: usize, seed: u64) -> Vec<Shape> {
    if width <= 0.0 || height <= 0.0 || target == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    // (x, y, w, h) leaves, kept unsorted; the largest is located per cut.
    let mut leaves: Vec<[f64; 4]> = vec![[0.0, 0.0, width, height]];

    while leaves.len() < target {
        let Some(largest) = leaves
            .iter()
            .enumerate()
            .filter(|(_, r)| r[2].max(r[3]) >= 2.0 * MIN_SPLIT_SIDE)
            .max_by(|(_, a), (_, b)| {
                (a[2] * a[3])
                    .partial_cmp(&(b[2] * b[3]))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
        else {
            break;
        };

        let [x, y, w, h] = leaves.swap_remove(largest);
        let fraction = rng.random_range(SPLIT_FRACTION_MIN..SPLIT_FRACTION_MAX);
        if w >= h {
            let cut = w * fraction;
            leaves.push([x, y, cut, h]);
            leaves.push([x + cut, y, w - cut, h]);
        } else {
            let cut = h * fraction;
            leaves.push([x, y, w, cut]);
            leaves.push([x, y + cut, w, h - cut]);
        }
    }

    leaves
        .into_iter()
        .map(|[x, y, w, h]| Shape::Rect {
            x,
            y,
            width: w,
            height: h,
            rotation: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_area(shapes: &[Shape]) -> f64 {
        shapes.iter().map(Shape::area).sum()
    }

    #[test]
    fn grid_covers_canvas_exactly() {
        let shapes = grid(200.0, 100.0, 12);
        assert!(shapes.len() >= 12);
        assert!((total_area(&shapes) - 20_000.0).abs() < 1e-6);
    }

    #[test]
    fn grid_handles_single_cell() {
        let shapes = grid(50.0, 50.0, 1);
        assert_eq!(shapes.len(), 1);
    }

    #[test]
    fn split_reaches_target_and_stays_gapless() {
        let shapes = split(400.0, 300.0, 20, 7);
        assert_eq!(shapes.len(), 20);
        assert!((total_area(&shapes) - 120_000.0).abs() < 1e-6);
    }

    #[test]
    fn split_is_deterministic_per_seed() {
        let a = split(400.0, 300.0, 15, 11);
        let b = split(400.0, 300.0, 15, 11);
        assert_eq!(a.len(), b.len());
        for (left, right) in a.iter().zip(&b) {
            assert!((left.area() - right.area()).abs() < 1e-9);
        }
    }

    #[test]
    fn split_stops_when_pieces_get_too_small() {
        let shapes = split(10.0, 10.0, 1_000, 3);
        assert!(shapes.len() < 1_000);
        assert!((total_area(&shapes) - 100.0).abs() < 1e-6);
    }
}
