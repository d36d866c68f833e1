//! Poisson-disk sampling via Bridson's algorithm
//!
//! Produces blue-noise point sets where no two points are closer than the
//! disk radius. A background grid with cells of `radius / sqrt(2)` makes the
//! neighborhood check constant time.

use crate::geometry::canvas::Canvas;
use crate::geometry::shape::Point;
use crate::io::configuration::{POISSON_CANDIDATES, POISSON_RADIUS_FRACTION};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Attempts allowed when searching for the initial point
const SEED_ATTEMPTS: usize = 200;

/// Background acceleration grid holding at most one point index per cell
struct DiskGrid {
    cell_size: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Option<usize>>,
}

impl DiskGrid {
    fn new(width: f64, height: f64, radius: f64) -> Self {
        let cell_size = radius / std::f64::consts::SQRT_2;
        let cols = (width / cell_size).ceil().max(1.0) as usize;
        let rows = (height / cell_size).ceil().max(1.0) as usize;
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![None; cols * rows],
        }
    }

    fn cell_of(&self, p: Point) -> (usize, usize) {
        let col = ((p.x / self.cell_size) as usize).min(self.cols - 1);
        let row = ((p.y / self.cell_size) as usize).min(self.rows - 1);
        (col, row)
    }

    fn insert(&mut self, p: Point, index: usize) {
        let (col, row) = self.cell_of(p);
        if let Some(cell) = self.cells.get_mut(row * self.cols + col) {
            *cell = Some(index);
        }
    }

    /// Whether any accepted point lies within `radius` of the candidate
    fn has_neighbor(&self, candidate: Point, radius: f64, points: &[Point]) -> bool {
        let (col, row) = self.cell_of(candidate);
        let radius_sq = radius * radius;
        for dr in -2_i64..=2 {
            for dc in -2_i64..=2 {
                let r = row as i64 + dr;
                let c = col as i64 + dc;
                if r < 0 || c < 0 || r >= self.rows as i64 || c >= self.cols as i64 {
                    continue;
                }
                let slot = r as usize * self.cols + c as usize;
                if let Some(index) = self.cells.get(slot).copied().flatten()
                    && let Some(p) = points.get(index)
                {
                    let dx = p.x - candidate.x;
                    let dy = p.y - candidate.y;
                    if dx.mul_add(dx, dy * dy) < radius_sq {
                        return true;
                    }
                }
            }
        }
        false
    }
}

/// Sample up to `count` points with Poisson-disk spacing
///
/// The radius defaults to a fraction of the canvas diagonal when not given.
/// Returns fewer points than requested once the spacing constraint
/// saturates the valid region.
pub fn sample(canvas: &Canvas, count: usize, seed: u64, radius: Option<f64>) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let (width, height) = (f64::from(canvas.width()), f64::from(canvas.height()));
    let diagonal = width.hypot(height);
    let radius = radius
        .unwrap_or(diagonal * POISSON_RADIUS_FRACTION)
        .max(1.0);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = DiskGrid::new(width, height, radius);
    let mut points: Vec<Point> = Vec::with_capacity(count);
    let mut active: Vec<usize> = Vec::new();

    // Seed the process from a random valid pixel.
    for _ in 0..SEED_ATTEMPTS {
        let p = Point::new(rng.random::<f64>() * width, rng.random::<f64>() * height);
        if canvas.is_valid(p.x as u32, p.y as u32) {
            grid.insert(p, 0);
            points.push(p);
            active.push(0);
            break;
        }
    }

    while let Some(pick) = (!active.is_empty() && points.len() < count)
        .then(|| rng.random_range(0..active.len()))
    {
        let Some(&around) = active.get(pick).and_then(|i| points.get(*i)) else {
            break;
        };
        let mut placed = false;
        for _ in 0..POISSON_CANDIDATES {
            let angle = rng.random::<f64>() * std::f64::consts::TAU;
            let distance = radius * (1.0 + rng.random::<f64>());
            let candidate = Point::new(
                distance.mul_add(angle.cos(), around.x),
                distance.mul_add(angle.sin(), around.y),
            );
            if candidate.x < 0.0 || candidate.y < 0.0 || candidate.x >= width || candidate.y >= height
            {
                continue;
            }
            if !canvas.is_valid(candidate.x as u32, candidate.y as u32) {
                continue;
            }
            if grid.has_neighbor(candidate, radius, &points) {
                continue;
            }
            let index = points.len();
            grid.insert(candidate, index);
            points.push(candidate);
            active.push(index);
            placed = true;
            break;
        }
        if !placed {
            active.swap_remove(pick);
        }
    }
    points
}
