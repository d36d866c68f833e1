//! Jittered shape instance generators
//!
//! Each generator produces one shape of roughly the requested tier size,
//! centered near the candidate point, with seeded jitter so repeated runs
//! stay identical. Registered into a [`GeneratorRegistry`] at engine
//! startup.

use crate::geometry::registry::{GeneratorRegistry, PrimitiveKind};
use crate::geometry::shape::{Point, Shape};
use rand::Rng;
use rand::rngs::StdRng;

/// Maximum rectangle rotation away from axis-aligned, in degrees
const MAX_ROTATION_DEGREES: f64 = 15.0;
/// Rectangle aspect ratio jitter bounds
const ASPECT_RANGE: (f64, f64) = (0.75, 1.33);
/// Circle radius jitter bounds as a fraction of the nominal radius
const RADIUS_RANGE: (f64, f64) = (0.85, 1.0);
/// Vertex count bounds for organic cells
const CELL_VERTICES: (usize, usize) = (3, 7);
/// Radial jitter bounds for organic cell vertices
const CELL_RADIUS_RANGE: (f64, f64) = (0.5, 1.0);

/// Rectangle with jittered aspect ratio and a slight rotation
pub fn rectangle(center: Point, size: f64, rng: &mut StdRng) -> Shape {
    let aspect = rng.random_range(ASPECT_RANGE.0..ASPECT_RANGE.1);
    let width = size * aspect.sqrt();
    let height = size / aspect.sqrt();
    let rotation = rng.random_range(-MAX_ROTATION_DEGREES..MAX_ROTATION_DEGREES);
    Shape::Rect {
        x: center.x - width / 2.0,
        y: center.y - height / 2.0,
        width,
        height,
        rotation,
    }
}

/// Circle with a jittered radius
pub fn circle(center: Point, size: f64, rng: &mut StdRng) -> Shape {
    let radius = size / 2.0 * rng.random_range(RADIUS_RANGE.0..RADIUS_RANGE.1);
    Shape::Circle {
        cx: center.x,
        cy: center.y,
        radius,
    }
}

/// Triangle with perturbed apex and base vertices
pub fn triangle(center: Point, size: f64, rng: &mut StdRng) -> Shape {
    let half = size / 2.0;
    let jitter = size / 4.0;
    let mut perturb = |x: f64, y: f64| {
        Point::new(
            x + rng.random_range(-jitter..jitter),
            y + rng.random_range(-jitter..jitter),
        )
    };
    Shape::Triangle {
        vertices: [
            perturb(center.x, center.y - half),
            perturb(center.x - half, center.y + half),
            perturb(center.x + half, center.y + half),
        ],
    }
}

/// Irregular convex cell with radial vertex jitter
pub fn organic_cell(center: Point, size: f64, rng: &mut StdRng) -> Shape {
    let count = rng.random_range(CELL_VERTICES.0..=CELL_VERTICES.1);
    let offset = rng.random::<f64>() * std::f64::consts::TAU;
    let vertices = (0..count)
        .map(|i| {
            let angle = offset + i as f64 / count as f64 * std::f64::consts::TAU;
            let radius = size / 2.0 * rng.random_range(CELL_RADIUS_RANGE.0..CELL_RADIUS_RANGE.1);
            Point::new(
                radius.mul_add(angle.cos(), center.x),
                radius.mul_add(angle.sin(), center.y),
            )
        })
        .collect();
    Shape::Polygon { vertices }
}

/// Registry with every built-in primitive registered
pub fn default_registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    registry.register(PrimitiveKind::Rectangle, rectangle);
    registry.register(PrimitiveKind::Circle, circle);
    registry.register(PrimitiveKind::Triangle, triangle);
    registry.register(PrimitiveKind::VoronoiCell, organic_cell);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(77)
    }

    #[test]
    fn default_registry_covers_all_primitives() {
        let registry = default_registry();
        assert_eq!(registry.len(), 4);
        for kind in [
            PrimitiveKind::Rectangle,
            PrimitiveKind::Circle,
            PrimitiveKind::Triangle,
            PrimitiveKind::VoronoiCell,
        ] {
            assert!(registry.get(kind).is_some());
        }
    }

    #[test]
    fn shapes_land_near_the_requested_center() {
        let center = Point::new(50.0, 50.0);
        for generator in [rectangle, circle, triangle, organic_cell] {
            let shape = generator(center, 20.0, &mut rng());
            let c = shape.centroid();
            assert!((c.x - 50.0).abs() < 15.0, "centroid {c:?} drifted");
            assert!((c.y - 50.0).abs() < 15.0, "centroid {c:?} drifted");
        }
    }

    #[test]
    fn shape_sizes_track_the_tier_size() {
        let center = Point::new(0.0, 0.0);
        let shape = circle(center, 30.0, &mut rng());
        let Shape::Circle { radius, .. } = shape else {
            unreachable!("circle generator must produce a circle");
        };
        assert!(radius >= 30.0 / 2.0 * 0.85 && radius <= 15.0);
    }

    #[test]
    fn organic_cells_have_valid_vertex_counts() {
        let mut r = rng();
        for _ in 0..20 {
            let shape = organic_cell(Point::new(10.0, 10.0), 12.0, &mut r);
            let Shape::Polygon { vertices } = shape else {
                unreachable!("organic cell generator must produce a polygon");
            };
            assert!((3..=7).contains(&vertices.len()));
        }
    }
}
