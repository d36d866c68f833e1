//! Voronoi partition builder
//!
//! Builds the Voronoi diagram as the dual of a Delaunay triangulation:
//! every cell is the fan of circumcenters of the triangles around its site.
//! Distant guard sites surround the canvas so every real site ends up with a
//! finite cell, which is then clipped back to the canvas rectangle.

use crate::geometry::delaunay::sanitize;
use crate::geometry::shape::{Point, Shape};
use crate::math::polygon::{DEGENERATE_AREA_EPSILON, clip_to_rect, polygon_area};
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Circumcenter of a triangle, if its vertices are not collinear
fn circumcenter(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<[f64; 2]> {
    let d = 2.0 * (a[0] * (b[1] - c[1]) + b[0] * (c[1] - a[1]) + c[0] * (a[1] - b[1]));
    if d.abs() < f64::EPSILON {
        return None;
    }
    let a2 = a[0] * a[0] + a[1] * a[1];
    let b2 = b[0] * b[0] + b[1] * b[1];
    let c2 = c[0] * c[0] + c[1] * c[1];
    let ux = (a2 * (b[1] - c[1]) + b2 * (c[1] - a[1]) + c2 * (a[1] - b[1])) / d;
    let uy = (a2 * (c[0] - b[0]) + b2 * (a[0] - c[0]) + c2 * (b[0] - a[0])) / d;
    Some([ux, uy])
}

/// Guard sites placed well outside the canvas
///
/// With these present, every interior site's circumcenter fan closes into a
/// finite loop before clipping.
fn guard_sites(width: f64, height: f64) -> [Point; 8] {
    let margin = 3.0 * (width + height).max(1.0);
    [
        Point::new(-margin, -margin),
        Point::new(width / 2.0, -margin),
        Point::new(width + margin, -margin),
        Point::new(-margin, height / 2.0),
        Point::new(width + margin, height / 2.0),
        Point::new(-margin, height + margin),
        Point::new(width / 2.0, height + margin),
        Point::new(width + margin, height + margin),
    ]
}

/// Partition the canvas into Voronoi cells around the given sites
///
/// Cells are clipped to `[0, width] x [0, height]`. Cells that collapse to
/// fewer than three vertices or near-zero area are dropped. Degenerate input
/// yields an empty list.
pub fn partition(points: &[Point], width: f64, height: f64) -> Vec<Shape> {
    let sites = sanitize(points);
    if sites.is_empty() || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let real_count = sites.len();

    let mut coords: Vec<Point2<f64>> = sites.iter().map(|p| Point2::new(p.x, p.y)).collect();
    coords.extend(
        guard_sites(width, height)
            .iter()
            .map(|p| Point2::new(p.x, p.y)),
    );

    let Ok(triangulation) = DelaunayTriangulation::<Point2<f64>>::bulk_load_stable(coords) else {
        return Vec::new();
    };

    // Circumcenters of the triangles adjacent to each real site.
    let mut fans: Vec<Vec<[f64; 2]>> = vec![Vec::new(); real_count];
    for face in triangulation.inner_faces() {
        let positions = face.positions();
        let Some(center) = circumcenter(
            [positions[0].x, positions[0].y],
            [positions[1].x, positions[1].y],
            [positions[2].x, positions[2].y],
        ) else {
            continue;
        };
        for vertex in face.vertices() {
            let index = vertex.fix().index();
            if index < real_count
                && let Some(fan) = fans.get_mut(index)
            {
                fan.push(center);
            }
        }
    }

    let mut shapes = Vec::with_capacity(real_count);
    for (index, mut fan) in fans.into_iter().enumerate() {
        if fan.len() < 3 {
            continue;
        }
        let Some(&site) = sites.get(index) else {
            continue;
        };
        fan.sort_by(|a, b| {
            let ta = (a[1] - site.y).atan2(a[0] - site.x);
            let tb = (b[1] - site.y).atan2(b[0] - site.x);
            ta.partial_cmp(&tb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let clipped = clip_to_rect(&fan, 0.0, 0.0, width, height);
        if clipped.len() < 3 || polygon_area(&clipped) < DEGENERATE_AREA_EPSILON {
            continue;
        }
        shapes.push(Shape::Polygon {
            vertices: clipped.iter().map(|v| Point::new(v[0], v[1])).collect(),
        });
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_tile_the_canvas() {
        let sites = [
            Point::new(25.0, 25.0),
            Point::new(75.0, 25.0),
            Point::new(25.0, 75.0),
            Point::new(75.0, 75.0),
            Point::new(50.0, 50.0),
        ];
        let cells = partition(&sites, 100.0, 100.0);
        assert_eq!(cells.len(), 5);
        let total: f64 = cells.iter().map(Shape::area).sum();
        assert!((total - 10_000.0).abs() < 1.0);
    }

    #[test]
    fn cells_stay_inside_bounds() {
        let sites = [
            Point::new(5.0, 5.0),
            Point::new(90.0, 10.0),
            Point::new(40.0, 70.0),
        ];
        for cell in partition(&sites, 100.0, 80.0) {
            let [x_min, y_min, x_max, y_max] = cell.bounding_box();
            assert!(x_min >= -1e-9 && y_min >= -1e-9);
            assert!(x_max <= 100.0 + 1e-9 && y_max <= 80.0 + 1e-9);
        }
    }

    #[test]
    fn single_site_owns_the_whole_canvas() {
        let cells = partition(&[Point::new(30.0, 30.0)], 60.0, 60.0);
        assert_eq!(cells.len(), 1);
        assert!((cells[0].area() - 3_600.0).abs() < 1.0);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(partition(&[], 100.0, 100.0).is_empty());
    }
}
