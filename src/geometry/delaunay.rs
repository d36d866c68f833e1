//! Delaunay triangulation builder
//!
//! Wraps `spade` and normalizes its output into the crate's shape model.
//! Degenerate input (fewer than three distinct points, collinear points,
//! non-finite coordinates) yields an empty result rather than an error.

use crate::geometry::shape::{Point, Shape};
use crate::math::polygon::{DEGENERATE_AREA_EPSILON, polygon_area};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::collections::HashSet;

/// Drop non-finite coordinates and exact duplicates, preserving input order
pub fn sanitize(points: &[Point]) -> Vec<Point> {
    let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .filter(|p| seen.insert((p.x.to_bits(), p.y.to_bits())))
        .copied()
        .collect()
}

/// Triangulate a point set into a list of triangles
///
/// Near-zero-area triangles are dropped. Returns an empty list when the
/// input cannot produce a triangulation.
pub fn triangulate(points: &[Point]) -> Vec<Shape> {
    let sites = sanitize(points);
    if sites.len() < 3 {
        return Vec::new();
    }

    let coords: Vec<Point2<f64>> = sites.iter().map(|p| Point2::new(p.x, p.y)).collect();
    let Ok(triangulation) = DelaunayTriangulation::<Point2<f64>>::bulk_load_stable(coords) else {
        return Vec::new();
    };

    let mut shapes = Vec::with_capacity(triangulation.num_inner_faces());
    for face in triangulation.inner_faces() {
        let positions = face.positions();
        let vertices = [
            Point::new(positions[0].x, positions[0].y),
            Point::new(positions[1].x, positions[1].y),
            Point::new(positions[2].x, positions[2].y),
        ];
        let flat: Vec<[f64; 2]> = vertices.iter().map(|v| [v.x, v.y]).collect();
        if polygon_area(&flat) > DEGENERATE_AREA_EPSILON {
            shapes.push(Shape::Triangle { vertices });
        }
    }
    shapes
}
