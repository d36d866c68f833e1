//! Validates tessellation builders against degenerate input and coverage
//! expectations

use cubist::geometry::shape::{Point, Shape};
use cubist::geometry::{delaunay, rectangles, voronoi};

#[test]
fn delaunay_covers_the_hull_of_its_input() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(0.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(30.0, 40.0),
        Point::new(70.0, 60.0),
    ];
    let triangles = delaunay::triangulate(&points);
    assert!(triangles.len() >= 4);
    let total: f64 = triangles.iter().map(Shape::area).sum();
    assert!((total - 10_000.0).abs() < 1e-6);
}

#[test]
fn delaunay_never_errors_on_degenerate_input() {
    assert!(delaunay::triangulate(&[]).is_empty());
    assert!(delaunay::triangulate(&[Point::new(1.0, 1.0)]).is_empty());
    let collinear: Vec<Point> = (0..10).map(|i| Point::new(f64::from(i), 0.0)).collect();
    assert!(delaunay::triangulate(&collinear).is_empty());
}

#[test]
fn voronoi_cells_partition_the_canvas() {
    let sites: Vec<Point> = (0..5)
        .flat_map(|row| (0..5).map(move |col| Point::new(10.0 + f64::from(col) * 20.0, 10.0 + f64::from(row) * 20.0)))
        .collect();
    let cells = voronoi::partition(&sites, 100.0, 100.0);
    assert_eq!(cells.len(), 25);
    let total: f64 = cells.iter().map(Shape::area).sum();
    assert!((total - 10_000.0).abs() < 1.0);
}

#[test]
fn voronoi_drops_duplicate_sites_without_error() {
    let sites = [
        Point::new(20.0, 20.0),
        Point::new(20.0, 20.0),
        Point::new(60.0, 60.0),
    ];
    let cells = voronoi::partition(&sites, 80.0, 80.0);
    assert_eq!(cells.len(), 2);
}

#[test]
fn rectangle_grid_and_split_cover_the_same_area() {
    let grid = rectangles::grid(300.0, 200.0, 24);
    let packed = rectangles::split(300.0, 200.0, 24, 42);
    let grid_area: f64 = grid.iter().map(Shape::area).sum();
    let packed_area: f64 = packed.iter().map(Shape::area).sum();
    assert!((grid_area - 60_000.0).abs() < 1e-6);
    assert!((packed_area - 60_000.0).abs() < 1e-6);
}

#[test]
fn split_rectangles_do_not_overlap() {
    let shapes = rectangles::split(200.0, 200.0, 30, 5);
    let mut claims = vec![0_u8; 200 * 200];
    for shape in &shapes {
        shape.for_each_pixel(200, 200, |x, y| {
            claims[y as usize * 200 + x as usize] += 1;
        });
    }
    assert!(claims.iter().all(|c| *c <= 1));
}
