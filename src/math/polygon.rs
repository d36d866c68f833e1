//! Polygon measurements, scanline rasterization support, and clipping
//!
//! Vertices are `[x, y]` pairs in canvas coordinates. All routines accept
//! arbitrary (possibly degenerate) input and produce a best-effort result
//! rather than erroring; callers drop shapes that come back empty or with
//! near-zero area.

/// Area below which a polygon is treated as degenerate
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-6;

/// Absolute polygon area via the shoelace formula
///
/// Returns 0.0 for fewer than three vertices.
pub fn polygon_area(vertices: &[[f64; 2]]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (&[x1, y1], &[x2, y2]) in closed_edges(vertices) {
        sum += x1.mul_add(y2, -(x2 * y1));
    }
    0.5 * sum.abs()
}

/// Iterate polygon edges including the closing edge back to the first vertex
fn closed_edges(
    vertices: &[[f64; 2]],
) -> impl Iterator<Item = (&[f64; 2], &[f64; 2])> {
    vertices.iter().zip(vertices.iter().cycle().skip(1))
}

/// Polygon centroid
///
/// Uses the area-weighted centroid, falling back to the vertex mean when the
/// polygon is degenerate (near-zero area).
pub fn polygon_centroid(vertices: &[[f64; 2]]) -> [f64; 2] {
    if vertices.is_empty() {
        return [0.0, 0.0];
    }

    let mut signed = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (&[x1, y1], &[x2, y2]) in closed_edges(vertices) {
        let cross = x1.mul_add(y2, -(x2 * y1));
        signed += cross;
        cx += (x1 + x2) * cross;
        cy += (y1 + y2) * cross;
    }

    if signed.abs() < DEGENERATE_AREA_EPSILON {
        let n = vertices.len() as f64;
        let sx: f64 = vertices.iter().map(|v| v[0]).sum();
        let sy: f64 = vertices.iter().map(|v| v[1]).sum();
        return [sx / n, sy / n];
    }

    let factor = 1.0 / (3.0 * signed);
    [cx * factor, cy * factor]
}

/// Collect the x coordinates where polygon edges cross the horizontal line `y`
///
/// The crossings are appended to `out` in unsorted order; callers sort and
/// pair them for even-odd scanline filling. Horizontal edges contribute no
/// crossings. The half-open `[min, max)` edge convention keeps shared
/// vertices from being counted twice.
pub fn scanline_crossings(vertices: &[[f64; 2]], y: f64, out: &mut Vec<f64>) {
    for (&[x1, y1], &[x2, y2]) in closed_edges(vertices) {
        let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        if y < lo || y >= hi || (hi - lo).abs() < f64::EPSILON {
            continue;
        }

        let t = (y - y1) / (y2 - y1);
        out.push(t.mul_add(x2 - x1, x1));
    }
}

/// Clip a polygon against an axis-aligned rectangle (Sutherland–Hodgman)
///
/// Returns the clipped vertex loop, which may be empty or degenerate when the
/// polygon lies outside the rectangle.
pub fn clip_to_rect(
    vertices: &[[f64; 2]],
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
) -> Vec<[f64; 2]> {
    let mut output: Vec<[f64; 2]> = vertices.to_vec();

    for edge in 0..4 {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let inside = |p: [f64; 2]| -> bool {
            match edge {
                0 => p[0] >= x_min,
                1 => p[0] <= x_max,
                2 => p[1] >= y_min,
                _ => p[1] <= y_max,
            }
        };
        let intersect = |a: [f64; 2], b: [f64; 2]| -> [f64; 2] {
            if edge < 2 {
                let x_edge = if edge == 0 { x_min } else { x_max };
                let dx = b[0] - a[0];
                if dx.abs() < f64::EPSILON {
                    return [x_edge, a[1]];
                }
                let t = (x_edge - a[0]) / dx;
                [x_edge, t.mul_add(b[1] - a[1], a[1])]
            } else {
                let y_edge = if edge == 2 { y_min } else { y_max };
                let dy = b[1] - a[1];
                if dy.abs() < f64::EPSILON {
                    return [a[0], y_edge];
                }
                let t = (y_edge - a[1]) / dy;
                [t.mul_add(b[0] - a[0], a[0]), y_edge]
            }
        };

        let Some(&last) = input.last() else { break };
        let mut prev = last;
        for &current in &input {
            if inside(current) {
                if !inside(prev) {
                    output.push(intersect(prev, current));
                }
                output.push(current);
            } else if inside(prev) {
                output.push(intersect(prev, current));
            }
            prev = current;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_area_and_centroid() {
        let square = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
        assert!((polygon_area(&square) - 4.0).abs() < 1e-9);
        let c = polygon_centroid(&square);
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((c[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_polygon_has_zero_area() {
        let line = [[0.0, 0.0], [5.0, 0.0]];
        assert!(polygon_area(&line).abs() < DEGENERATE_AREA_EPSILON);
    }

    #[test]
    fn crossings_pair_up_inside_triangle() {
        let tri = [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]];
        let mut xs = Vec::new();
        scanline_crossings(&tri, 5.0, &mut xs);
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - 0.0).abs() < 1e-9);
        assert!((xs[1] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn clip_keeps_interior_polygon_intact() {
        let tri = [[1.0, 1.0], [3.0, 1.0], [2.0, 3.0]];
        let clipped = clip_to_rect(&tri, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(clipped.len(), 3);
        assert!((polygon_area(&clipped) - polygon_area(&tri)).abs() < 1e-9);
    }

    #[test]
    fn clip_cuts_protruding_polygon() {
        let square = [[-5.0, 2.0], [5.0, 2.0], [5.0, 8.0], [-5.0, 8.0]];
        let clipped = clip_to_rect(&square, 0.0, 0.0, 10.0, 10.0);
        assert!((polygon_area(&clipped) - 30.0).abs() < 1e-9);
        for v in &clipped {
            assert!(v[0] >= 0.0 && v[0] <= 10.0);
        }
    }

    #[test]
    fn clip_outside_polygon_is_empty() {
        let tri = [[20.0, 20.0], [30.0, 20.0], [25.0, 30.0]];
        let clipped = clip_to_rect(&tri, 0.0, 0.0, 10.0, 10.0);
        assert!(polygon_area(&clipped) < DEGENERATE_AREA_EPSILON);
    }
}
