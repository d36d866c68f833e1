//! Shape model: discriminated union, footprints, and placement helpers
//!
//! A [`Shape`] is immutable geometry; a [`PlacedShape`] pairs it with the
//! color sampled from the canvas and the size metric used for cascade tier
//! ordering. Footprint rasterization lives here and is shared by occupancy
//! marking, color sampling, and the raster renderer, so all three always
//! agree about which pixels a shape covers.

use crate::math::polygon::{polygon_area, polygon_centroid, scanline_crossings};

/// A 2D coordinate in canvas space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Horizontal coordinate in pixels
    pub x: f64,
    /// Vertical coordinate in pixels
    pub y: f64,
}

impl Point {
    /// Create a point from coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed union of the primitive geometries a run can place
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Three-vertex polygon from triangulation or cascade generation
    Triangle {
        /// Triangle corners
        vertices: [Point; 3],
    },
    /// General polygon, e.g. a clipped Voronoi cell
    Polygon {
        /// Vertex loop in drawing order
        vertices: Vec<Point>,
    },
    /// Axis-aligned rectangle, optionally rotated about its center
    Rect {
        /// Left edge before rotation
        x: f64,
        /// Top edge before rotation
        y: f64,
        /// Width in pixels
        width: f64,
        /// Height in pixels
        height: f64,
        /// Rotation about the rectangle center, in degrees
        rotation: f64,
    },
    /// Circle described by center and radius
    Circle {
        /// Center x coordinate
        cx: f64,
        /// Center y coordinate
        cy: f64,
        /// Radius in pixels
        radius: f64,
    },
}

/// A finalized shape with its sampled fill color and cascade size metric
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedShape {
    /// Geometry of the shape
    pub shape: Shape,
    /// Fill color sampled from the source canvas
    pub fill: [u8; 3],
    /// Characteristic size used for tier ordering (square root of area)
    pub size: f64,
}

impl Shape {
    /// Vertex loop for polygon-like shapes
    ///
    /// Rectangles are expanded to their four (possibly rotated) corners.
    /// Circles have no vertex representation and return `None`.
    pub fn outline(&self) -> Option<Vec<[f64; 2]>> {
        match self {
            Self::Triangle { vertices } => {
                Some(vertices.iter().map(|p| [p.x, p.y]).collect())
            }
            Self::Polygon { vertices } => {
                Some(vertices.iter().map(|p| [p.x, p.y]).collect())
            }
            Self::Rect {
                x,
                y,
                width,
                height,
                rotation,
            } => Some(rect_corners(*x, *y, *width, *height, *rotation)),
            Self::Circle { .. } => None,
        }
    }

    /// Axis-aligned bounding box as `[x_min, y_min, x_max, y_max]`
    pub fn bounding_box(&self) -> [f64; 4] {
        match self {
            Self::Circle { cx, cy, radius } => {
                [cx - radius, cy - radius, cx + radius, cy + radius]
            }
            _ => {
                let outline = self.outline().unwrap_or_default();
                let mut bbox = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
                for [x, y] in outline {
                    bbox[0] = bbox[0].min(x);
                    bbox[1] = bbox[1].min(y);
                    bbox[2] = bbox[2].max(x);
                    bbox[3] = bbox[3].max(y);
                }
                bbox
            }
        }
    }

    /// Geometric center of the shape
    pub fn centroid(&self) -> Point {
        match self {
            Self::Circle { cx, cy, .. } => Point::new(*cx, *cy),
            _ => {
                let outline = self.outline().unwrap_or_default();
                let [x, y] = polygon_centroid(&outline);
                Point::new(x, y)
            }
        }
    }

    /// Area in square pixels
    pub fn area(&self) -> f64 {
        match self {
            Self::Circle { radius, .. } => std::f64::consts::PI * radius * radius,
            _ => polygon_area(&self.outline().unwrap_or_default()),
        }
    }

    /// Characteristic size metric used for cascade tier ordering
    pub fn size_metric(&self) -> f64 {
        self.area().sqrt()
    }

    /// The shape translated by `(dx, dy)`
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        match self {
            Self::Triangle { vertices } => Self::Triangle {
                vertices: [
                    Point::new(vertices[0].x + dx, vertices[0].y + dy),
                    Point::new(vertices[1].x + dx, vertices[1].y + dy),
                    Point::new(vertices[2].x + dx, vertices[2].y + dy),
                ],
            },
            Self::Polygon { vertices } => Self::Polygon {
                vertices: vertices
                    .iter()
                    .map(|p| Point::new(p.x + dx, p.y + dy))
                    .collect(),
            },
            Self::Rect {
                x,
                y,
                width,
                height,
                rotation,
            } => Self::Rect {
                x: x + dx,
                y: y + dy,
                width: *width,
                height: *height,
                rotation: *rotation,
            },
            Self::Circle { cx, cy, radius } => Self::Circle {
                cx: cx + dx,
                cy: cy + dy,
                radius: *radius,
            },
        }
    }

    /// Rebalance the shape into canvas bounds by translation
    ///
    /// Shapes that poke over an edge are shifted back inside rather than
    /// rejected outright. Returns `None` when the shape is larger than the
    /// canvas in either dimension and cannot fit at all.
    pub fn clamped_into(&self, width: u32, height: u32) -> Option<Self> {
        let [x_min, y_min, x_max, y_max] = self.bounding_box();
        let (w, h) = (f64::from(width), f64::from(height));
        if x_max - x_min > w || y_max - y_min > h {
            return None;
        }

        let mut dx = 0.0;
        let mut dy = 0.0;
        if x_min < 0.0 {
            dx = -x_min;
        } else if x_max > w {
            dx = w - x_max;
        }
        if y_min < 0.0 {
            dy = -y_min;
        } else if y_max > h {
            dy = h - y_max;
        }

        if dx == 0.0 && dy == 0.0 {
            Some(self.clone())
        } else {
            Some(self.translated(dx, dy))
        }
    }

    /// Visit every canvas pixel covered by the shape
    ///
    /// Pixels are tested at their centers and visited in row-major order,
    /// clipped to `[0, width) x [0, height)`. The same traversal backs
    /// occupancy marking, color sampling, and rasterization.
    pub fn for_each_pixel<F: FnMut(u32, u32)>(&self, width: u32, height: u32, mut visit: F) {
        match self {
            Self::Circle { cx, cy, radius } => {
                let r2 = radius * radius;
                let (y0, y1) = row_span(cy - radius, cy + radius, height);
                let (x0, x1) = col_span(cx - radius, cx + radius, width);
                for py in y0..y1 {
                    let dy = f64::from(py) + 0.5 - cy;
                    for px in x0..x1 {
                        let dx = f64::from(px) + 0.5 - cx;
                        if dx.mul_add(dx, dy * dy) <= r2 {
                            visit(px, py);
                        }
                    }
                }
            }
            Self::Rect {
                x,
                y,
                width: rw,
                height: rh,
                rotation,
            } if rotation.abs() < f64::EPSILON => {
                let (y0, y1) = row_span(*y, y + rh, height);
                let (x0, x1) = col_span(*x, x + rw, width);
                for py in y0..y1 {
                    for px in x0..x1 {
                        visit(px, py);
                    }
                }
            }
            _ => {
                let Some(outline) = self.outline() else {
                    return;
                };
                let [_, y_min, _, y_max] = self.bounding_box();
                let (y0, y1) = row_span(y_min, y_max, height);
                let mut crossings = Vec::with_capacity(8);
                for py in y0..y1 {
                    crossings.clear();
                    scanline_crossings(&outline, f64::from(py) + 0.5, &mut crossings);
                    crossings
                        .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                    for pair in crossings.chunks_exact(2) {
                        let (x0, x1) = col_span(pair[0], pair[1], width);
                        for px in x0..x1 {
                            visit(px, py);
                        }
                    }
                }
            }
        }
    }

    /// Number of canvas pixels covered by the shape
    pub fn pixel_count(&self, width: u32, height: u32) -> usize {
        let mut count = 0;
        self.for_each_pixel(width, height, |_, _| count += 1);
        count
    }
}

/// Corner loop of a rectangle rotated about its center
fn rect_corners(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Vec<[f64; 2]> {
    let corners = [
        [x, y],
        [x + width, y],
        [x + width, y + height],
        [x, y + height],
    ];
    if rotation.abs() < f64::EPSILON {
        return corners.to_vec();
    }

    let cx = x + width / 2.0;
    let cy = y + height / 2.0;
    let (sin, cos) = rotation.to_radians().sin_cos();
    corners
        .iter()
        .map(|[px, py]| {
            let dx = px - cx;
            let dy = py - cy;
            [
                dx.mul_add(cos, -(dy * sin)) + cx,
                dx.mul_add(sin, dy * cos) + cy,
            ]
        })
        .collect()
}

/// Clamped pixel row range covering `[y_min, y_max]`, tested at pixel centers
fn row_span(y_min: f64, y_max: f64, height: u32) -> (u32, u32) {
    let start = (y_min - 0.5).ceil().max(0.0) as u32;
    let end = ((y_max + 0.5).floor().max(0.0) as u32).min(height);
    (start.min(end), end)
}

/// Clamped pixel column range whose centers fall in `[x_min, x_max)`
fn col_span(x_min: f64, x_max: f64, width: u32) -> (u32, u32) {
    let start = (x_min - 0.5).ceil().max(0.0) as u32;
    let end = ((x_max - 0.5).ceil().max(0.0) as u32).min(width);
    (start.min(end), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_footprint_matches_dimensions() {
        let rect = Shape::Rect {
            x: 2.0,
            y: 3.0,
            width: 4.0,
            height: 5.0,
            rotation: 0.0,
        };
        assert_eq!(rect.pixel_count(100, 100), 20);
    }

    #[test]
    fn circle_footprint_approximates_area() {
        let circle = Shape::Circle {
            cx: 50.0,
            cy: 50.0,
            radius: 10.0,
        };
        let pixels = circle.pixel_count(100, 100) as f64;
        let area = circle.area();
        assert!((pixels - area).abs() / area < 0.05);
    }

    #[test]
    fn footprint_is_clipped_to_canvas() {
        let circle = Shape::Circle {
            cx: 0.0,
            cy: 0.0,
            radius: 5.0,
        };
        circle.for_each_pixel(10, 10, |x, y| {
            assert!(x < 10 && y < 10);
        });
    }

    #[test]
    fn clamping_recenters_protruding_shape() {
        let rect = Shape::Rect {
            x: -3.0,
            y: 4.0,
            width: 6.0,
            height: 6.0,
            rotation: 0.0,
        };
        let clamped = rect.clamped_into(20, 20).map(|s| s.bounding_box());
        assert_eq!(clamped, Some([0.0, 4.0, 6.0, 10.0]));
    }

    #[test]
    fn clamping_rejects_oversized_shape() {
        let rect = Shape::Rect {
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 5.0,
            rotation: 0.0,
        };
        assert_eq!(rect.clamped_into(20, 20), None);
    }

    #[test]
    fn rotated_rect_preserves_area() {
        let flat = Shape::Rect {
            x: 20.0,
            y: 20.0,
            width: 12.0,
            height: 8.0,
            rotation: 0.0,
        };
        let tilted = Shape::Rect {
            x: 20.0,
            y: 20.0,
            width: 12.0,
            height: 8.0,
            rotation: 30.0,
        };
        assert!((flat.area() - tilted.area()).abs() < 1e-9);
    }

    #[test]
    fn triangle_centroid_is_vertex_mean() {
        let tri = Shape::Triangle {
            vertices: [
                Point::new(0.0, 0.0),
                Point::new(6.0, 0.0),
                Point::new(0.0, 6.0),
            ],
        };
        let c = tri.centroid();
        assert!((c.x - 2.0).abs() < 1e-9);
        assert!((c.y - 2.0).abs() < 1e-9);
    }
}
