//! Vector (SVG) rendering
//!
//! Emits one `<g>` element per generation stage so multi-stage outputs stay
//! inspectable. Shape order, count, and geometry mirror the raster renderer
//! exactly; only the drawing medium differs.

use crate::geometry::shape::{PlacedShape, Shape};
use crate::io::error::{GenerationError, Result};
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Group, Polygon, Rectangle};

/// Build an SVG document from per-stage shape lists
pub fn document(stages: &[Vec<PlacedShape>], width: u32, height: u32, background: [u8; 3]) -> Document {
    let mut doc = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height));

    let backdrop = Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", width)
        .set("height", height)
        .set("fill", fill_attribute(background));
    doc = doc.add(backdrop);

    for (index, shapes) in stages.iter().enumerate() {
        let mut group = Group::new().set("id", format!("stage-{}", index + 1));
        for placed in shapes {
            group = add_shape(group, placed);
        }
        doc = doc.add(group);
    }
    doc
}

/// Total number of shape elements the document will carry
pub fn shape_count(stages: &[Vec<PlacedShape>]) -> usize {
    stages.iter().map(Vec::len).sum()
}

/// Write a document to disk
///
/// # Errors
///
/// Returns an error when the underlying file write fails.
pub fn save(path: &Path, doc: &Document) -> Result<()> {
    svg::save(path, doc).map_err(|source| GenerationError::FileSystem {
        path: path.to_path_buf(),
        operation: "write svg",
        source,
    })
}

fn fill_attribute(color: [u8; 3]) -> String {
    format!("rgb({},{},{})", color[0], color[1], color[2])
}

fn add_shape(group: Group, placed: &PlacedShape) -> Group {
    let fill = fill_attribute(placed.fill);
    match &placed.shape {
        Shape::Triangle { .. } | Shape::Polygon { .. } => {
            let points = placed
                .shape
                .outline()
                .unwrap_or_default()
                .iter()
                .map(|[x, y]| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            group.add(Polygon::new().set("points", points).set("fill", fill))
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
            rotation,
        } => {
            let mut rect = Rectangle::new()
                .set("x", format!("{x:.2}"))
                .set("y", format!("{y:.2}"))
                .set("width", format!("{width:.2}"))
                .set("height", format!("{height:.2}"))
                .set("fill", fill);
            if rotation.abs() >= f64::EPSILON {
                let cx = x + width / 2.0;
                let cy = y + height / 2.0;
                rect = rect.set("transform", format!("rotate({rotation:.2} {cx:.2} {cy:.2})"));
            }
            group.add(rect)
        }
        Shape::Circle { cx, cy, radius } => group.add(
            Circle::new()
                .set("cx", format!("{cx:.2}"))
                .set("cy", format!("{cy:.2}"))
                .set("r", format!("{radius:.2}"))
                .set("fill", fill),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shape::Point;

    fn sample_stage() -> Vec<PlacedShape> {
        vec![
            PlacedShape {
                shape: Shape::Circle {
                    cx: 10.0,
                    cy: 10.0,
                    radius: 4.0,
                },
                fill: [255, 0, 0],
                size: 8.0,
            },
            PlacedShape {
                shape: Shape::Triangle {
                    vertices: [
                        Point::new(0.0, 0.0),
                        Point::new(8.0, 0.0),
                        Point::new(4.0, 6.0),
                    ],
                },
                fill: [0, 255, 0],
                size: 5.0,
            },
        ]
    }

    #[test]
    fn stages_become_groups() {
        let stages = vec![sample_stage(), sample_stage()];
        let rendered = document(&stages, 100, 100, [255, 255, 255]).to_string();
        assert!(rendered.contains("stage-1"));
        assert!(rendered.contains("stage-2"));
        assert_eq!(shape_count(&stages), 4);
    }

    #[test]
    fn fills_use_rgb_notation() {
        let stages = vec![sample_stage()];
        let rendered = document(&stages, 50, 50, [0, 0, 0]).to_string();
        assert!(rendered.contains("rgb(255,0,0)"));
        assert!(rendered.contains("rgb(0,255,0)"));
    }

    #[test]
    fn rotated_rect_gets_a_transform() {
        let stages = vec![vec![PlacedShape {
            shape: Shape::Rect {
                x: 5.0,
                y: 5.0,
                width: 10.0,
                height: 6.0,
                rotation: 12.0,
            },
            fill: [1, 2, 3],
            size: 8.0,
        }]];
        let rendered = document(&stages, 50, 50, [0, 0, 0]).to_string();
        assert!(rendered.contains("rotate(12.00"));
    }
}
