//! Geometry mode selection and the shape generator registry

use crate::geometry::shape::{Point, Shape};
use clap::ValueEnum;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// Tessellation strategy used to partition the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeometryMode {
    /// Delaunay triangulation of the sampled points
    Delaunay,
    /// Voronoi partition dual to the Delaunay triangulation
    Voronoi,
    /// Rectangle layout (regular grid or split packing)
    Rectangles,
    /// Cascade fill with freely placed primitives
    Cascade,
}

impl GeometryMode {
    /// Stable lowercase name used in metrics records and SVG group ids
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delaunay => "delaunay",
            Self::Voronoi => "voronoi",
            Self::Rectangles => "rectangles",
            Self::Cascade => "cascade",
        }
    }
}

/// Primitive family a cascade run places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PrimitiveKind {
    /// Rotated rectangles with jittered aspect ratio
    Rectangle,
    /// Circles with jittered radius
    Circle,
    /// Triangles with perturbed vertices
    Triangle,
    /// Irregular convex cells with radial vertex jitter
    VoronoiCell,
}

impl PrimitiveKind {
    /// Stable lowercase name used in metrics records
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::VoronoiCell => "voronoi_cell",
        }
    }
}

/// Generator producing a jittered shape instance centered near a point
///
/// The size argument is the current tier size; generators draw all jitter
/// from the supplied RNG so runs stay deterministic.
pub type GeneratorFn = fn(Point, f64, &mut StdRng) -> Shape;

/// Registry mapping primitive kinds to their shape generators
///
/// Populated once at engine startup; lookups during placement are read-only.
#[derive(Debug, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<PrimitiveKind, GeneratorFn>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator for a primitive kind, replacing any existing one
    pub fn register(&mut self, kind: PrimitiveKind, generator: GeneratorFn) {
        self.generators.insert(kind, generator);
    }

    /// Look up the generator for a primitive kind
    pub fn get(&self, kind: PrimitiveKind) -> Option<GeneratorFn> {
        self.generators.get(&kind).copied()
    }

    /// Number of registered generators
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether the registry has no generators
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_circle(center: Point, size: f64, _rng: &mut StdRng) -> Shape {
        Shape::Circle {
            cx: center.x,
            cy: center.y,
            radius: size / 2.0,
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = GeneratorRegistry::new();
        assert!(registry.is_empty());
        registry.register(PrimitiveKind::Circle, fixed_circle);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(PrimitiveKind::Circle).is_some());
        assert!(registry.get(PrimitiveKind::Rectangle).is_none());
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(GeometryMode::Voronoi.label(), "voronoi");
        assert_eq!(PrimitiveKind::VoronoiCell.label(), "voronoi_cell");
    }
}
