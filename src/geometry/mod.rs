//! Canvas, shape model, and tessellation geometry builders
//!
//! This module contains the immutable data model shared by every stage of a
//! run (canvas, points, shapes) and the three tessellation strategies
//! (Delaunay, Voronoi, rectangles) that partition a canvas from sampled
//! points.

/// Immutable canvas dimensions, color buffer, and validity mask
pub mod canvas;
/// Delaunay triangulation builder
pub mod delaunay;
/// Shape generator registry keyed by primitive kind
pub mod registry;
/// Rectangle grid and split-packing builders
pub mod rectangles;
/// Shape model: discriminated union, footprints, and placement helpers
pub mod shape;
/// Voronoi partition builder
pub mod voronoi;

pub use canvas::Canvas;
pub use registry::{GeneratorRegistry, GeometryMode, PrimitiveKind};
pub use shape::{PlacedShape, Point, Shape};
