//! Cubist tessellation art generation from raster images
//!
//! The system samples points across a source image, builds a geometric
//! partition (Delaunay triangles, Voronoi cells, or rectangles), colors each
//! cell from the source, and exports matching raster (PNG) and vector (SVG)
//! results. The cascade fill engine places non-overlapping, color-sampled
//! shapes at descending size tiers, steering large shapes into open space and
//! small shapes into remaining gaps.

#![forbid(unsafe_code)]

/// Cascade fill engine: occupancy tracking, size tiers, priority-guided placement
pub mod cascade;
/// Canvas, shape model, and tessellation geometry builders
pub mod geometry;
/// Input/output operations, CLI orchestration, metrics, and error handling
pub mod io;
/// Polygon and numeric utilities
pub mod math;
/// Renderers producing raster and vector output from one shape list
pub mod render;
/// Deterministic point sampling strategies
pub mod sampler;

pub use io::error::{GenerationError, Result};
