//! Color sampling and raster/vector output
//!
//! Both renderers consume the same ordered shape list and the same
//! footprint rasterization as occupancy marking, so the PNG and SVG
//! outputs agree on shape count, order, and geometry.

/// Footprint color sampling from the source canvas
pub mod color;
/// Raster (PNG) rendering
pub mod raster;
/// Vector (SVG) rendering
pub mod vector;
