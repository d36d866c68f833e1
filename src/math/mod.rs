//! Mathematical utilities shared by the geometry builders and renderers

/// Polygon measurements, scanline rasterization support, and clipping
pub mod polygon;
