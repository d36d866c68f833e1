//! Command line interface, configuration, image I/O, metrics, and progress
//!
//! Everything that touches the filesystem or the terminal lives here; the
//! generation modules stay pure and deterministic.

/// Command line parsing and batch orchestration
pub mod cli;
/// Tunable constants for sampling, cascade placement, and output naming
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Source image loading and PNG export
pub mod image;
/// Run metrics model, JSON export, and the engine observer sink
pub mod metrics;
/// Terminal progress reporting
pub mod progress;

pub use error::{GenerationError, Result};
