//! Run metrics model, JSON export, and the engine observer sink
//!
//! The cascade engine reports progress through the [`MetricsSink`] trait
//! rather than logging globally; callers decide whether events feed a
//! progress display, a collector, or nothing at all. Completed runs are
//! serialized to a small JSON record for reproducibility checks.

use crate::io::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary of one completed tier
#[derive(Debug, Clone, PartialEq)]
pub struct TierReport {
    /// Position of the tier in the schedule, largest first
    pub tier_index: usize,
    /// Nominal shape size of the tier
    pub size: f64,
    /// Placement attempts the tier spent
    pub attempted: usize,
    /// Shapes the tier committed
    pub placed: usize,
    /// Occupancy coverage after the tier
    pub coverage: f64,
}

/// Observer for cascade engine events
///
/// All methods default to no-ops so sinks implement only what they need.
pub trait MetricsSink {
    /// A shape was committed; `placed` counts shapes so far in the run
    fn shape_committed(&mut self, placed: usize, size: f64) {
        let _ = (placed, size);
    }

    /// A tier finished its attempt budget or filled its shape budget
    fn tier_completed(&mut self, report: &TierReport) {
        let _ = report;
    }

    /// The run terminated
    fn run_completed(&mut self, placed: usize, target: usize, coverage: f64) {
        let _ = (placed, target, coverage);
    }
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl MetricsSink for NullSink {}

/// Sink that accumulates tier reports for inspection
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Reports in tier order
    pub tiers: Vec<TierReport>,
    /// Final (placed, target, coverage) triple, set on completion
    pub summary: Option<(usize, usize, f64)>,
}

impl MetricsSink for CollectingSink {
    fn tier_completed(&mut self, report: &TierReport) {
        self.tiers.push(report.clone());
    }

    fn run_completed(&mut self, placed: usize, target: usize, coverage: f64) {
        self.summary = Some((placed, target, coverage));
    }
}

/// Aggregate counters across all stages of an image
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    /// Points requested across all stages
    pub requested_points: usize,
    /// Points actually sampled across all stages
    pub points: usize,
    /// Shapes emitted across all stages
    pub svg_shape_count: usize,
}

/// Record of one generation stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageMetrics {
    /// One-based stage number
    pub stage: usize,
    /// Tessellation strategy used by the stage
    pub geometry_mode: String,
    /// Points the stage asked the sampler for
    pub requested_points: usize,
    /// Points actually sampled; fewer than requested on sparse valid regions
    pub points: usize,
    /// Shapes the stage contributed to the output
    pub svg_shape_count: usize,
    /// Seed the stage ran with
    pub seed: u64,
}

/// Full metrics record written next to the generated outputs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunMetrics {
    /// Aggregates across all stages
    pub totals: Totals,
    /// Per-stage records in stage order
    pub stages: Vec<StageMetrics>,
}

impl RunMetrics {
    /// Append a stage record and fold it into the totals
    pub fn record_stage(&mut self, stage: StageMetrics) {
        self.totals.requested_points += stage.requested_points;
        self.totals.points += stage.points;
        self.totals.svg_shape_count += stage.svg_shape_count;
        self.stages.push(stage);
    }

    /// Write the record as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            GenerationError::MetricsExport {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, json).map_err(|source| GenerationError::FileSystem {
            path: path.to_path_buf(),
            operation: "write metrics",
            source,
        })
    }
}
