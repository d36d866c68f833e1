//! Size-descending, occupancy-aware shape packing
//!
//! The cascade fill engine walks a schedule of shrinking size tiers,
//! scoring the canvas each tier and committing jittered shape instances
//! into free space until the target count is met or the schedule runs out.

/// The cascade fill engine and its configuration
pub mod engine;
/// Jittered shape instance generators
pub mod generator;
/// Pixel occupancy tracking and distance fields
pub mod occupancy;
/// Placement priority maps and candidate extraction
pub mod priority;
/// Size tier schedule
pub mod tiers;

pub use engine::{CascadeConfig, CascadeEngine, CascadeOutcome};
pub use occupancy::OccupancyMask;
pub use tiers::{SizeTier, TierSchedule};
