//! Size tier schedule for cascade placement
//!
//! Shapes are placed largest first. The schedule walks a geometric decay
//! from the maximum to the minimum size, handing each tier a shape budget
//! and a bounded number of placement attempts.

use crate::io::configuration::ATTEMPT_MULTIPLIER;
use crate::io::error::{Result, invalid_parameter};

/// One size level of the cascade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeTier {
    /// Nominal shape size at this tier, in pixels
    pub size: f64,
    /// Tier size as a fraction of the schedule's maximum
    pub size_ratio: f64,
    /// Shapes this tier may commit
    pub shape_budget: usize,
    /// Placement attempts this tier may spend
    pub attempt_budget: usize,
}

/// Size tiers in descending placement order
#[derive(Debug, Clone)]
pub struct TierSchedule {
    tiers: Vec<SizeTier>,
}

impl TierSchedule {
    /// Build a schedule of `steps` tiers decaying from `max_size` to `min_size`
    ///
    /// Small tiers get larger budgets than large ones so the cascade fills
    /// gaps left behind by the early tiers.
    ///
    /// # Errors
    ///
    /// Returns an error when the size bounds are not positive, inverted, or
    /// `steps` is zero.
    pub fn new(max_size: f64, min_size: f64, steps: usize, target: usize) -> Result<Self> {
        if !(min_size.is_finite() && max_size.is_finite()) || min_size <= 0.0 {
            return Err(invalid_parameter(
                "min_size",
                &min_size,
                &"sizes must be positive and finite",
            ));
        }
        if min_size > max_size {
            return Err(invalid_parameter(
                "min_size",
                &format!("{min_size} > {max_size}"),
                &"minimum size exceeds maximum size",
            ));
        }
        if steps == 0 {
            return Err(invalid_parameter("size_steps", &steps, &"must be at least 1"));
        }

        let base_budget = (target / steps).max(2);
        let decay = min_size / max_size;
        let mut tiers = Vec::with_capacity(steps);
        for step in 0..steps {
            let t = if steps == 1 {
                0.0
            } else {
                step as f64 / (steps - 1) as f64
            };
            let size = max_size * decay.powf(t);
            let ratio = size / max_size;
            // Small tiers fill gaps, so their budgets scale up.
            let multiplier = (1.0 - ratio).mul_add(2.0, 1.0);
            let shape_budget = ((base_budget as f64 * multiplier).round() as usize).max(1);
            tiers.push(SizeTier {
                size,
                size_ratio: ratio,
                shape_budget,
                attempt_budget: shape_budget * ATTEMPT_MULTIPLIER,
            });
        }
        Ok(Self { tiers })
    }

    /// Tiers in placement order, largest first
    pub fn tiers(&self) -> &[SizeTier] {
        &self.tiers
    }

    /// Number of tiers
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the schedule holds no tiers
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
