//! Cascade fill engine
//!
//! Places shapes largest first across the size tier schedule. Every tier
//! scores the canvas, draws placement candidates from the top of the score
//! map, and spends a bounded attempt budget jittering shapes into free
//! space. A run never fails for lack of room; falling short of the target
//! count is reported through the outcome and the metrics sink.

use crate::cascade::generator;
use crate::cascade::occupancy::OccupancyMask;
use crate::cascade::priority;
use crate::cascade::tiers::{SizeTier, TierSchedule};
use crate::geometry::canvas::Canvas;
use crate::geometry::registry::{GeneratorRegistry, PrimitiveKind};
use crate::geometry::shape::{PlacedShape, Point, Shape};
use crate::io::configuration::{
    BUFFER_RATIO, LARGE_TIER_THRESHOLD, MAX_SIZE_FRACTION, MIN_BUFFER_PIXELS, MIN_SHAPE_PIXELS,
    MIN_SIZE_DIVISOR, MIN_SIZE_FLOOR, SIZE_STEPS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::metrics::{MetricsSink, TierReport};
use crate::render::color;
use ndarray::Array2;
use rand::Rng;
use rand::rngs::StdRng;

/// Parameters of one cascade run
#[derive(Debug, Clone)]
pub struct CascadeConfig {
    /// Number of shapes the run tries to place
    pub target_count: usize,
    /// Primitive family to place
    pub primitive: PrimitiveKind,
    /// Number of size tiers between the maximum and minimum size
    pub size_steps: usize,
    /// Largest shape size in pixels; derived from the canvas when `None`
    pub max_size: Option<f64>,
    /// Smallest shape size in pixels; derived from the canvas when `None`
    pub min_size: Option<f64>,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            target_count: crate::io::configuration::DEFAULT_TARGET_SHAPES,
            primitive: PrimitiveKind::Rectangle,
            size_steps: SIZE_STEPS,
            max_size: None,
            min_size: None,
        }
    }
}

/// Result of a cascade run
#[derive(Debug)]
pub struct CascadeOutcome {
    /// Shapes in placement order
    pub shapes: Vec<PlacedShape>,
    /// Shapes actually placed
    pub placed: usize,
    /// Shapes the run aimed for
    pub target: usize,
    /// Final occupancy coverage in `[0, 1]`
    pub coverage: f64,
}

impl CascadeOutcome {
    /// Whether the run placed fewer shapes than requested
    pub const fn fell_short(&self) -> bool {
        self.placed < self.target
    }
}

/// Size-descending shape packing over an occupancy mask
pub struct CascadeEngine<'a> {
    canvas: &'a Canvas,
    config: CascadeConfig,
    registry: GeneratorRegistry,
}

impl<'a> CascadeEngine<'a> {
    /// Create an engine with the built-in primitive generators
    pub fn new(canvas: &'a Canvas, config: CascadeConfig) -> Self {
        Self {
            canvas,
            config,
            registry: generator::default_registry(),
        }
    }

    /// Replace the generator registry
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Derive the size bounds, validating explicit overrides
    fn size_bounds(&self) -> Result<(f64, f64)> {
        let min_dim = f64::from(self.canvas.width().min(self.canvas.height()));
        let max_size = self
            .config
            .max_size
            .unwrap_or((min_dim * MAX_SIZE_FRACTION).max(1.0));
        let min_size = match self.config.min_size {
            Some(explicit) => explicit,
            // Derived minimums are clamped so tiny canvases still get a
            // (possibly flat) schedule instead of an error.
            None => (min_dim / MIN_SIZE_DIVISOR).max(MIN_SIZE_FLOOR).min(max_size),
        };
        if max_size <= 0.0 || !max_size.is_finite() {
            return Err(invalid_parameter(
                "max_size",
                &max_size,
                &"must be positive and finite",
            ));
        }
        Ok((max_size, min_size))
    }

    /// Run the cascade against a (possibly pre-seeded) occupancy mask
    ///
    /// The mask may carry occupancy from earlier stages; committed shapes
    /// from this run are added to it.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid configuration (mask/canvas dimension mismatch,
    /// inverted or non-positive size bounds, unregistered primitive). Never
    /// fails for lack of placeable space.
    pub fn run(
        &self,
        mask: &mut OccupancyMask,
        rng: &mut StdRng,
        sink: &mut dyn MetricsSink,
    ) -> Result<CascadeOutcome> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        if mask.width() != width || mask.height() != height {
            return Err(invalid_parameter(
                "occupancy_mask",
                &format!("{}x{}", mask.width(), mask.height()),
                &format!("must match canvas {width}x{height}"),
            ));
        }
        let generate = self.registry.get(self.config.primitive).ok_or_else(|| {
            invalid_parameter(
                "primitive",
                &self.config.primitive.label(),
                &"no generator registered",
            )
        })?;

        let target = self.config.target_count;
        let (max_size, min_size) = self.size_bounds()?;
        let schedule = TierSchedule::new(max_size, min_size, self.config.size_steps, target)?;
        let stride = priority::candidate_stride(width, height);

        let mut shapes = Vec::with_capacity(target);
        let mut placed = 0_usize;
        let mut distance = mask.distance_field();

        for (tier_index, tier) in schedule.tiers().iter().enumerate() {
            if placed >= target {
                break;
            }
            let buffer = (tier.size * BUFFER_RATIO).max(MIN_BUFFER_PIXELS);
            let mut candidates = self.candidates(mask, &distance, tier, stride);
            let tier_start = placed;
            let mut attempted = 0_usize;
            let mut tier_placed = 0_usize;

            while attempted < tier.attempt_budget
                && tier_placed < tier.shape_budget
                && placed < target
                && !candidates.is_empty()
            {
                attempted += 1;
                // The very first shape of a run goes to the best-scoring
                // cell; everything after draws randomly from the top set.
                let pick = if placed == 0 && mask.occupied_count() == 0 {
                    0
                } else {
                    rng.random_range(0..candidates.len())
                };
                let Some(&(cx, cy)) = candidates.get(pick) else {
                    continue;
                };
                let center = Point::new(f64::from(cx) + 0.5, f64::from(cy) + 0.5);
                let raw = generate(center, tier.size, rng);

                let Some(shape) = raw.clamped_into(width, height) else {
                    continue;
                };
                if !self.footprint_fits(&shape, &distance, buffer) {
                    continue;
                }

                let fill = color::sample_color(self.canvas, &shape);
                mask.mark_shape(&shape);
                shapes.push(PlacedShape {
                    shape,
                    fill,
                    size: tier.size,
                });
                placed += 1;
                tier_placed += 1;
                sink.shape_committed(placed, tier.size);

                distance = mask.distance_field();
                candidates = self.candidates(mask, &distance, tier, stride);
            }

            sink.tier_completed(&TierReport {
                tier_index,
                size: tier.size,
                attempted,
                placed: placed - tier_start,
                coverage: mask.coverage(),
            });
        }

        let outcome = CascadeOutcome {
            shapes,
            placed,
            target,
            coverage: mask.coverage(),
        };
        sink.run_completed(outcome.placed, outcome.target, outcome.coverage);
        Ok(outcome)
    }

    /// Candidate cells for the current tier
    ///
    /// Pixels outside the canvas valid region score zero and are never
    /// offered as placement candidates.
    fn candidates(
        &self,
        mask: &OccupancyMask,
        distance: &Array2<f64>,
        tier: &SizeTier,
        stride: usize,
    ) -> Vec<(u32, u32)> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let mut map = if mask.occupied_count() == 0 {
            priority::center_priority(width, height)
        } else if tier.size_ratio > LARGE_TIER_THRESHOLD {
            priority::open_space_priority(distance, width, height)
        } else {
            priority::gap_priority(distance)
        };
        for ((row, col), score) in map.indexed_iter_mut() {
            if !self.canvas.is_valid(col as u32, row as u32) {
                *score = 0.0;
            }
        }
        priority::top_candidates(&map, stride)
    }

    /// Whether a shape footprint is large enough and clear of the buffer zone
    ///
    /// Every footprint pixel must lie in the canvas valid region and be at
    /// least `buffer` away from occupied pixels, which is equivalent to
    /// dilating the footprint by the buffer and testing for overlap.
    fn footprint_fits(&self, shape: &Shape, distance: &Array2<f64>, buffer: f64) -> bool {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let mut pixels = 0_usize;
        let mut clear = true;
        shape.for_each_pixel(width, height, |x, y| {
            pixels += 1;
            if !self.canvas.is_valid(x, y)
                || distance
                    .get([y as usize, x as usize])
                    .is_none_or(|d| *d < buffer)
            {
                clear = false;
            }
        });
        clear && pixels >= MIN_SHAPE_PIXELS
    }
}
