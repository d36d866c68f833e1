//! Generation constants and runtime configuration defaults

// Cascade placement tuning
/// Number of size tiers between the maximum and minimum shape size
pub const SIZE_STEPS: usize = 25;
/// Fraction of the priority map kept as placement candidates
pub const TOP_CANDIDATE_FRACTION: f64 = 0.15;
/// Buffer around existing shapes as a fraction of the tier size
pub const BUFFER_RATIO: f64 = 0.25;
/// Minimum buffer in pixels regardless of tier size
pub const MIN_BUFFER_PIXELS: f64 = 2.0;
/// Tiers above this fraction of the maximum size use open-space priority
pub const LARGE_TIER_THRESHOLD: f64 = 0.5;
/// Smallest footprint accepted for a committed shape
pub const MIN_SHAPE_PIXELS: usize = 10;
/// Multiplier applied to per-tier shape budgets to bound placement attempts
pub const ATTEMPT_MULTIPLIER: usize = 3;
/// Weight pulling large-tier candidates toward the canvas center
pub const CENTER_BIAS_WEIGHT: f64 = 0.3;
/// Stride cap when subsampling candidate cells from the priority map
pub const MAX_CANDIDATE_STRIDE: usize = 4;

// Shape size bounds relative to canvas dimensions
/// Maximum shape size as a fraction of the shorter canvas dimension
pub const MAX_SIZE_FRACTION: f64 = 0.25;
/// Divisor of the shorter canvas dimension for the minimum shape size
pub const MIN_SIZE_DIVISOR: f64 = 60.0;
/// Absolute floor for the minimum shape size in pixels
pub const MIN_SIZE_FLOOR: f64 = 8.0;

// Point sampling
/// Rejection sampling attempts allowed per requested point
pub const SAMPLE_ATTEMPTS_PER_POINT: usize = 20;
/// Candidate darts thrown around each active Poisson-disk point
pub const POISSON_CANDIDATES: usize = 30;
/// Default Poisson-disk radius as a fraction of the canvas diagonal
pub const POISSON_RADIUS_FRACTION: f64 = 0.025;

// Rectangle split packing
/// Lower bound of the randomized split position
pub const SPLIT_FRACTION_MIN: f64 = 0.33;
/// Upper bound of the randomized split position
pub const SPLIT_FRACTION_MAX: f64 = 0.67;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default number of sampled points per image
pub const DEFAULT_POINT_COUNT: usize = 200;
/// Default number of shapes targeted by a cascade run
pub const DEFAULT_TARGET_SHAPES: usize = 150;
/// Default number of cascade stages per image
pub const DEFAULT_STAGES: usize = 1;

// Output settings
/// Suffix added to raster output filenames
pub const OUTPUT_SUFFIX: &str = "_cubist";
/// Extension of the vector output
pub const VECTOR_EXTENSION: &str = "svg";
/// Extension of the metrics output
pub const METRICS_EXTENSION: &str = "json";
