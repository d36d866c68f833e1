//! Command-line interface for batch tessellation of PNG images

use crate::cascade::engine::{CascadeConfig, CascadeEngine};
use crate::cascade::occupancy::OccupancyMask;
use crate::geometry::canvas::Canvas;
use crate::geometry::registry::{GeometryMode, PrimitiveKind};
use crate::geometry::shape::{PlacedShape, Shape};
use crate::geometry::{delaunay, rectangles, voronoi};
use crate::io::configuration::{
    DEFAULT_POINT_COUNT, DEFAULT_SEED, DEFAULT_STAGES, DEFAULT_TARGET_SHAPES, METRICS_EXTENSION,
    OUTPUT_SUFFIX, VECTOR_EXTENSION,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_png, load_canvas};
use crate::io::metrics::{MetricsSink, RunMetrics, StageMetrics};
use crate::io::progress::ProgressManager;
use crate::render::{color, raster, vector};
use crate::sampler::{self, SampleMode};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

/// Background color behind the placed shapes
const BACKGROUND: [u8; 3] = [255, 255, 255];

#[derive(Parser)]
#[command(name = "cubist")]
#[command(
    author,
    version,
    about = "Generate cubist tessellation art from raster images"
)]
/// Command-line arguments for the tessellation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of points to sample for tessellation modes
    #[arg(short, long, default_value_t = DEFAULT_POINT_COUNT)]
    pub points: usize,

    /// Number of shapes a cascade run aims for
    #[arg(short = 'n', long, default_value_t = DEFAULT_TARGET_SHAPES)]
    pub shapes: usize,

    /// Tessellation strategy
    #[arg(short, long, value_enum, default_value = "cascade")]
    pub geometry: GeometryMode,

    /// Primitive family placed by cascade runs
    #[arg(long, value_enum, default_value = "rectangle")]
    pub primitive: PrimitiveKind,

    /// Point distribution for tessellation modes
    #[arg(long, value_enum, default_value = "uniform")]
    pub sampling: SampleMode,

    /// Number of cascade stages sharing one occupancy mask
    #[arg(long, default_value_t = DEFAULT_STAGES)]
    pub stages: usize,

    /// Grayscale mask restricting the valid region
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Use randomized split packing instead of a regular rectangle grid
    #[arg(long)]
    pub packed: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }
}

/// Feeds engine placement events into the progress display
struct ProgressSink<'a> {
    progress: &'a mut ProgressManager,
    file_index: usize,
    already_placed: usize,
}

impl MetricsSink for ProgressSink<'_> {
    fn shape_committed(&mut self, placed: usize, _size: f64) {
        self.progress
            .update_placed(self.file_index, self.already_placed + placed);
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = ProgressManager::new(cli.quiet);
        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        if self.cli.stages == 0 {
            return Err(invalid_parameter("stages", &0, &"must be at least 1"));
        }
        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(());
        }

        self.progress_manager.initialize(files.len());
        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }
        self.progress_manager.finish();
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }
        if Self::output_path(input_path, "png").exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let canvas = load_canvas(input_path, self.cli.mask.as_deref())?;
        let target = if self.cli.geometry == GeometryMode::Cascade {
            self.cli.shapes
        } else {
            self.cli.points
        };
        self.progress_manager.start_file(index, input_path, target);

        let (stages, metrics) = self.generate(&canvas, index)?;

        let flattened: Vec<PlacedShape> = stages.iter().flatten().cloned().collect();
        let rendered = raster::render(&flattened, canvas.width(), canvas.height(), BACKGROUND);
        export_png(&Self::output_path(input_path, "png"), &rendered)?;

        let doc = vector::document(&stages, canvas.width(), canvas.height(), BACKGROUND);
        vector::save(&Self::output_path(input_path, VECTOR_EXTENSION), &doc)?;

        metrics.save(&Self::output_path(input_path, METRICS_EXTENSION))?;

        self.progress_manager.complete_file(index);
        Ok(())
    }

    /// Produce per-stage shape lists and the matching metrics record
    fn generate(&mut self, canvas: &Canvas, index: usize) -> Result<(Vec<Vec<PlacedShape>>, RunMetrics)> {
        let mut metrics = RunMetrics::default();
        let mut stages = Vec::new();

        if self.cli.geometry == GeometryMode::Cascade {
            let mut mask = OccupancyMask::new(canvas.width(), canvas.height());
            let stage_count = self.cli.stages;
            let mut placed_so_far = 0;
            for stage in 1..=stage_count {
                let stage_seed = self.cli.seed + (stage - 1) as u64;
                let mut target = self.cli.shapes / stage_count;
                if stage == 1 {
                    target += self.cli.shapes % stage_count;
                }

                let engine = CascadeEngine::new(
                    canvas,
                    CascadeConfig {
                        target_count: target,
                        primitive: self.cli.primitive,
                        ..CascadeConfig::default()
                    },
                );
                let mut rng = StdRng::seed_from_u64(stage_seed);
                let mut sink = ProgressSink {
                    progress: &mut self.progress_manager,
                    file_index: index,
                    already_placed: placed_so_far,
                };
                let outcome = engine.run(&mut mask, &mut rng, &mut sink)?;
                placed_so_far += outcome.placed;

                metrics.record_stage(StageMetrics {
                    stage,
                    geometry_mode: GeometryMode::Cascade.label().to_owned(),
                    requested_points: 0,
                    points: 0,
                    svg_shape_count: outcome.shapes.len(),
                    seed: stage_seed,
                });
                stages.push(outcome.shapes);
            }
        } else {
            let (shapes, requested, sampled) = self.tessellate(canvas)?;
            self.progress_manager.update_placed(index, sampled);
            metrics.record_stage(StageMetrics {
                stage: 1,
                geometry_mode: self.cli.geometry.label().to_owned(),
                requested_points: requested,
                points: sampled,
                svg_shape_count: shapes.len(),
                seed: self.cli.seed,
            });
            stages.push(shapes);
        }
        Ok((stages, metrics))
    }

    /// Build a single-stage tessellation for the non-cascade modes
    ///
    /// Returns the placed shapes plus the requested and actually sampled
    /// point counts; sampling may fall short on heavily masked images.
    fn tessellate(&self, canvas: &Canvas) -> Result<(Vec<PlacedShape>, usize, usize)> {
        let (width, height) = (canvas.width(), canvas.height());
        let mut requested = 0;
        let mut sampled = 0;
        let shapes: Vec<Shape> = match self.cli.geometry {
            GeometryMode::Delaunay => {
                let mut points = sampler::sample(canvas, self.cli.points, self.cli.seed, self.cli.sampling);
                requested = self.cli.points;
                sampled = points.len();
                sampler::append_corners(&mut points, width, height);
                delaunay::triangulate(&points)
            }
            GeometryMode::Voronoi => {
                let mut points = sampler::sample(canvas, self.cli.points, self.cli.seed, self.cli.sampling);
                requested = self.cli.points;
                sampled = points.len();
                sampler::append_corners(&mut points, width, height);
                voronoi::partition(&points, f64::from(width), f64::from(height))
            }
            GeometryMode::Rectangles => {
                if self.cli.packed {
                    rectangles::split(f64::from(width), f64::from(height), self.cli.points, self.cli.seed)
                } else {
                    rectangles::grid(f64::from(width), f64::from(height), self.cli.points)
                }
            }
            GeometryMode::Cascade => {
                return Err(invalid_parameter(
                    "geometry",
                    &"cascade",
                    &"cascade runs do not tessellate from points",
                ));
            }
        };

        let placed = shapes
            .into_iter()
            .map(|shape| {
                let fill = color::sample_color(canvas, &shape);
                let size = shape.size_metric();
                PlacedShape { shape, fill, size }
            })
            .collect();
        Ok((placed, requested, sampled))
    }

    /// Sibling output path with the run suffix and the given extension
    fn output_path(input_path: &Path, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.{}", stem.to_string_lossy(), OUTPUT_SUFFIX, extension);
        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_keeps_parent_and_adds_suffix() {
        let path = FileProcessor::output_path(Path::new("/tmp/images/cat.png"), "svg");
        assert_eq!(path, Path::new("/tmp/images/cat_cubist.svg"));
    }

    #[test]
    fn output_path_without_parent() {
        let path = FileProcessor::output_path(Path::new("cat.png"), "json");
        assert_eq!(path, Path::new("cat_cubist.json"));
    }
}
