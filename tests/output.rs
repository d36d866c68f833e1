//! Validates raster/vector parity and the end-to-end CLI pipeline

use clap::Parser;
use cubist::geometry::shape::{PlacedShape, Shape};
use cubist::io::cli::{Cli, FileProcessor};
use cubist::io::metrics::RunMetrics;
use cubist::render::{raster, vector};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

fn demo_stage(offset: f64) -> Vec<PlacedShape> {
    vec![
        PlacedShape {
            shape: Shape::Rect {
                x: offset,
                y: offset,
                width: 10.0,
                height: 8.0,
                rotation: 5.0,
            },
            fill: [200, 30, 30],
            size: 9.0,
        },
        PlacedShape {
            shape: Shape::Circle {
                cx: offset + 30.0,
                cy: offset + 20.0,
                radius: 6.0,
            },
            fill: [30, 200, 30],
            size: 10.0,
        },
    ]
}

#[test]
fn raster_and_vector_agree_on_shape_count() {
    let stages = vec![demo_stage(5.0), demo_stage(40.0)];
    let doc = vector::document(&stages, 100, 100, [255, 255, 255]).to_string();
    let element_count = doc.matches("<rect").count() + doc.matches("<circle").count()
        + doc.matches("<polygon").count();
    // One extra rect is the background.
    assert_eq!(element_count - 1, vector::shape_count(&stages));

    let flattened: Vec<PlacedShape> = stages.iter().flatten().cloned().collect();
    let image = raster::render(&flattened, 100, 100, [255, 255, 255]);
    // Every shape paints at least one pixel away from the background.
    let painted = image.pixels().filter(|p| p.0 != [255, 255, 255]).count();
    assert!(painted > 0);
}

#[test]
fn cli_pipeline_writes_all_three_outputs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scene.png");
    RgbaImage::from_pixel(64, 64, Rgba([90, 120, 150, 255]))
        .save(&input)
        .unwrap();

    let cli = Cli::parse_from([
        "cubist",
        input.to_str().unwrap(),
        "--geometry",
        "cascade",
        "-n",
        "12",
        "--stages",
        "2",
        "--quiet",
    ]);
    FileProcessor::new(cli).process().unwrap();

    let png = dir.path().join("scene_cubist.png");
    let svg = dir.path().join("scene_cubist.svg");
    let json = dir.path().join("scene_cubist.json");
    assert!(png.exists() && svg.exists() && json.exists());

    let metrics: RunMetrics =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(metrics.stages.len(), 2);
    assert_eq!(metrics.stages[0].geometry_mode, "cascade");
    assert_eq!(metrics.stages[0].seed, 42);
    assert_eq!(metrics.stages[1].seed, 43);
    let stage_total: usize = metrics.stages.iter().map(|s| s.svg_shape_count).sum();
    assert_eq!(metrics.totals.svg_shape_count, stage_total);

    // The SVG carries exactly the shapes the metrics claim.
    let svg_text = std::fs::read_to_string(&svg).unwrap();
    assert!(svg_text.contains("stage-1"));
    assert!(svg_text.contains("stage-2"));
}

#[test]
fn cli_skips_existing_outputs_by_default() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scene.png");
    RgbaImage::from_pixel(32, 32, Rgba([10, 10, 10, 255]))
        .save(&input)
        .unwrap();
    let existing = dir.path().join("scene_cubist.png");
    std::fs::write(&existing, b"sentinel").unwrap();

    let cli = Cli::parse_from(["cubist", input.to_str().unwrap(), "--quiet"]);
    FileProcessor::new(cli).process().unwrap();
    // The sentinel must survive because the file was skipped.
    assert_eq!(std::fs::read(&existing).unwrap(), b"sentinel");
}

#[test]
fn cli_delaunay_mode_tessellates_the_whole_canvas() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("flat.png");
    RgbaImage::from_pixel(80, 60, Rgba([200, 100, 50, 255]))
        .save(&input)
        .unwrap();

    let cli = Cli::parse_from([
        "cubist",
        input.to_str().unwrap(),
        "--geometry",
        "delaunay",
        "-p",
        "40",
        "--quiet",
    ]);
    FileProcessor::new(cli).process().unwrap();

    let json = dir.path().join("flat_cubist.json");
    let metrics: RunMetrics =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(metrics.stages.len(), 1);
    assert_eq!(metrics.stages[0].geometry_mode, "delaunay");
    assert_eq!(metrics.totals.requested_points, 40);
    assert_eq!(metrics.totals.points, 40);
    assert!(metrics.totals.svg_shape_count > 0);

    // On a fully opaque canvas the triangulation covers everything, so the
    // raster output should contain no background pixels.
    let rendered = image::open(dir.path().join("flat_cubist.png"))
        .unwrap()
        .to_rgb8();
    let background = rendered
        .pixels()
        .filter(|p| p.0 == [255, 255, 255])
        .count();
    assert_eq!(background, 0);
}

#[test]
fn sampling_shortfall_shows_in_metrics() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sparse.png");
    // A single opaque pixel; the rejection sampler exhausts its attempt
    // budget long before reaching the requested count.
    let mut source = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0]));
    source.put_pixel(10, 10, Rgba([200, 50, 50, 255]));
    source.save(&input).unwrap();

    let cli = Cli::parse_from([
        "cubist",
        input.to_str().unwrap(),
        "--geometry",
        "delaunay",
        "-p",
        "50",
        "--quiet",
    ]);
    FileProcessor::new(cli).process().unwrap();

    let json = dir.path().join("sparse_cubist.json");
    let metrics: RunMetrics =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(metrics.stages[0].requested_points, 50);
    assert!(metrics.stages[0].points < metrics.stages[0].requested_points);
    assert_eq!(metrics.totals.requested_points, 50);
    assert!(metrics.totals.points < metrics.totals.requested_points);
}

#[test]
fn cli_rejects_non_png_targets() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, b"not an image").unwrap();
    let cli = Cli::parse_from(["cubist", input.to_str().unwrap(), "--quiet"]);
    assert!(FileProcessor::new(cli).process().is_err());
}
