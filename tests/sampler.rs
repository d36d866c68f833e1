//! Validates sampler determinism, mask confinement, and Poisson spacing

use cubist::geometry::canvas::Canvas;
use cubist::sampler::{self, SampleMode, poisson};
use ndarray::{Array2, Array3};

/// Canvas whose valid region is a small square inside a large image
fn masked_canvas(size: u32, region: std::ops::Range<u32>) -> Canvas {
    let rgb = Array3::zeros((size as usize, size as usize, 3));
    let mut valid = Array2::from_elem((size as usize, size as usize), false);
    for y in region.clone() {
        for x in region.clone() {
            valid[[y as usize, x as usize]] = true;
        }
    }
    Canvas::new(size, size, rgb, valid).unwrap()
}

#[test]
fn uniform_sampling_respects_the_mask() {
    let canvas = masked_canvas(1_000, 100..110);
    let points = sampler::sample(&canvas, 5_000, 42, SampleMode::Uniform);
    // The valid region is 0.01% of the canvas, so rejection sampling falls
    // far short of the request. What it returns must lie in the region.
    assert!(points.len() < 5_000);
    for p in &points {
        assert!(p.x >= 100.0 && p.x < 110.0);
        assert!(p.y >= 100.0 && p.y < 110.0);
    }
}

#[test]
fn poisson_sampling_respects_the_mask() {
    let canvas = masked_canvas(400, 50..150);
    let points = poisson::sample(&canvas, 200, 9, Some(10.0));
    assert!(!points.is_empty());
    for p in &points {
        assert!(p.x >= 50.0 && p.x < 150.0);
        assert!(p.y >= 50.0 && p.y < 150.0);
    }
}

#[test]
fn poisson_spacing_holds_across_the_whole_set() {
    let canvas = Canvas::solid(300, 300, [0, 0, 0]).unwrap();
    let points = poisson::sample(&canvas, 500, 4, Some(12.0));
    assert!(points.len() > 50);
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            assert!((a.x - b.x).hypot(a.y - b.y) >= 12.0 - 1e-9);
        }
    }
}

#[test]
fn both_modes_are_deterministic_for_a_seed() {
    let canvas = Canvas::solid(200, 150, [0, 0, 0]).unwrap();
    for mode in [SampleMode::Uniform, SampleMode::Poisson] {
        let a = sampler::sample(&canvas, 80, 31, mode);
        let b = sampler::sample(&canvas, 80, 31, mode);
        assert_eq!(a, b);
        let c = sampler::sample(&canvas, 80, 32, mode);
        assert_ne!(a, c);
    }
}

#[test]
fn corner_append_is_stable() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    sampler::append_corners(&mut first, 640, 480);
    sampler::append_corners(&mut second, 640, 480);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}
