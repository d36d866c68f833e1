//! Placement priority maps and candidate extraction
//!
//! Each tier scores every free pixel, then placement attempts draw from the
//! top-scoring fraction. Large tiers prefer open space away from existing
//! shapes with a mild pull toward the canvas center; small tiers prefer the
//! gaps right next to what is already placed.

use crate::io::configuration::{CENTER_BIAS_WEIGHT, MAX_CANDIDATE_STRIDE, TOP_CANDIDATE_FRACTION};
use ndarray::Array2;

/// Priority that rises toward the canvas center
///
/// Used directly for the very first shape of a run and as a bias term for
/// large tiers.
pub fn center_priority(width: u32, height: u32) -> Array2<f64> {
    let (rows, cols) = (height as usize, width as usize);
    let cx = (cols as f64 - 1.0) / 2.0;
    let cy = (rows as f64 - 1.0) / 2.0;
    let max_distance = cx.hypot(cy).max(1.0);
    Array2::from_shape_fn((rows, cols), |(row, col)| {
        1.0 - (col as f64 - cx).hypot(row as f64 - cy) / max_distance
    })
}

/// Open-space priority for large tiers
///
/// Scores free pixels by their distance to occupied pixels, normalized to
/// the field maximum, plus a center bias. Occupied pixels score zero.
pub fn open_space_priority(distance_field: &Array2<f64>, width: u32, height: u32) -> Array2<f64> {
    let max_distance = distance_field.iter().copied().fold(0.0_f64, f64::max).max(1.0);
    let center = center_priority(width, height);
    let mut priority = distance_field.mapv(|d| d / max_distance);
    priority.zip_mut_with(&center, |p, c| {
        if *p > 0.0 {
            *p += CENTER_BIAS_WEIGHT * c;
        }
    });
    priority
}

/// Gap-filling priority for small tiers
///
/// Free pixels close to occupied edges score highest; deep open space and
/// occupied pixels score low or zero.
pub fn gap_priority(distance_field: &Array2<f64>) -> Array2<f64> {
    distance_field.mapv(|d| if d > 0.0 { 1.0 / (1.0 + d) } else { 0.0 })
}

/// Subsampling stride for candidate extraction on large canvases
pub fn candidate_stride(width: u32, height: u32) -> usize {
    let pixels = width as usize * height as usize;
    ((pixels as f64 / 10_000.0).sqrt() as usize)
        .clamp(1, MAX_CANDIDATE_STRIDE)
}

/// Extract the top-scoring candidate cells from a priority map
///
/// Cells are subsampled by `stride`, sorted by score descending with a
/// positional tie-break for determinism, and truncated to the configured
/// top fraction. Zero-score cells are never candidates.
pub fn top_candidates(priority: &Array2<f64>, stride: usize) -> Vec<(u32, u32)> {
    let (rows, cols) = priority.dim();
    let stride = stride.max(1);
    let mut scored: Vec<(f64, u32, u32)> = Vec::new();
    for row in (0..rows).step_by(stride) {
        for col in (0..cols).step_by(stride) {
            let Some(&score) = priority.get([row, col]) else {
                continue;
            };
            if score > 0.0 {
                scored.push((score, col as u32, row as u32));
            }
        }
    }
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (a.2, a.1).cmp(&(b.2, b.1)))
    });

    let keep = ((scored.len() as f64 * TOP_CANDIDATE_FRACTION).ceil() as usize).max(1);
    scored.truncate(keep);
    scored.into_iter().map(|(_, x, y)| (x, y)).collect()
}
