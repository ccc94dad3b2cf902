//! Heuristic vote weight for a pair of segments.
//!
//! Each fold-angle gets a triangular weight that peaks at 45° and drops
//! linearly to zero at 0° and 90°. The pair score is the product of both
//! weights scaled to an integer in `0..=100`.

use std::f64::consts::FRAC_PI_4;

/// Score of a pair whose segments both sit exactly at 45°.
pub const MAX_PAIR_SCORE: u32 = 100;

/// Triangular weight in [0, 1] for a fold-angle in [0, π/2].
#[inline]
pub fn orientation_weight(fold: f64) -> f64 {
    (1.0 - (fold - FRAC_PI_4).abs() / FRAC_PI_4).clamp(0.0, 1.0)
}

/// Integer vote for a segment pair: `floor(100 * w1 * w2)`.
#[inline]
pub fn pair_score(fold_a: f64, fold_b: f64) -> u32 {
    let s = MAX_PAIR_SCORE as f64 * orientation_weight(fold_a) * orientation_weight(fold_b);
    s.floor() as u32
}
