//! Segment orientation utilities.
//!
//! Lines are undirected, so the orientation is folded into [0, π/2]: 0 is
//! horizontal and π/2 vertical, regardless of which endpoint comes first.

use crate::LineSegment;
use std::f64::consts::{FRAC_PI_2, PI};

/// Fold-angle of a segment in [0, π/2].
#[inline]
pub fn fold_angle(segment: &LineSegment) -> f64 {
    let d = segment.direction();
    let a = d.y.atan2(d.x).abs();
    if a > FRAC_PI_2 {
        PI - a
    } else {
        a
    }
}

/// Near-horizontal test used to drop unreliable segments.
///
/// The comparison is strict: a fold-angle exactly equal to `min_angle` is
/// kept.
#[inline]
pub fn is_near_horizontal(fold: f64, min_angle: f64) -> bool {
    fold < min_angle
}
