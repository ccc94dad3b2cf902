use serde::{Deserialize, Serialize};
use vanishing_point_core::{DEFAULT_PARALLEL_EPS, DEFAULT_VERTICAL_EPS};

use crate::EstimateError;

/// Parameters of the pairwise voting estimator.
///
/// Pixel quantities are in working-image pixels.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VanishingPointParams {
    /// Segments whose fold-angle is below this (degrees) never vote.
    pub min_fold_angle_deg: f64,
    /// A candidate joins the first cluster whose representative is closer
    /// than this radius.
    pub cluster_radius_px: f64,
    /// Intersections must lie in `[-m·W, (1+m)·W] x [-m·H, (1+m)·H]`.
    pub plausibility_margin: f64,
    /// Determinant magnitude below which two lines count as parallel.
    pub parallel_eps: f64,
    /// Horizontal extent below which a segment is extended as vertical.
    pub vertical_eps: f64,
}

impl Default for VanishingPointParams {
    fn default() -> Self {
        Self {
            min_fold_angle_deg: 10.0,
            cluster_radius_px: 10.0,
            plausibility_margin: 1.0,
            parallel_eps: DEFAULT_PARALLEL_EPS,
            vertical_eps: DEFAULT_VERTICAL_EPS,
        }
    }
}

impl VanishingPointParams {
    #[inline]
    pub fn min_fold_angle(&self) -> f64 {
        self.min_fold_angle_deg.to_radians()
    }

    /// Reject values that would silently disable voting or clustering.
    ///
    /// The fold-angle threshold must lie in `[0, 90]`, the cluster radius
    /// must be positive, and the margin and tolerances non-negative. NaN and
    /// infinities are rejected everywhere.
    pub fn validate(&self) -> Result<(), EstimateError> {
        let checks = [
            (
                "min_fold_angle_deg",
                self.min_fold_angle_deg,
                (0.0..=90.0).contains(&self.min_fold_angle_deg),
            ),
            (
                "cluster_radius_px",
                self.cluster_radius_px,
                self.cluster_radius_px > 0.0,
            ),
            (
                "plausibility_margin",
                self.plausibility_margin,
                self.plausibility_margin >= 0.0,
            ),
            ("parallel_eps", self.parallel_eps, self.parallel_eps >= 0.0),
            ("vertical_eps", self.vertical_eps, self.vertical_eps >= 0.0),
        ];
        for (name, value, in_range) in checks {
            if !value.is_finite() || !in_range {
                return Err(EstimateError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
