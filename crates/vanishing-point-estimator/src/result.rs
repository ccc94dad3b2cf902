use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use vanishing_point_core::{ImageBounds, LineSegment};

use crate::WeightedCluster;

/// The winning cluster: its representative point and accumulated weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VanishingPoint {
    pub position: Point2<f64>,
    pub weight: u64,
}

impl From<&WeightedCluster> for VanishingPoint {
    fn from(c: &WeightedCluster) -> Self {
        Self {
            position: c.representative,
            weight: c.weight,
        }
    }
}

/// Where each considered segment pair ended up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairStats {
    pub pairs_considered: usize,
    pub skipped_near_horizontal: usize,
    pub skipped_parallel: usize,
    pub skipped_out_of_window: usize,
    pub accepted: usize,
}

/// Output of one estimator pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VanishingPointResult {
    /// `None` when no pair produced an admissible intersection.
    pub vanishing_point: Option<VanishingPoint>,
    /// Every input segment extended to the image border, in input order.
    pub extended_lines: Vec<LineSegment>,
    pub clusters: Vec<WeightedCluster>,
    pub stats: PairStats,
    pub bounds: ImageBounds,
}

impl VanishingPointResult {
    pub fn is_found(&self) -> bool {
        self.vanishing_point.is_some()
    }
}
