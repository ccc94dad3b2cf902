//! Greedy online clustering of intersection votes.
//!
//! Each cluster keeps the first point it received as its representative and
//! is never re-centered. A new vote goes to the first cluster (in insertion
//! order) whose representative lies strictly within the radius, even if a
//! later cluster is closer. The outcome therefore depends on vote order.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A representative point with its accumulated vote weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedCluster {
    pub representative: Point2<f64>,
    pub weight: u64,
    /// Number of votes merged into this cluster, including the first one.
    pub votes: usize,
}

/// What [`ClusterAccumulator::add`] did with a vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterUpdate {
    Created(usize),
    Merged(usize),
}

/// Growing, insertion-ordered list of weighted clusters.
#[derive(Clone, Debug)]
pub struct ClusterAccumulator {
    radius: f64,
    clusters: Vec<WeightedCluster>,
}

impl ClusterAccumulator {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            clusters: Vec::new(),
        }
    }

    /// Add a vote of `score` at `point`.
    pub fn add(&mut self, point: Point2<f64>, score: u32) -> ClusterUpdate {
        let hit = self
            .clusters
            .iter()
            .position(|c| (c.representative - point).norm() < self.radius);

        match hit {
            Some(idx) => {
                let c = &mut self.clusters[idx];
                c.weight += u64::from(score);
                c.votes += 1;
                ClusterUpdate::Merged(idx)
            }
            None => {
                self.clusters.push(WeightedCluster {
                    representative: point,
                    weight: u64::from(score),
                    votes: 1,
                });
                ClusterUpdate::Created(self.clusters.len() - 1)
            }
        }
    }

    /// Heaviest cluster; ties keep the earliest one.
    pub fn best(&self) -> Option<&WeightedCluster> {
        let mut best: Option<&WeightedCluster> = None;
        for c in &self.clusters {
            match best {
                Some(b) if c.weight <= b.weight => {}
                _ => best = Some(c),
            }
        }
        best
    }

    pub fn clusters(&self) -> &[WeightedCluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn into_clusters(self) -> Vec<WeightedCluster> {
        self.clusters
    }
}
