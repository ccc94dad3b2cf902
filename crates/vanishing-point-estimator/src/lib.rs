//! Dominant vanishing-point estimator built on top of `vanishing-point-core`.
//!
//! ## Quickstart
//!
//! ```
//! use vanishing_point_core::{ImageBounds, LineSegment};
//! use vanishing_point_estimator::{VanishingPointEstimator, VanishingPointParams};
//!
//! let segments = vec![
//!     LineSegment::new(400.0, 400.0, 300.0, 300.0),
//!     LineSegment::new(600.0, 400.0, 700.0, 300.0),
//!     LineSegment::new(440.0, 420.0, 380.0, 340.0),
//! ];
//! let estimator = VanishingPointEstimator::new(VanishingPointParams::default());
//! let result = estimator
//!     .estimate(&segments, ImageBounds::new(1000.0, 1000.0))
//!     .expect("valid input");
//! match result.vanishing_point {
//!     Some(vp) => println!("vp at ({:.1}, {:.1}) weight {}", vp.position.x, vp.position.y, vp.weight),
//!     None => println!("no vanishing point found"),
//! }
//! ```
//!
//! Algorithm:
//! 1. Extend every segment to the image border (for drawing only).
//! 2. For each unordered pair `i < j`, drop the pair if either segment is
//!    near-horizontal (fold-angle below 10°).
//! 3. Intersect the two infinite lines; parallel pairs are skipped.
//! 4. Discard intersections outside the plausibility window
//!    `[-W, 2W] x [-H, 2H]`.
//! 5. Score the pair (triangular weight peaking at 45°) and vote into the
//!    greedy cluster accumulator (first cluster within 10 px wins).
//! 6. Report the heaviest cluster, or "no vanishing point" when nothing
//!    voted.

mod cluster;
mod error;
mod estimator;
pub mod io;
mod params;
mod result;

pub use cluster::{ClusterAccumulator, ClusterUpdate, WeightedCluster};
pub use error::EstimateError;
pub use estimator::VanishingPointEstimator;
pub use params::VanishingPointParams;
pub use result::{PairStats, VanishingPoint, VanishingPointResult};
