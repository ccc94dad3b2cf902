//! High-level facade crate for the `vanishing-point-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the core geometry and the estimator
//! - (feature-gated) end-to-end helpers that load an image with the `image`
//!   crate, downscale it to the working frame, run a line-segment detector
//!   and vote for the dominant vanishing point.
//!
//! ## Quickstart
//!
//! ```no_run
//! use vanishing_point::detect;
//! use vanishing_point::{LineSegment, PrecomputedSegments, VanishingPointParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Segments from your favourite Canny + Hough implementation.
//! let detector = PrecomputedSegments::new(vec![
//!     LineSegment::new(400.0, 400.0, 300.0, 300.0),
//!     LineSegment::new(600.0, 400.0, 700.0, 300.0),
//! ]);
//! let run = detect::detect_vanishing_point_in_file(
//!     "painting.jpg",
//!     &detector,
//!     VanishingPointParams::default(),
//!     Some(1000.0),
//! )?;
//! match run.source_vanishing_point() {
//!     Some(p) => println!("vanishing point at ({:.1}, {:.1})", p.x, p.y),
//!     None => println!("no vanishing point found"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `vanishing_point::core`: segments, fold-angles, pair weights, line
//!   extension and intersection, working frame, detector seam, logging.
//! - `vanishing_point::estimator`: cluster accumulator, estimator, JSON
//!   config and report.
//! - `vanishing_point::detect` (feature `image`): end-to-end helpers from
//!   image files or raw grayscale buffers.

pub use vanishing_point_core as core;
pub use vanishing_point_estimator as estimator;

pub use vanishing_point_core::{
    ImageBounds, LineSegment, PrecomputedSegments, SegmentDetectionParams, SegmentDetector,
    WorkingFrame,
};
pub use vanishing_point_estimator::{
    EstimateError, VanishingPoint, VanishingPointEstimator, VanishingPointParams,
    VanishingPointResult,
};

#[cfg(feature = "image")]
pub mod detect;
