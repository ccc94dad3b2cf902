//! Core types and geometry for vanishing-point estimation.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete edge or line-segment detector, nor on an image
//! decoding library; detectors plug in through [`SegmentDetector`].

mod angle;
mod detector;
mod frame;
mod image;
mod line;
mod logger;
mod segment;
mod weight;

pub use angle::{fold_angle, is_near_horizontal};
pub use detector::{PrecomputedSegments, SegmentDetectionParams, SegmentDetector};
pub use frame::{ImageBounds, WorkingFrame, DEFAULT_MAX_WORKING_SIDE};
pub use image::GrayImageView;
pub use line::{extend_to_bounds, intersect_lines, DEFAULT_PARALLEL_EPS, DEFAULT_VERTICAL_EPS};
pub use segment::LineSegment;
pub use weight::{orientation_weight, pair_score, MAX_PAIR_SCORE};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
