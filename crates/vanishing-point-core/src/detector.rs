//! Seam for the external line-segment detector.
//!
//! Edge detection and probabilistic Hough segment extraction are provided by
//! an image-processing library outside this workspace. The estimator only
//! sees their output, a list of [`LineSegment`]s on the working image.

use crate::{GrayImageView, LineSegment};
use serde::{Deserialize, Serialize};

/// Produces line segments from a grayscale working image.
pub trait SegmentDetector {
    fn detect(&self, image: &GrayImageView<'_>) -> Vec<LineSegment>;
}

/// Detector stand-in that returns a fixed, already detected segment list.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedSegments {
    pub segments: Vec<LineSegment>,
}

impl PrecomputedSegments {
    pub fn new(segments: Vec<LineSegment>) -> Self {
        Self { segments }
    }
}

impl SegmentDetector for PrecomputedSegments {
    fn detect(&self, _image: &GrayImageView<'_>) -> Vec<LineSegment> {
        self.segments.clone()
    }
}

/// Tuning knobs handed to the external Canny + probabilistic Hough detector.
///
/// The estimator never reads these; they travel with the configuration and
/// the report so a run can be reproduced.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SegmentDetectionParams {
    /// Canny hysteresis low threshold.
    pub canny_low: f64,
    /// Canny hysteresis high threshold.
    pub canny_high: f64,
    /// Sobel aperture size used by Canny.
    pub canny_aperture: u32,
    /// Distance resolution of the accumulator, pixels.
    pub rho_px: f64,
    /// Angle resolution of the accumulator, degrees.
    pub theta_deg: f64,
    /// Minimal accumulator votes for a line.
    pub vote_threshold: u32,
    /// Minimal segment length, pixels.
    pub min_length_px: f64,
    /// Maximal gap between collinear points joined into one segment, pixels.
    pub max_gap_px: f64,
}

impl SegmentDetectionParams {
    /// Preset for fine-line imagery such as paintings.
    pub fn fine_art() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            canny_aperture: 3,
            rho_px: 1.0,
            theta_deg: 1.0,
            vote_threshold: 75,
            min_length_px: 75.0,
            max_gap_px: 7.0,
        }
    }

    /// Preset for noisier landscape photographs: fewer, longer segments.
    pub fn landscape() -> Self {
        Self {
            vote_threshold: 200,
            min_length_px: 100.0,
            max_gap_px: 5.0,
            ..Self::fine_art()
        }
    }
}

impl Default for SegmentDetectionParams {
    fn default() -> Self {
        Self::fine_art()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precomputed_detector_returns_its_segments() {
        let segs = vec![
            LineSegment::new(0.0, 0.0, 10.0, 10.0),
            LineSegment::new(5.0, 0.0, 5.0, 9.0),
        ];
        let det = PrecomputedSegments::new(segs.clone());
        let pixels = [0u8; 16 * 16];
        let view = GrayImageView {
            width: 16,
            height: 16,
            data: &pixels,
        };
        assert_eq!(det.detect(&view), segs);
    }

    #[test]
    fn landscape_preset_only_changes_hough_knobs() {
        let fine = SegmentDetectionParams::fine_art();
        let land = SegmentDetectionParams::landscape();
        assert_eq!(fine, SegmentDetectionParams::default());
        assert_eq!(land.canny_low, fine.canny_low);
        assert_eq!(land.canny_high, fine.canny_high);
        assert_eq!(land.vote_threshold, 200);
        assert_eq!(land.min_length_px, 100.0);
        assert_eq!(land.max_gap_px, 5.0);
    }
}
