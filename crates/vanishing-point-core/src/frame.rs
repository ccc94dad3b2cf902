//! Image rectangles and the downscaled working frame.
//!
//! Segment detection and vanishing-point voting run on a working copy of the
//! image whose longer side is capped (1000 px by default). Pixel-valued
//! tolerances such as the cluster radius are therefore expressed in working
//! pixels; [`WorkingFrame`] maps results back to the source image.

use crate::LineSegment;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Default cap on the longer side of the working image, in pixels.
pub const DEFAULT_MAX_WORKING_SIDE: f64 = 1000.0;

/// Axis-aligned image rectangle `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: f64,
    pub height: f64,
}

impl ImageBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64)
    }

    /// Both sides finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Membership in the rectangle grown by `margin` times its size on every
    /// side, i.e. `x ∈ [-m·W, (1+m)·W]` and `y ∈ [-m·H, (1+m)·H]`.
    pub fn contains_with_margin(&self, p: &Point2<f64>, margin: f64) -> bool {
        let mx = margin * self.width;
        let my = margin * self.height;
        p.x >= -mx && p.x <= self.width + mx && p.y >= -my && p.y <= self.height + my
    }
}

/// Mapping between a source image and its downscaled working copy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkingFrame {
    pub source: ImageBounds,
    pub working: ImageBounds,
    /// Working pixels per source pixel (`<= 1`).
    pub scale: f64,
}

impl WorkingFrame {
    /// Frame that works directly on the source resolution.
    pub fn identity(source: ImageBounds) -> Self {
        Self {
            source,
            working: source,
            scale: 1.0,
        }
    }

    /// Downscale so that neither side exceeds `max_side`.
    ///
    /// Images already within the limit keep scale 1. Working sides are
    /// rounded to whole pixels, never below one. Returns `None` unless
    /// `max_side` is finite and at least one pixel.
    pub fn fit(source: ImageBounds, max_side: f64) -> Option<Self> {
        if !max_side.is_finite() || max_side < 1.0 {
            return None;
        }
        if source.width <= max_side && source.height <= max_side {
            return Some(Self::identity(source));
        }
        let scale = (max_side / source.width).min(max_side / source.height);
        Some(Self {
            source,
            working: ImageBounds::new(
                (source.width * scale).round().max(1.0),
                (source.height * scale).round().max(1.0),
            ),
            scale,
        })
    }

    #[inline]
    pub fn to_working(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::from(p.coords * self.scale)
    }

    #[inline]
    pub fn to_source(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::from(p.coords / self.scale)
    }

    pub fn segment_to_working(&self, s: &LineSegment) -> LineSegment {
        s.scaled(self.scale)
    }
}
