use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A straight line segment in image pixel coordinates.
///
/// The two endpoints also define the infinite line used for extension and
/// intersection. Serialized as a flat `[x1, y1, x2, y2]` array, which is the
/// layout most segment detectors emit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct LineSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl LineSegment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point2::new(x1, y1),
            end: Point2::new(x2, y2),
        }
    }

    pub fn from_points(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    /// Direction vector `end - start` (not normalized).
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// True when all four coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.start.x.is_finite()
            && self.start.y.is_finite()
            && self.end.x.is_finite()
            && self.end.y.is_finite()
    }

    /// Uniformly scale both endpoints about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            start: Point2::from(self.start.coords * factor),
            end: Point2::from(self.end.coords * factor),
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }
}

impl From<[f64; 4]> for LineSegment {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<LineSegment> for [f64; 4] {
    fn from(s: LineSegment) -> Self {
        s.to_array()
    }
}
