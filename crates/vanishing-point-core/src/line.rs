//! Infinite-line operations on segments: clipping to the image rectangle and
//! pairwise intersection.

use crate::{ImageBounds, LineSegment};
use nalgebra::Point2;

/// Determinant magnitude below which two lines are treated as parallel.
pub const DEFAULT_PARALLEL_EPS: f64 = 1e-6;

/// |x2 - x1| below which a segment is treated as vertical.
pub const DEFAULT_VERTICAL_EPS: f64 = 1e-6;

/// Intersection of the infinite lines through `a` and `b`.
///
/// Returns `None` when the lines are parallel or coincident
/// (`|det| < parallel_eps`). Any other intersection is returned as is, even
/// far outside the image; range checks are left to the caller.
pub fn intersect_lines(a: &LineSegment, b: &LineSegment, parallel_eps: f64) -> Option<Point2<f64>> {
    let (x1, y1, x2, y2) = (a.start.x, a.start.y, a.end.x, a.end.y);
    let (x3, y3, x4, y4) = (b.start.x, b.start.y, b.end.x, b.end.y);

    let det = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if det.abs() < parallel_eps {
        return None;
    }

    // Parameter along `a`: p = a.start + t * (a.end - a.start).
    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / det;
    Some(Point2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
}

/// Extend the line through `segment` to the border of `bounds`.
///
/// Returns the two points where the line crosses the rectangle, picked in
/// the order left, right, top, bottom. Vertical lines map to `(x, 0)` and
/// `(x, H)`. When fewer than two crossings land on the border (the line
/// misses the rectangle or only grazes a corner numerically), the left and
/// right crossings are used directly, ordered to follow the segment's
/// horizontal direction.
pub fn extend_to_bounds(
    segment: &LineSegment,
    bounds: ImageBounds,
    vertical_eps: f64,
) -> LineSegment {
    let (x1, y1) = (segment.start.x, segment.start.y);
    let (x2, y2) = (segment.end.x, segment.end.y);
    let (w, h) = (bounds.width, bounds.height);

    if (x2 - x1).abs() < vertical_eps {
        return LineSegment::new(x1, 0.0, x1, h);
    }

    let slope = (y2 - y1) / (x2 - x1);
    let intercept = y1 - slope * x1;

    let y_at_left = intercept;
    let y_at_right = slope * w + intercept;
    // Horizontal lines give ±inf or NaN here, which fail the range checks.
    let x_at_top = -intercept / slope;
    let x_at_bottom = (h - intercept) / slope;

    let on_vertical_edge = |y: f64| (0.0..=h).contains(&y);
    let on_horizontal_edge = |x: f64| (0.0..=w).contains(&x);

    let mut border: Vec<Point2<f64>> = Vec::with_capacity(4);
    if on_vertical_edge(y_at_left) {
        border.push(Point2::new(0.0, y_at_left));
    }
    if on_vertical_edge(y_at_right) {
        border.push(Point2::new(w, y_at_right));
    }
    if on_horizontal_edge(x_at_top) {
        border.push(Point2::new(x_at_top, 0.0));
    }
    if on_horizontal_edge(x_at_bottom) {
        border.push(Point2::new(x_at_bottom, h));
    }

    if border.len() >= 2 {
        return LineSegment::from_points(border[0], border[1]);
    }

    let left = Point2::new(0.0, y_at_left);
    let right = Point2::new(w, y_at_right);
    if x2 - x1 > 0.0 {
        LineSegment::from_points(left, right)
    } else {
        LineSegment::from_points(right, left)
    }
}
