//! Indicator lines drawn from a fixed anchor towards each control point.

use crate::scale::{Rescale, ScaleStep};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default stroke width of an indicator line.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Angle of the indicator as seen from the anchor.
///
/// This is the direction from the anchor to the moved point, not the curve
/// derivative. A point sitting on the anchor gives angle 0.
pub fn anchor_direction_angle(anchor: Point, point: Point) -> f64 {
    let ratio = (anchor.x - point.x) / (anchor.y - point.y);
    if ratio.is_nan() { 0.0 } else { ratio.atan() }
}

/// Endpoint of the indicator, `length` away from `point` and pointing away
/// from the anchor.
pub fn anchor_direction(anchor: Point, point: Point, length: f64) -> Point {
    let angle = anchor_direction_angle(anchor, point);
    let sign = if point.y > anchor.y { -1.0 } else { 1.0 };
    Point::new(
        point.x + length * angle.sin() * sign,
        point.y + length * angle.cos() * sign,
    )
}

/// A segment from a fixed anchor to a derived endpoint.
///
/// The endpoint is never stored on its own: the line keeps the point it
/// follows and the indicator length, and `end` is always
/// `anchor_direction(anchor, target, length)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentLine {
    /// Fixed anchor (on-screen).
    pub anchor: Point,
    /// Point the indicator follows (on-screen).
    target: Point,
    /// Indicator length past the followed point (on-screen).
    length: f64,
    /// Derived endpoint (on-screen).
    end: Point,
    pub stroke_width: f64,
}

impl TangentLine {
    /// Create a line anchored at `anchor` following `target` with an
    /// indicator of the given length.
    pub fn new(anchor: Point, target: Point, length: f64) -> Self {
        Self {
            anchor,
            target,
            length,
            end: anchor_direction(anchor, target, length),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Recompute the endpoint for a control point at `point` with the given
    /// on-screen radius.
    pub fn follow(&mut self, point: Point, radius: f64) {
        self.target = point;
        self.length = radius;
        self.end = anchor_direction(self.anchor, point, radius);
    }
}

impl Rescale for TangentLine {
    // Positions take the full factor while the length follows the point's
    // radius (half-scale), so the endpoint is re-derived rather than scaled.
    fn rescale_by(&mut self, step: ScaleStep) {
        self.anchor = step.point(self.anchor);
        self.stroke_width *= step.size;
        self.follow(step.point(self.target), self.length * step.size);
    }
}
