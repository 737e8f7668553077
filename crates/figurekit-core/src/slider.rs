//! A slider whose knob position picks a point on a fixed reference cubic.

use crate::scale::{Rescale, ScaleStep, ViewportScale};
use kurbo::{CubicBez, Point};
use serde::{Deserialize, Serialize};

/// A fixed cubic, independent of the draggable control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl Default for ReferenceCurve {
    fn default() -> Self {
        Self {
            start: Point::new(190.0, 80.0),
            control1: Point::new(-30.0, 350.0),
            control2: Point::new(450.0, -20.0),
            end: Point::new(420.0, 250.0),
        }
    }
}

impl ReferenceCurve {
    /// Evaluate the curve at `t` in model space.
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * t * mt * mt;
        let c = 3.0 * t * t * mt;
        let d = t * t * t;
        Point::new(
            self.start.x * a + self.control1.x * b + self.control2.x * c + self.end.x * d,
            self.start.y * a + self.control1.y * b + self.control2.y * c + self.end.y * d,
        )
    }

    /// Get as a kurbo cubic.
    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(self.start, self.control1, self.control2, self.end)
    }
}

/// Horizontal track the knob moves along, in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderTrack {
    pub min_x: f64,
    pub max_x: f64,
    pub y: f64,
}

impl Default for SliderTrack {
    fn default() -> Self {
        Self {
            min_x: 40.0,
            max_x: 560.0,
            y: 370.0,
        }
    }
}

impl SliderTrack {
    /// Map an on-screen x onto the curve parameter and the clamped x.
    pub fn parameter(&self, x: f64, scale: f64) -> (f64, f64) {
        let lo = self.min_x * scale;
        let hi = self.max_x * scale;
        let clamped = x.max(lo).min(hi);
        let span = (self.max_x - self.min_x) * scale;
        if span <= 0.0 {
            return (0.0, lo);
        }
        ((clamped - lo) / span, clamped)
    }
}

/// Format the parameter label shown next to the knob.
pub fn parameter_label(t: f64) -> String {
    format!("t = {:.2}", t)
}

/// Slider state: the knob on the track and the picked point on the curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSlider {
    pub curve: ReferenceCurve,
    pub track: SliderTrack,
    /// Knob center (on-screen).
    pub knob: Point,
    /// Point on the reference curve (on-screen).
    pub point: Point,
    pub knob_radius: f64,
    pub point_radius: f64,
    pub label_font_size: f64,
    pub t: f64,
    pub label: String,
}

impl CurveSlider {
    pub const DEFAULT_KNOB_RADIUS: f64 = 8.0;
    pub const DEFAULT_POINT_RADIUS: f64 = 5.0;
    pub const DEFAULT_LABEL_FONT_SIZE: f64 = 14.0;

    /// Create a slider with the knob at `t = 0`, unscaled.
    pub fn new(curve: ReferenceCurve, track: SliderTrack) -> Self {
        Self {
            curve,
            track,
            knob: Point::new(track.min_x, track.y),
            point: curve.start,
            knob_radius: Self::DEFAULT_KNOB_RADIUS,
            point_radius: Self::DEFAULT_POINT_RADIUS,
            label_font_size: Self::DEFAULT_LABEL_FONT_SIZE,
            t: 0.0,
            label: parameter_label(0.0),
        }
    }

    /// Move the knob to an on-screen x and update the picked point.
    pub fn drag_to(&mut self, x: f64, scale: ViewportScale) {
        let s = scale.factor;
        let (t, knob_x) = self.track.parameter(x, s);
        let p = self.curve.eval(t);
        self.t = t;
        self.knob = Point::new(knob_x, self.track.y * s);
        self.point = Point::new(p.x * s, p.y * s);
        self.label = parameter_label(t);
    }
}

impl Rescale for CurveSlider {
    fn rescale_by(&mut self, step: ScaleStep) {
        self.knob = step.point(self.knob);
        self.point = step.point(self.point);
        self.knob_radius *= step.size;
        self.point_radius *= step.size;
        self.label_font_size *= step.size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::ParamCurve;

    #[test]
    fn test_eval_midpoint_closed_form() {
        let curve = ReferenceCurve::default();
        let p = curve.eval(0.5);
        let s = curve.start;
        let c1 = curve.control1;
        let c2 = curve.control2;
        let e = curve.end;
        let x = 0.125 * s.x + 0.375 * c1.x + 0.375 * c2.x + 0.125 * e.x;
        let y = 0.125 * s.y + 0.375 * c1.y + 0.375 * c2.y + 0.125 * e.y;
        assert!((p.x - x).abs() < 1e-9);
        assert!((p.y - y).abs() < 1e-9);
        assert!((p.x - 233.75).abs() < 1e-9);
        assert!((p.y - 165.0).abs() < 1e-9);
    }

    #[test]
    fn test_eval_matches_kurbo() {
        let curve = ReferenceCurve::default();
        let cubic = curve.to_cubic();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let ours = curve.eval(t);
            let theirs = cubic.eval(t);
            assert!((ours.x - theirs.x).abs() < 1e-9);
            assert!((ours.y - theirs.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_drag_to_ends() {
        let mut slider = CurveSlider::new(ReferenceCurve::default(), SliderTrack::default());
        let scale = ViewportScale::new(0.5);

        slider.drag_to(slider.track.min_x * 0.5, scale);
        assert!(slider.t.abs() < f64::EPSILON);
        assert!((slider.point.x - 95.0).abs() < 1e-9);
        assert!((slider.point.y - 40.0).abs() < 1e-9);
        assert_eq!(slider.label, "t = 0.00");

        slider.drag_to(slider.track.max_x * 0.5, scale);
        assert!((slider.t - 1.0).abs() < f64::EPSILON);
        assert!((slider.point.x - 210.0).abs() < 1e-9);
        assert!((slider.point.y - 125.0).abs() < 1e-9);
        assert_eq!(slider.label, "t = 1.00");
    }

    #[test]
    fn test_drag_to_clamps() {
        let mut slider = CurveSlider::new(ReferenceCurve::default(), SliderTrack::default());
        slider.drag_to(-500.0, ViewportScale::default());
        assert!(slider.t.abs() < f64::EPSILON);
        assert!((slider.knob.x - 40.0).abs() < f64::EPSILON);

        slider.drag_to(5000.0, ViewportScale::default());
        assert!((slider.t - 1.0).abs() < f64::EPSILON);
        assert!((slider.knob.x - 560.0).abs() < f64::EPSILON);
        assert!((slider.knob.y - 370.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_label_rounds_to_two_decimals() {
        let mut slider = CurveSlider::new(ReferenceCurve::default(), SliderTrack::default());
        // 40 + 0.5 * 520 = 300
        slider.drag_to(300.0, ViewportScale::default());
        assert_eq!(slider.label, "t = 0.50");
        assert_eq!(parameter_label(0.333), "t = 0.33");
    }

    #[test]
    fn test_zero_width_track() {
        let track = SliderTrack { min_x: 100.0, max_x: 100.0, y: 10.0 };
        let (t, x) = track.parameter(250.0, 1.0);
        assert!(t.abs() < f64::EPSILON);
        assert!((x - 100.0).abs() < f64::EPSILON);
    }
}
