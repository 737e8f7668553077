//! Viewport scaling for figures embedded in a resizable container.
//!
//! Positions follow the container at the full factor `f`. Radii, stroke
//! widths and font sizes follow the half-scale `(1 + f) / 2` so small
//! elements stay legible when the figure shrinks.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Factor of a figure that has not been fitted to a container yet.
pub const DEFAULT_FACTOR: f64 = 1.0;

/// The half-scale applied to radii, stroke widths and font sizes.
pub fn half_scale(factor: f64) -> f64 {
    (1.0 + factor) / 2.0
}

/// Scale factor for a container of the given width.
///
/// Figures shrink with narrow containers but never grow past their
/// natural width. Returns `None` when the container has no usable width
/// (hidden or collapsed), in which case the figure keeps its current factor.
pub fn factor_for_container(container_width: f64, natural_width: f64) -> Option<f64> {
    if !container_width.is_finite() || container_width <= 0.0 || natural_width <= 0.0 {
        return None;
    }
    Some((container_width / natural_width).min(1.0))
}

/// The current scale factor of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportScale {
    /// Full factor applied to positions.
    pub factor: f64,
}

impl Default for ViewportScale {
    fn default() -> Self {
        Self {
            factor: DEFAULT_FACTOR,
        }
    }
}

impl ViewportScale {
    /// Create a scale with the given factor.
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Half-scale for sizes.
    pub fn half(&self) -> f64 {
        half_scale(self.factor)
    }

    /// Step that applies this scale to unscaled geometry.
    pub fn apply_step(&self) -> ScaleStep {
        ScaleStep::apply(self.factor)
    }

    /// Step that removes this scale from scaled geometry.
    pub fn undo_step(&self) -> ScaleStep {
        ScaleStep::undo(self.factor)
    }

    /// Check whether a factor can be used as a scale.
    pub fn is_valid_factor(factor: f64) -> bool {
        factor.is_finite() && factor > 0.0
    }
}

/// A multiplicative rescale step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleStep {
    /// Multiplier for positions.
    pub position: f64,
    /// Multiplier for radii, stroke widths and font sizes.
    pub size: f64,
}

impl ScaleStep {
    /// The step that scales by `factor`.
    pub fn apply(factor: f64) -> Self {
        Self {
            position: factor,
            size: half_scale(factor),
        }
    }

    /// The inverse of [`ScaleStep::apply`] for the same factor.
    pub fn undo(factor: f64) -> Self {
        Self {
            position: 1.0 / factor,
            size: 1.0 / half_scale(factor),
        }
    }

    /// Scale a position.
    pub fn point(&self, p: Point) -> Point {
        Point::new(p.x * self.position, p.y * self.position)
    }

    /// Scale a viewport size (a position extent, not a stroke size).
    pub fn extent(&self, s: Size) -> Size {
        Size::new(s.width * self.position, s.height * self.position)
    }
}

/// Geometry that follows the viewport scale.
pub trait Rescale {
    /// Multiply all on-screen attributes by the given step.
    fn rescale_by(&mut self, step: ScaleStep);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_scale() {
        assert!((half_scale(1.0) - 1.0).abs() < f64::EPSILON);
        assert!((half_scale(0.5) - 0.75).abs() < f64::EPSILON);
        assert!((half_scale(0.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_undo_inverts_apply() {
        let p = Point::new(123.0, -45.5);
        let step = ScaleStep::apply(0.37);
        let back = ScaleStep::undo(0.37).point(step.point(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);

        let size = 6.0 * step.size * ScaleStep::undo(0.37).size;
        assert!((size - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_factor_for_container() {
        assert_eq!(factor_for_container(300.0, 600.0), Some(0.5));
        assert_eq!(factor_for_container(1200.0, 600.0), Some(1.0));
        assert_eq!(factor_for_container(0.0, 600.0), None);
        assert_eq!(factor_for_container(-20.0, 600.0), None);
        assert_eq!(factor_for_container(f64::NAN, 600.0), None);
        assert_eq!(factor_for_container(300.0, 0.0), None);
    }

    #[test]
    fn test_valid_factor() {
        assert!(ViewportScale::is_valid_factor(0.25));
        assert!(!ViewportScale::is_valid_factor(0.0));
        assert!(!ViewportScale::is_valid_factor(-1.0));
        assert!(!ViewportScale::is_valid_factor(f64::INFINITY));
    }

    #[test]
    fn test_extent_uses_position_factor() {
        let s = ScaleStep::apply(0.5).extent(Size::new(600.0, 400.0));
        assert!((s.width - 300.0).abs() < f64::EPSILON);
        assert!((s.height - 200.0).abs() < f64::EPSILON);
    }
}
