//! Initial geometry for a curve editor, as read from page markup or JSON.

use crate::error::{FigureError, FigureResult};
use crate::path::CurvePath;
use crate::slider::{CurveSlider, ReferenceCurve, SliderTrack};
use crate::tangent::DEFAULT_STROKE_WIDTH;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Default path used by the interactive curve figure.
pub const DEFAULT_PATH: &str = "M 40 300 C 120 80 480 80 560 300";

/// Gap kept between a control point's circle and the viewport edge.
pub const DEFAULT_MARGIN: f64 = 4.0;

/// Construction parameters for a [`CurveEditor`](crate::CurveEditor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Natural viewport width (scale 1).
    pub width: f64,
    /// Natural viewport height (scale 1).
    pub height: f64,
    /// Rendered radius of each control point.
    pub point_radius: f64,
    pub margin: f64,
    /// Initial path description.
    pub path: String,
    /// Anchor of the first indicator line. Defaults to the path start.
    pub first_anchor: Option<Point>,
    /// Anchor of the second indicator line. Defaults to the path end.
    pub second_anchor: Option<Point>,
    pub line_stroke_width: f64,
    /// Stroke width of the curve itself at scale 1.
    pub curve_stroke_width: f64,
    pub slider: Option<SliderConfig>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            point_radius: 6.0,
            margin: DEFAULT_MARGIN,
            path: DEFAULT_PATH.to_string(),
            first_anchor: None,
            second_anchor: None,
            line_stroke_width: DEFAULT_STROKE_WIDTH,
            curve_stroke_width: DEFAULT_STROKE_WIDTH,
            slider: None,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> FigureResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> FigureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated natural viewport size.
    pub fn viewport(&self) -> FigureResult<Size> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(FigureError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(Size::new(self.width, self.height))
    }

    /// Parsed initial path.
    pub fn curve_path(&self) -> FigureResult<CurvePath> {
        CurvePath::parse(&self.path)
    }

    /// Add a slider with default geometry.
    pub fn with_slider(mut self) -> Self {
        self.slider = Some(SliderConfig::default());
        self
    }
}

/// Construction parameters for the curve slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub curve: ReferenceCurve,
    pub track: SliderTrack,
    pub knob_radius: f64,
    pub point_radius: f64,
    pub label_font_size: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            curve: ReferenceCurve::default(),
            track: SliderTrack::default(),
            knob_radius: CurveSlider::DEFAULT_KNOB_RADIUS,
            point_radius: CurveSlider::DEFAULT_POINT_RADIUS,
            label_font_size: CurveSlider::DEFAULT_LABEL_FONT_SIZE,
        }
    }
}

impl SliderConfig {
    /// Build the unscaled slider.
    pub fn build(&self) -> CurveSlider {
        let mut slider = CurveSlider::new(self.curve, self.track);
        slider.knob_radius = self.knob_radius;
        slider.point_radius = self.point_radius;
        slider.label_font_size = self.label_font_size;
        slider
    }
}
