//! Interactive cubic curve editor.
//!
//! Two draggable control points are bound to a single cubic path. Each point
//! carries an indicator line from a fixed anchor, and an optional slider
//! picks points on a separate reference curve.
//!
//! Control points, indicator lines and the slider live in on-screen space
//! (model space multiplied by the current scale). The path itself is kept in
//! model space.

use crate::config::EditorConfig;
use crate::error::FigureResult;
use crate::path::CurvePath;
use crate::scale::{Rescale, ScaleStep, ViewportScale, factor_for_container};
use crate::slider::CurveSlider;
use crate::tangent::TangentLine;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Identity of a draggable control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPointId {
    First,
    Second,
}

impl ControlPointId {
    pub const ALL: [ControlPointId; 2] = [ControlPointId::First, ControlPointId::Second];

    /// Resolve a point name.
    ///
    /// Accepts `"first"` / `"second"` and element ids whose trailing digit
    /// names the point (`"ControlPoint1"`, `"ControlPoint2"`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "first" => return Some(ControlPointId::First),
            "second" => return Some(ControlPointId::Second),
            _ => {}
        }
        match name.chars().last()? {
            '1' => Some(ControlPointId::First),
            '2' => Some(ControlPointId::Second),
            _ => None,
        }
    }

    /// Index into per-point arrays.
    pub fn index(self) -> usize {
        match self {
            ControlPointId::First => 0,
            ControlPointId::Second => 1,
        }
    }

    /// Slot of the cubic path written by this point.
    pub fn slot(self) -> usize {
        self.index() + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            ControlPointId::First => "first",
            ControlPointId::Second => "second",
        }
    }
}

/// A draggable control point (on-screen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub id: ControlPointId,
    pub position: Point,
    pub radius: f64,
}

impl Rescale for ControlPoint {
    fn rescale_by(&mut self, step: ScaleStep) {
        self.position = step.point(self.position);
        self.radius *= step.size;
    }
}

/// Clamp one axis so a circle of `radius` plus `margin` stays inside `[0, extent]`.
///
/// When the viewport is too small for the circle the upper bound wins.
fn clamp_axis(value: f64, radius: f64, margin: f64, extent: f64) -> f64 {
    let lo = radius + margin;
    let hi = extent - radius - margin;
    value.max(lo).min(hi)
}

/// State of the curve editor.
#[derive(Debug, Clone)]
pub struct CurveEditor {
    points: [ControlPoint; 2],
    lines: [TangentLine; 2],
    path: CurvePath,
    /// Curve stroke width (on-screen).
    curve_stroke_width: f64,
    slider: Option<CurveSlider>,
    /// Viewport extent (on-screen).
    viewport: Size,
    margin: f64,
    scale: ViewportScale,
    active: Option<ControlPointId>,
}

impl CurveEditor {
    /// Build an editor from its initial geometry at scale 1.
    pub fn from_config(config: &EditorConfig) -> FigureResult<Self> {
        let viewport = config.viewport()?;
        let path = config.curve_path()?;
        let anchors = [
            config.first_anchor.unwrap_or(path.start()),
            config.second_anchor.unwrap_or(path.end()),
        ];

        let points = ControlPointId::ALL.map(|id| ControlPoint {
            id,
            position: path.control(id),
            radius: config.point_radius,
        });
        let lines = ControlPointId::ALL.map(|id| {
            let point = points[id.index()];
            TangentLine::new(anchors[id.index()], point.position, point.radius)
                .with_stroke_width(config.line_stroke_width)
        });

        Ok(Self {
            points,
            lines,
            path,
            curve_stroke_width: config.curve_stroke_width,
            slider: config.slider.as_ref().map(|s| s.build()),
            viewport,
            margin: config.margin,
            scale: ViewportScale::default(),
            active: None,
        })
    }

    /// Mark a point as the target of subsequent drags.
    pub fn select_point(&mut self, id: ControlPointId) {
        log::debug!("Selected {} control point", id.name());
        self.active = Some(id);
    }

    /// Select by name; unknown names clear the selection.
    pub fn select_point_by_name(&mut self, name: &str) {
        match ControlPointId::parse(name) {
            Some(id) => self.select_point(id),
            None => {
                log::debug!("Ignoring selection of unknown point {:?}", name);
                self.deselect_point();
            }
        }
    }

    /// Clear the active point. Drags become no-ops.
    pub fn deselect_point(&mut self) {
        self.active = None;
    }

    pub fn active_point(&self) -> Option<ControlPointId> {
        self.active
    }

    /// Move the active point to on-screen coordinates.
    ///
    /// Coordinates are clamped so the point's circle stays inside the
    /// viewport. The indicator line and the owning path slot follow.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        let Some(id) = self.active else {
            return;
        };
        let i = id.index();
        let radius = self.points[i].radius;
        let position = Point::new(
            clamp_axis(x, radius, self.margin, self.viewport.width),
            clamp_axis(y, radius, self.margin, self.viewport.height),
        );

        self.points[i].position = position;
        self.lines[i].follow(position, radius);
        self.path
            .set_control(id, self.scale.undo_step().point(position));
    }

    /// Move the slider knob to an on-screen x. No-op without a slider.
    pub fn drag_slider_to(&mut self, x: f64) {
        if let Some(slider) = &mut self.slider {
            slider.drag_to(x, self.scale);
        }
    }

    /// Rescale all on-screen geometry to a new factor.
    ///
    /// The previous factor is removed first, so repeating a call with the
    /// same factor leaves geometry where it was.
    pub fn rescale(&mut self, factor: f64) {
        if !ViewportScale::is_valid_factor(factor) {
            log::warn!("Ignoring invalid scale factor {}", factor);
            return;
        }
        log::debug!("Rescaling from {} to {}", self.scale.factor, factor);
        self.rescale_by(self.scale.undo_step());
        self.scale = ViewportScale::new(factor);
        self.rescale_by(self.scale.apply_step());
    }

    /// Rescale to fit a container of the given width.
    ///
    /// A container without a usable width leaves the current factor alone.
    pub fn fit_container(&mut self, container_width: f64) {
        match factor_for_container(container_width, self.natural_size().width) {
            Some(factor) => self.rescale(factor),
            None => log::debug!(
                "Keeping scale {} for container width {}",
                self.scale.factor,
                container_width
            ),
        }
    }

    pub fn control_point(&self, id: ControlPointId) -> &ControlPoint {
        &self.points[id.index()]
    }

    pub fn tangent_line(&self, id: ControlPointId) -> &TangentLine {
        &self.lines[id.index()]
    }

    pub fn path(&self) -> &CurvePath {
        &self.path
    }

    /// Path description in model space.
    pub fn path_description(&self) -> String {
        self.path.to_svg()
    }

    /// Path description at the current scale, matching the on-screen
    /// control points.
    pub fn screen_path_description(&self) -> String {
        self.path.scaled(self.scale.factor).to_svg()
    }

    /// On-screen stroke width of the curve.
    pub fn curve_stroke_width(&self) -> f64 {
        self.curve_stroke_width
    }

    pub fn slider(&self) -> Option<&CurveSlider> {
        self.slider.as_ref()
    }

    /// Current slider label, if a slider is configured.
    pub fn slider_label(&self) -> Option<&str> {
        self.slider.as_ref().map(|s| s.label.as_str())
    }

    pub fn scale(&self) -> ViewportScale {
        self.scale
    }

    /// On-screen viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Viewport size at scale 1.
    pub fn natural_size(&self) -> Size {
        self.scale.undo_step().extent(self.viewport)
    }

    /// Plain data for the presentation layer.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            points: self.points.to_vec(),
            lines: self.lines.to_vec(),
            path: self.path_description(),
            screen_path: self.screen_path_description(),
            curve_stroke_width: self.curve_stroke_width,
            slider: self.slider.clone(),
            viewport: self.viewport,
            scale: self.scale.factor,
            active: self.active,
        }
    }
}

impl Rescale for CurveEditor {
    fn rescale_by(&mut self, step: ScaleStep) {
        for point in &mut self.points {
            point.rescale_by(step);
        }
        for (line, point) in self.lines.iter_mut().zip(&self.points) {
            line.rescale_by(step);
            line.follow(point.position, point.radius);
        }
        self.curve_stroke_width *= step.size;
        if let Some(slider) = &mut self.slider {
            slider.rescale_by(step);
        }
        self.viewport = step.extent(self.viewport);
    }
}

/// Everything the presentation layer needs to render the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub points: Vec<ControlPoint>,
    pub lines: Vec<TangentLine>,
    /// Path description (model space).
    pub path: String,
    /// Path description (on-screen).
    pub screen_path: String,
    pub curve_stroke_width: f64,
    pub slider: Option<CurveSlider>,
    pub viewport: Size,
    pub scale: f64,
    pub active: Option<ControlPointId>,
}
