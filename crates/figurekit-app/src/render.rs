//! Attribute updates that bring the curve figure markup in line with the
//! editor state.
//!
//! The list is computed without touching the DOM so the browser binding only
//! has to apply it.

use figurekit_core::{ControlPointId, CurveEditor};

use crate::event_handler::SLIDER_KNOB_ID;

/// Element id of the cubic path.
pub const CURVE_ID: &str = "curve";
/// Element id of the point the slider picks on the reference curve.
pub const SLIDER_POINT_ID: &str = "sliderPoint";
/// Element id of the slider's parameter label.
pub const SLIDER_LABEL_ID: &str = "sliderLabel";

pub fn point_element_id(id: ControlPointId) -> &'static str {
    match id {
        ControlPointId::First => "ControlPoint1",
        ControlPointId::Second => "ControlPoint2",
    }
}

pub fn line_element_id(id: ControlPointId) -> String {
    format!("line{}", point_element_id(id))
}

/// One change to the figure markup.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Attribute {
        element: String,
        name: &'static str,
        value: String,
    },
    Text {
        element: String,
        text: String,
    },
}

impl RenderOp {
    fn attribute(element: &str, name: &'static str, value: impl ToString) -> Self {
        RenderOp::Attribute {
            element: element.to_string(),
            name,
            value: value.to_string(),
        }
    }

    pub fn element(&self) -> &str {
        match self {
            RenderOp::Attribute { element, .. } | RenderOp::Text { element, .. } => element,
        }
    }
}

/// Every update needed to draw `editor` into the figure `<svg id=svg_id>`.
///
/// All values are on-screen: the svg takes the scaled viewport, the curve is
/// written at the current scale and its stroke uses the half-scale.
pub fn render_ops(svg_id: &str, editor: &CurveEditor) -> Vec<RenderOp> {
    let viewport = editor.viewport();
    let mut ops = vec![
        RenderOp::attribute(svg_id, "width", viewport.width),
        RenderOp::attribute(svg_id, "height", viewport.height),
    ];

    for id in ControlPointId::ALL {
        let point = editor.control_point(id);
        let element = point_element_id(id);
        ops.push(RenderOp::attribute(element, "cx", point.position.x));
        ops.push(RenderOp::attribute(element, "cy", point.position.y));
        ops.push(RenderOp::attribute(element, "r", point.radius));

        let line = editor.tangent_line(id);
        let element = line_element_id(id);
        ops.push(RenderOp::attribute(&element, "x1", line.anchor.x));
        ops.push(RenderOp::attribute(&element, "y1", line.anchor.y));
        ops.push(RenderOp::attribute(&element, "x2", line.end().x));
        ops.push(RenderOp::attribute(&element, "y2", line.end().y));
        ops.push(RenderOp::attribute(&element, "stroke-width", line.stroke_width));
    }

    ops.push(RenderOp::attribute(CURVE_ID, "d", editor.screen_path_description()));
    ops.push(RenderOp::attribute(CURVE_ID, "stroke-width", editor.curve_stroke_width()));

    if let Some(slider) = editor.slider() {
        ops.push(RenderOp::attribute(SLIDER_KNOB_ID, "cx", slider.knob.x));
        ops.push(RenderOp::attribute(SLIDER_KNOB_ID, "cy", slider.knob.y));
        ops.push(RenderOp::attribute(SLIDER_KNOB_ID, "r", slider.knob_radius));
        ops.push(RenderOp::attribute(SLIDER_POINT_ID, "cx", slider.point.x));
        ops.push(RenderOp::attribute(SLIDER_POINT_ID, "cy", slider.point.y));
        ops.push(RenderOp::attribute(SLIDER_POINT_ID, "r", slider.point_radius));
        ops.push(RenderOp::Text {
            element: SLIDER_LABEL_ID.to_string(),
            text: slider.label.clone(),
        });
        ops.push(RenderOp::attribute(SLIDER_LABEL_ID, "font-size", slider.label_font_size));
    }
    ops
}
