//! Translation of UI events into curve editor operations.

use figurekit_core::{CurveEditor, EditorConfig, FigureResult};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// A UI event forwarded to the curve figure.
///
/// Pointer coordinates are already local to the figure. Touch coordinates
/// are page coordinates and are corrected with the offset captured when the
/// touch started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FigureEvent {
    /// Pointer pressed on an element (a control point id or the slider knob).
    PointerDown { target: String },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// Touch started on an element; `offset_x`/`offset_y` locate the figure on the page.
    TouchStart {
        target: String,
        offset_x: f64,
        offset_y: f64,
    },
    TouchMove { page_x: f64, page_y: f64 },
    /// The figure's container changed width (resize or orientation change).
    Resize { container_width: f64 },
}

/// Element id of the slider knob.
pub const SLIDER_KNOB_ID: &str = "sliderKnob";

/// Handles events and translates them to editor operations.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    /// Page position of the figure, captured at touch start.
    page_offset: Vec2,
    /// The slider knob is being dragged.
    slider_grabbed: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_slider_grabbed(&self) -> bool {
        self.slider_grabbed
    }

    /// Apply an event. Returns whether the figure needs to be re-rendered.
    pub fn handle(&mut self, editor: &mut CurveEditor, event: &FigureEvent) -> bool {
        match event {
            FigureEvent::PointerDown { target } => {
                self.grab(editor, target);
                false
            }
            FigureEvent::TouchStart {
                target,
                offset_x,
                offset_y,
            } => {
                self.page_offset = Vec2::new(*offset_x, *offset_y);
                self.grab(editor, target);
                false
            }
            FigureEvent::PointerMove { x, y } => self.drag(editor, *x, *y),
            FigureEvent::TouchMove { page_x, page_y } => {
                self.drag(editor, page_x - self.page_offset.x, page_y - self.page_offset.y)
            }
            FigureEvent::PointerUp => {
                self.slider_grabbed = false;
                editor.deselect_point();
                false
            }
            FigureEvent::Resize { container_width } => {
                editor.fit_container(*container_width);
                true
            }
        }
    }

    fn grab(&mut self, editor: &mut CurveEditor, target: &str) {
        if target == SLIDER_KNOB_ID {
            editor.deselect_point();
            self.slider_grabbed = true;
        } else {
            self.slider_grabbed = false;
            editor.select_point_by_name(target);
        }
    }

    fn drag(&mut self, editor: &mut CurveEditor, x: f64, y: f64) -> bool {
        if self.slider_grabbed {
            editor.drag_slider_to(x);
            return editor.slider().is_some();
        }
        if editor.active_point().is_none() {
            return false;
        }
        editor.drag_to(x, y);
        true
    }
}

/// A recorded interaction session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub config: EditorConfig,
    #[serde(default)]
    pub events: Vec<FigureEvent>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> FigureResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the embedded config, e.g. with one loaded from its own file.
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the editor and feed it every event in order.
    pub fn replay(&self) -> FigureResult<CurveEditor> {
        let mut editor = CurveEditor::from_config(&self.config)?;
        let mut handler = EventHandler::new();
        for event in &self.events {
            handler.handle(&mut editor, event);
        }
        log::info!("Replayed {} events", self.events.len());
        Ok(editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figurekit_core::ControlPointId;
    use kurbo::Point;

    fn editor() -> CurveEditor {
        CurveEditor::from_config(&EditorConfig::default().with_slider()).unwrap()
    }

    #[test]
    fn test_pointer_drag_sequence() {
        let mut editor = editor();
        let mut handler = EventHandler::new();

        handler.handle(&mut editor, &FigureEvent::PointerDown { target: "ControlPoint2".into() });
        assert_eq!(editor.active_point(), Some(ControlPointId::Second));

        assert!(handler.handle(&mut editor, &FigureEvent::PointerMove { x: 300.0, y: 200.0 }));
        assert_eq!(
            editor.control_point(ControlPointId::Second).position,
            Point::new(300.0, 200.0)
        );

        handler.handle(&mut editor, &FigureEvent::PointerUp);
        assert_eq!(editor.active_point(), None);
        assert!(!handler.handle(&mut editor, &FigureEvent::PointerMove { x: 10.0, y: 10.0 }));
        assert_eq!(
            editor.control_point(ControlPointId::Second).position,
            Point::new(300.0, 200.0)
        );
    }

    #[test]
    fn test_touch_uses_page_offset() {
        let mut editor = editor();
        let mut handler = EventHandler::new();
        handler.handle(
            &mut editor,
            &FigureEvent::TouchStart {
                target: "ControlPoint1".into(),
                offset_x: 100.0,
                offset_y: 1000.0,
            },
        );
        handler.handle(&mut editor, &FigureEvent::TouchMove { page_x: 250.0, page_y: 1150.0 });
        assert_eq!(
            editor.control_point(ControlPointId::First).position,
            Point::new(150.0, 150.0)
        );
    }

    #[test]
    fn test_slider_grab() {
        let mut editor = editor();
        let mut handler = EventHandler::new();
        handler.handle(&mut editor, &FigureEvent::PointerDown { target: SLIDER_KNOB_ID.into() });
        assert!(handler.is_slider_grabbed());
        assert_eq!(editor.active_point(), None);

        assert!(handler.handle(&mut editor, &FigureEvent::PointerMove { x: 300.0, y: 0.0 }));
        assert_eq!(editor.slider_label(), Some("t = 0.50"));

        handler.handle(&mut editor, &FigureEvent::PointerUp);
        assert!(!handler.is_slider_grabbed());
    }

    #[test]
    fn test_unknown_target_is_ignored() {
        let mut editor = editor();
        let mut handler = EventHandler::new();
        let before = editor.snapshot();
        handler.handle(&mut editor, &FigureEvent::PointerDown { target: "curve".into() });
        assert!(!handler.handle(&mut editor, &FigureEvent::PointerMove { x: 50.0, y: 50.0 }));
        assert_eq!(editor.snapshot(), before);
    }

    #[test]
    fn test_resize() {
        let mut editor = editor();
        let mut handler = EventHandler::new();
        assert!(handler.handle(&mut editor, &FigureEvent::Resize { container_width: 450.0 }));
        assert!((editor.scale().factor - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_event_json() {
        let json = r#"{ "type": "pointer_move", "x": 1.5, "y": 2 }"#;
        let event: FigureEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, FigureEvent::PointerMove { x: 1.5, y: 2.0 });
    }

    #[test]
    fn test_replay_script() {
        let script = ReplayScript::from_json(
            r#"{
                "events": [
                    { "type": "pointer_down", "target": "first" },
                    { "type": "pointer_move", "x": 200, "y": 150 },
                    { "type": "pointer_up" },
                    { "type": "resize", "container_width": 300 }
                ]
            }"#,
        )
        .unwrap();
        let editor = script.replay().unwrap();
        assert_eq!(editor.path_description(), "M 40 300 C 200 150 480 80 560 300");
        assert!((editor.scale().factor - 0.5).abs() < 1e-12);
        assert_eq!(
            editor.control_point(ControlPointId::First).position,
            Point::new(100.0, 75.0)
        );
    }

    #[test]
    fn test_replay_with_separate_config() {
        let script = ReplayScript::from_json(
            r#"{
                "config": { "width": 999 },
                "events": [
                    { "type": "pointer_down", "target": "second" },
                    { "type": "pointer_move", "x": 1000, "y": 1000 }
                ]
            }"#,
        )
        .unwrap();
        let config = EditorConfig::from_json(r#"{ "width": 300, "height": 200 }"#).unwrap();
        let editor = script.with_config(config).replay().unwrap();

        // Clamped against the separate config's viewport, not the embedded one.
        assert!((editor.natural_size().width - 300.0).abs() < 1e-12);
        assert_eq!(
            editor.control_point(ControlPointId::Second).position,
            Point::new(290.0, 190.0)
        );
    }
}
