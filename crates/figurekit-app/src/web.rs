//! WebAssembly entry point and DOM bindings.

use std::cell::RefCell;
use std::rc::Rc;

use figurekit_core::animation::{
    Figure, is_paused_class, replay_classes, reveal_visible, unpause_class,
};
use figurekit_core::editor::ControlPointId;
use figurekit_core::error::parse_number;
use figurekit_core::matrix::{Matrix, Operand, hover_cell};
use figurekit_core::modal::{IGNORED_CLASS, MODAL_CLASS, ModalMarker, ViewOutline, ViewTree};
use figurekit_core::walkthrough::{
    PathFlavor, Walkthrough, flavor_classes, hint_text as walkthrough_hint,
};
use figurekit_core::{CurveEditor, EditorConfig, FigureError, SliderConfig};
use kurbo::Point;
use serde::Serialize;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, TouchEvent};

use crate::event_handler::{EventHandler, FigureEvent, SLIDER_KNOB_ID};
use crate::render::{CURVE_ID, RenderOp, line_element_id, point_element_id, render_ops};

/// Attribute on the figure holding a JSON [`EditorConfig`].
const CONFIG_ATTRIBUTE: &str = "data-config";
/// Class of the views in an accessibility layout.
const VIEW_CLASS: &str = "view";
/// Class of the entries in an accessibility view hierarchy.
const HIERARCHY_CLASS: &str = "viewHeirarchy";

fn to_js(e: FigureError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize logging and panic reporting.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"FigureKit logger already initialized".into());
    }
    log::info!("FigureKit loaded");
}

/// A curve editor driven from JavaScript.
#[wasm_bindgen]
pub struct FigureKit {
    editor: CurveEditor,
    handler: EventHandler,
}

#[wasm_bindgen]
impl FigureKit {
    /// Create an editor. `config` is an optional [`EditorConfig`] object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FigureKit, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Self::from_config(&config).map_err(to_js)
    }

    pub fn select_point(&mut self, name: &str) {
        self.editor.select_point_by_name(name);
    }

    pub fn deselect_point(&mut self) {
        self.editor.deselect_point();
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        self.editor.drag_to(x, y);
    }

    pub fn drag_slider_to(&mut self, x: f64) {
        self.editor.drag_slider_to(x);
    }

    pub fn rescale(&mut self, factor: f64) {
        self.editor.rescale(factor);
    }

    pub fn fit_container(&mut self, container_width: f64) {
        self.editor.fit_container(container_width);
    }

    pub fn path_description(&self) -> String {
        self.editor.path_description()
    }

    pub fn slider_label(&self) -> Option<String> {
        self.editor.slider_label().map(str::to_string)
    }

    /// Current render state as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.editor.snapshot())?)
    }

    /// Apply a [`FigureEvent`] object. Returns whether a re-render is needed.
    pub fn handle_event(&mut self, event: JsValue) -> Result<bool, JsValue> {
        let event: FigureEvent = serde_wasm_bindgen::from_value(event)?;
        Ok(self.apply(&event))
    }
}

impl FigureKit {
    fn from_config(config: &EditorConfig) -> Result<Self, FigureError> {
        Ok(Self {
            editor: CurveEditor::from_config(config)?,
            handler: EventHandler::new(),
        })
    }

    fn apply(&mut self, event: &FigureEvent) -> bool {
        self.handler.handle(&mut self.editor, event)
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))
}

fn number_attribute(element: &Element, name: &str) -> Result<f64, JsValue> {
    let value = element
        .get_attribute(name)
        .ok_or_else(|| JsValue::from_str(&format!("Missing attribute {}", name)))?;
    parse_number(&value).map_err(to_js)
}

/// Read the editor's initial geometry from the figure markup.
fn read_config(document: &Document, svg: &Element) -> Result<EditorConfig, JsValue> {
    if let Some(json) = svg.get_attribute(CONFIG_ATTRIBUTE) {
        return EditorConfig::from_json(&json).map_err(to_js);
    }

    let first = element(document, point_element_id(ControlPointId::First))?;
    let curve = element(document, CURVE_ID)?;
    let anchor = |id: ControlPointId| -> Result<Option<Point>, JsValue> {
        match document.get_element_by_id(&line_element_id(id)) {
            Some(line) => Ok(Some(Point::new(
                number_attribute(&line, "x1")?,
                number_attribute(&line, "y1")?,
            ))),
            None => Ok(None),
        }
    };

    let defaults = EditorConfig::default();
    let curve_stroke_width = match curve.get_attribute("stroke-width") {
        Some(value) => parse_number(&value).map_err(to_js)?,
        None => defaults.curve_stroke_width,
    };

    Ok(EditorConfig {
        width: number_attribute(svg, "width")?,
        height: number_attribute(svg, "height")?,
        point_radius: number_attribute(&first, "r")?,
        path: curve
            .get_attribute("d")
            .ok_or_else(|| JsValue::from_str("Missing path description"))?,
        first_anchor: anchor(ControlPointId::First)?,
        second_anchor: anchor(ControlPointId::Second)?,
        curve_stroke_width,
        slider: document
            .get_element_by_id(SLIDER_KNOB_ID)
            .map(|_| SliderConfig::default()),
        ..defaults
    })
}

/// Write the editor state back into the figure markup.
fn render(document: &Document, svg_id: &str, editor: &CurveEditor) -> Result<(), JsValue> {
    for op in render_ops(svg_id, editor) {
        let Some(el) = document.get_element_by_id(op.element()) else {
            continue;
        };
        match op {
            RenderOp::Attribute { name, value, .. } => el.set_attribute(name, &value)?,
            RenderOp::Text { text, .. } => el.set_text_content(Some(&text)),
        }
    }
    Ok(())
}

fn listen<E>(target: &EventTarget, name: &str, handler: impl FnMut(E) + 'static) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], in the capture phase.
fn listen_capture<E>(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback_and_bool(name, closure.as_ref().unchecked_ref(), true)?;
    closure.forget();
    Ok(())
}

/// A curve editor bound to one figure on the page.
#[derive(Clone)]
struct BoundFigure {
    kit: Rc<RefCell<FigureKit>>,
    document: Document,
    svg_id: Rc<str>,
}

impl BoundFigure {
    fn dispatch(&self, event: FigureEvent) {
        let mut kit = self.kit.borrow_mut();
        if kit.apply(&event) {
            if let Err(e) = render(&self.document, &self.svg_id, &kit.editor) {
                log::warn!("Failed to render curve figure: {:?}", e);
            }
        }
    }
}

/// Page position of the figure's top-left corner.
fn page_offset(svg: &Element) -> (f64, f64) {
    let rect = svg.get_bounding_client_rect();
    let (scroll_x, scroll_y) = web_sys::window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0));
    (rect.left() + scroll_x, rect.top() + scroll_y)
}

fn container_width(svg: &Element) -> f64 {
    svg.parent_element()
        .map(|p| p.client_width() as f64)
        .unwrap_or(0.0)
}

/// Attach a curve editor to the figure `<svg id=svg_id>` on the page.
#[wasm_bindgen]
pub fn bind_curve_editor(svg_id: &str) -> Result<(), JsValue> {
    let document = document()?;
    let svg = element(&document, svg_id)?;
    let config = read_config(&document, &svg)?;
    let figure = BoundFigure {
        kit: Rc::new(RefCell::new(FigureKit::from_config(&config).map_err(to_js)?)),
        document: document.clone(),
        svg_id: Rc::from(svg_id),
    };
    log::info!("Bound curve editor to #{}", svg_id);

    let mut grab_targets: Vec<String> = ControlPointId::ALL
        .iter()
        .map(|id| point_element_id(*id).to_string())
        .collect();
    grab_targets.push(SLIDER_KNOB_ID.to_string());

    for target_id in grab_targets {
        let Some(target) = document.get_element_by_id(&target_id) else {
            continue;
        };
        {
            let (figure, target_id) = (figure.clone(), target_id.clone());
            listen(&target, "mousedown", move |_: MouseEvent| {
                figure.dispatch(FigureEvent::PointerDown { target: target_id.clone() });
            })?;
        }
        {
            let (figure, svg) = (figure.clone(), svg.clone());
            listen(&target, "touchstart", move |_: TouchEvent| {
                let (offset_x, offset_y) = page_offset(&svg);
                figure.dispatch(FigureEvent::TouchStart {
                    target: target_id.clone(),
                    offset_x,
                    offset_y,
                });
            })?;
        }
    }

    {
        let figure = figure.clone();
        listen(&svg, "mousemove", move |e: MouseEvent| {
            figure.dispatch(FigureEvent::PointerMove {
                x: e.offset_x() as f64,
                y: e.offset_y() as f64,
            });
        })?;
    }
    {
        let figure = figure.clone();
        listen(&svg, "touchmove", move |e: TouchEvent| {
            let Some(touch) = e.touches().get(0) else {
                return;
            };
            e.prevent_default();
            figure.dispatch(FigureEvent::TouchMove {
                page_x: touch.page_x() as f64,
                page_y: touch.page_y() as f64,
            });
        })?;
    }
    for name in ["mouseup", "touchend"] {
        let figure = figure.clone();
        listen(&document, name, move |_: web_sys::Event| {
            figure.dispatch(FigureEvent::PointerUp);
        })?;
    }

    if let Some(window) = web_sys::window() {
        for name in ["resize", "orientationchange"] {
            let (figure, svg) = (figure.clone(), svg.clone());
            listen(&window, name, move |_: web_sys::Event| {
                figure.dispatch(FigureEvent::Resize {
                    container_width: container_width(&svg),
                });
            })?;
        }
    }

    figure.dispatch(FigureEvent::Resize {
        container_width: container_width(&svg),
    });
    Ok(())
}

/// Whether the page runs on a touch device.
fn is_touch_device() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("ontouchstart")).unwrap_or(false))
        .unwrap_or(false)
}

/// Instruction shown above code walkthroughs.
#[wasm_bindgen]
pub fn hint_text() -> String {
    walkthrough_hint(is_touch_device()).to_string()
}

/// Render state of a walkthrough with `step_count` steps while the element
/// `hovered_id` is hovered (or none).
#[wasm_bindgen]
pub fn walkthrough_frame(step_count: usize, hovered_id: Option<String>) -> Result<JsValue, JsValue> {
    let walkthrough = Walkthrough::new(step_count);
    let frame = match hovered_id {
        Some(id) => walkthrough.hover_id(&id),
        None => walkthrough.leave(),
    };
    Ok(serde_wasm_bindgen::to_value(&frame)?)
}

#[derive(Serialize)]
struct MatrixHoverView {
    html: String,
    cells: Vec<(Operand, usize, usize, String)>,
}

/// Breakdown of product cell `(row, col)`. Matrices are arrays of rows of
/// cell text. Returns `null` for out-of-range cells.
#[wasm_bindgen]
pub fn matrix_hover(
    left: JsValue,
    right: JsValue,
    product: JsValue,
    row: usize,
    col: usize,
) -> Result<JsValue, JsValue> {
    let left = Matrix::new(serde_wasm_bindgen::from_value(left)?);
    let right = Matrix::new(serde_wasm_bindgen::from_value(right)?);
    let product = Matrix::new(serde_wasm_bindgen::from_value(product)?);
    match hover_cell(&left, &right, &product, row, col) {
        Some(hover) => {
            let view = MatrixHoverView {
                html: hover.html(),
                cells: hover.highlighted_cells(),
            };
            Ok(serde_wasm_bindgen::to_value(&view)?)
        }
        None => Ok(JsValue::NULL),
    }
}

/// Indices of the animated figures that should start playing.
#[wasm_bindgen]
pub fn reveal_visible_figures(
    figures: JsValue,
    scroll_offset: f64,
    viewport_height: f64,
) -> Result<JsValue, JsValue> {
    let mut figures: Vec<Figure> = serde_wasm_bindgen::from_value(figures)?;
    let started = reveal_visible(&mut figures, scroll_offset, viewport_height);
    Ok(serde_wasm_bindgen::to_value(&started)?)
}

/// Views of the accessibility figure and which one is modal.
#[wasm_bindgen]
pub struct ModalFigure {
    tree: ViewTree,
    marker: ModalMarker,
}

#[wasm_bindgen]
impl ModalFigure {
    /// Create from an array of `{ id, children }` outlines.
    #[wasm_bindgen(constructor)]
    pub fn new(outlines: JsValue) -> Result<ModalFigure, JsValue> {
        let outlines: Vec<ViewOutline> = serde_wasm_bindgen::from_value(outlines)?;
        Ok(Self::from_outlines(&outlines))
    }

    /// Mark the view `id` (layout or hierarchy) as modal. Returns the
    /// marking classes of every view.
    pub fn mark(&mut self, id: &str) -> Result<JsValue, JsValue> {
        self.marker.mark(&mut self.tree, id);
        self.classes()
    }

    /// Remove the modal marking. Returns the marking classes of every view.
    pub fn clear(&mut self) -> Result<JsValue, JsValue> {
        self.marker.clear(&mut self.tree);
        self.classes()
    }

    pub fn classes(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.tree.class_attributes())?)
    }
}

impl ModalFigure {
    fn from_outlines(outlines: &[ViewOutline]) -> Self {
        Self {
            tree: ViewTree::from_outlines(outlines),
            marker: ModalMarker::new(),
        }
    }

    /// Mirror the marking classes onto the page, keeping any other classes.
    fn apply(&self, document: &Document) -> Result<(), JsValue> {
        for view in self.tree.class_attributes() {
            let Some(el) = document.get_element_by_id(&view.id) else {
                continue;
            };
            let classes = el.class_list();
            for class in [MODAL_CLASS, IGNORED_CLASS] {
                let marked = view.classes.split(' ').any(|c| c == class);
                classes.toggle_with_force(class, marked)?;
            }
        }
        Ok(())
    }
}

/// Outlines of the elements under `parent`. Elements without an id are
/// transparent: their children belong to the nearest ancestor with one.
fn outlines_under(parent: &Element) -> Vec<ViewOutline> {
    let mut outlines = Vec::new();
    let children = parent.children();
    for i in 0..children.length() {
        let Some(child) = children.item(i) else {
            continue;
        };
        let nested = outlines_under(&child);
        if child.id().is_empty() {
            outlines.extend(nested);
        } else {
            outlines.push(ViewOutline::new(child.id(), nested));
        }
    }
    outlines
}

fn update_modal(modal: &Rc<RefCell<ModalFigure>>, document: &Document, id: Option<&str>) {
    let mut modal = modal.borrow_mut();
    let ModalFigure { tree, marker } = &mut *modal;
    match id {
        Some(id) => {
            marker.mark(tree, id);
        }
        None => marker.clear(tree),
    }
    if let Err(e) = modal.apply(document) {
        log::warn!("Failed to apply modal marking: {:?}", e);
    }
}

/// Attach modal marking to the accessibility figure `figure_id`.
///
/// Hovering or tapping a layout view or hierarchy entry marks it; leaving it,
/// or tapping elsewhere in the figure, clears the mark.
#[wasm_bindgen]
pub fn bind_modal_figure(figure_id: &str) -> Result<(), JsValue> {
    let document = document()?;
    let figure = element(&document, figure_id)?;
    let modal = Rc::new(RefCell::new(ModalFigure::from_outlines(&outlines_under(&figure))));
    log::info!("Bound modal marking to #{}", figure_id);

    for class in [VIEW_CLASS, HIERARCHY_CLASS] {
        let views = figure.get_elements_by_class_name(class);
        for i in 0..views.length() {
            let Some(view) = views.item(i) else {
                continue;
            };
            for (name, marks) in [("mouseover", true), ("mouseout", false), ("touchend", true)] {
                let (modal, document, id) = (modal.clone(), document.clone(), view.id());
                listen_capture(&view, name, move |_: web_sys::Event| {
                    update_modal(&modal, &document, marks.then_some(id.as_str()));
                })?;
            }
        }
    }

    // Capture runs on the figure before the tapped view, so a tap on a view
    // clears first and then marks.
    listen_capture(&figure, "touchend", move |_: web_sys::Event| {
        update_modal(&modal, &document, None);
    })?;
    Ok(())
}

fn set_class_names(document: &Document, lookup: &str, class: &str) {
    let elements = document.get_elements_by_class_name(lookup);
    for i in 0..elements.length() {
        if let Some(el) = elements.item(i) {
            el.set_class_name(class);
        }
    }
}

/// Show the code listing and drawing segments of the flavor named by
/// `class` (`"uibezier"` or `"cgpath"`). Returns whether it was recognized.
#[wasm_bindgen]
pub fn select_path_flavor(class: &str) -> Result<bool, JsValue> {
    let Some(selected) = PathFlavor::parse(class) else {
        return Ok(false);
    };
    let document = document()?;
    for update in flavor_classes(selected) {
        set_class_names(&document, &update.segment_lookup, &update.segment);
        set_class_names(&document, &update.code_lookup, &update.code);
    }
    Ok(true)
}

/// Switch path flavors when a code listing is clicked.
#[wasm_bindgen]
pub fn bind_path_flavors() -> Result<(), JsValue> {
    let document = document()?;
    listen(&document, "click", move |e: MouseEvent| {
        let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if let Err(e) = select_path_flavor(&target.class_name()) {
            log::warn!("Failed to switch path flavor: {:?}", e);
        }
    })
}

/// Start every paused `<figure>` that is fully inside the window.
fn reveal_paused_figures(document: &Document) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let scroll_offset = window.scroll_y()?;
    let viewport_height = window.inner_height()?.as_f64().unwrap_or(0.0);

    let elements = document.get_elements_by_tag_name("figure");
    let mut paused = Vec::new();
    let mut figures = Vec::new();
    for i in 0..elements.length() {
        let Some(el) = elements.item(i).and_then(|e| e.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        if is_paused_class(&el.class_name()) {
            figures.push(Figure::new(el.offset_top() as f64, el.offset_height() as f64));
            paused.push(el);
        }
    }
    for i in reveal_visible(&mut figures, scroll_offset, viewport_height) {
        let el = &paused[i];
        el.set_class_name(&unpause_class(&el.class_name()));
    }
    Ok(())
}

/// Start paused figures as they scroll into view.
#[wasm_bindgen]
pub fn bind_animations() -> Result<(), JsValue> {
    let document = document()?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    {
        let document = document.clone();
        listen(&window, "scroll", move |_: web_sys::Event| {
            if let Err(e) = reveal_paused_figures(&document) {
                log::warn!("Failed to reveal figures: {:?}", e);
            }
        })?;
    }
    reveal_paused_figures(&document)
}

/// Restart the animation of the figure containing `sender` (its replay button).
#[wasm_bindgen]
pub fn replay_animation(sender: &Element) -> Result<(), JsValue> {
    let Some(container) = sender.parent_element() else {
        return Ok(());
    };
    let html = container.dyn_ref::<HtmlElement>();
    for (step, class) in replay_classes().into_iter().enumerate() {
        container.set_class_name(class);
        // Focusing between the two classes forces a style flush.
        if let (0, Some(html)) = (step, html) {
            html.focus()?;
        }
    }
    if let Some(html) = html {
        html.blur()?;
    }
    Ok(())
}
