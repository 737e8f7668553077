//! FigureKit Application
//!
//! Wires UI events into the figure core: DOM bindings on the web and a
//! headless replay tool on native platforms.

mod event_handler;
mod render;

pub use event_handler::{EventHandler, FigureEvent, ReplayScript, SLIDER_KNOB_ID};
pub use render::{RenderOp, render_ops};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{
    FigureKit, ModalFigure, bind_animations, bind_curve_editor, bind_modal_figure,
    bind_path_flavors, replay_animation, select_path_flavor, start,
};
