//! FigureKit Core Library
//!
//! Platform-agnostic geometry and render state for the interactive figures
//! of an illustrated article: a cubic curve editor with draggable control
//! points, a slider along a reference curve, and the hover-driven
//! walkthrough, matrix, accessibility and animation figures.

pub mod animation;
pub mod config;
pub mod editor;
pub mod error;
pub mod matrix;
pub mod modal;
pub mod path;
pub mod scale;
pub mod slider;
pub mod tangent;
pub mod walkthrough;

pub use config::{EditorConfig, SliderConfig};
pub use editor::{ControlPoint, ControlPointId, CurveEditor, EditorSnapshot};
pub use error::{FigureError, FigureResult};
pub use matrix::{Matrix, MatrixHover, hover_cell};
pub use modal::{ModalMarker, ViewClasses, ViewOutline, ViewTree};
pub use path::CurvePath;
pub use scale::{Rescale, ScaleStep, ViewportScale, half_scale};
pub use slider::{CurveSlider, ReferenceCurve, SliderTrack};
pub use tangent::{TangentLine, anchor_direction};
pub use walkthrough::{FlavorClasses, PathFlavor, Walkthrough, WalkthroughFrame, flavor_classes};
