//! The cubic path bound to the two draggable control points.

use crate::editor::ControlPointId;
use crate::error::{FigureError, FigureResult, parse_number};
use crate::scale::ScaleStep;
use kurbo::{CubicBez, Point};
use serde::{Deserialize, Serialize};

/// A single cubic segment in model space.
///
/// Serialized as `M sx sy C c1x c1y c2x c2y ex ey`. Splitting that string on
/// spaces puts the first control point at components 4/5 and the second at
/// components 6/7.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePath {
    points: [Point; 4],
}

impl CurvePath {
    /// Create a path from its start, two controls and end.
    pub fn new(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        Self {
            points: [start, control1, control2, end],
        }
    }

    /// Parse a path description of the form written by [`CurvePath::to_svg`].
    pub fn parse(d: &str) -> FigureResult<Self> {
        let tokens: Vec<&str> = d.split_whitespace().collect();
        if tokens.len() != 10 || tokens[0] != "M" || tokens[3] != "C" {
            return Err(FigureError::MalformedPath(d.to_string()));
        }
        let number = |i: usize| -> FigureResult<f64> {
            parse_number(tokens[i]).map_err(|_| FigureError::MalformedPath(d.to_string()))
        };
        Ok(Self::new(
            Point::new(number(1)?, number(2)?),
            Point::new(number(4)?, number(5)?),
            Point::new(number(6)?, number(7)?),
            Point::new(number(8)?, number(9)?),
        ))
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[3]
    }

    /// Control point written by the given draggable point.
    pub fn control(&self, id: ControlPointId) -> Point {
        self.points[id.slot()]
    }

    /// Overwrite the slot owned by the given control point.
    pub fn set_control(&mut self, id: ControlPointId, point: Point) {
        self.points[id.slot()] = point;
    }

    /// All four points in path order.
    pub fn points(&self) -> [Point; 4] {
        self.points
    }

    /// Get as a kurbo cubic.
    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(self.points[0], self.points[1], self.points[2], self.points[3])
    }

    /// The same path with every point multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self.points.map(|p| ScaleStep::apply(factor).point(p)),
        }
    }

    /// Path description for rendering.
    pub fn to_svg(&self) -> String {
        let [s, c1, c2, e] = self.points;
        format!(
            "M {} {} C {} {} {} {} {} {}",
            s.x, s.y, c1.x, c1.y, c2.x, c2.y, e.x, e.y
        )
    }
}
