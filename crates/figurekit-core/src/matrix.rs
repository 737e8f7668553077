//! Matrix multiplication breakdown.
//!
//! Hovering a cell of the product `C = A · B` highlights row `i` of `A`
//! and column `j` of `B`, pairing each term with a progressively darker
//! shade, and spells out the sum that produced the cell.

use serde::{Deserialize, Serialize};

/// Background of the hovered product cell.
pub const HOVER_CELL_COLOR: &str = "#FFD17F";
/// Text shown while no cell is hovered.
pub const IDLE_TEXT: &str = "Hover the matrix C...";

/// Lightness of the first term's shade; each later term is 20 points darker.
const BASE_LIGHTNESS: i32 = 75;
const LIGHTNESS_STEP: i32 = 20;

/// Displayed cell contents of a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    rows: Vec<Vec<String>>,
}

impl Matrix {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build from numbers, rendering each cell with `Display`.
    pub fn from_values<T: ToString>(rows: Vec<Vec<T>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        )
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn row_len(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(Vec::len)
    }
}

/// Which matrix a highlighted cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Left,
    Right,
    Product,
}

/// CSS color of the `j`-th term's shade.
pub fn term_color(j: usize) -> String {
    format!("hsl(38, 100%, {}%)", term_lightness(j))
}

fn term_lightness(j: usize) -> i32 {
    BASE_LIGHTNESS - LIGHTNESS_STEP * j as i32
}

/// One `a ⋅ b` term of the hovered cell's sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub lhs: String,
    pub rhs: String,
    pub color: String,
}

impl Term {
    pub fn text(&self) -> String {
        format!("{} ⋅ {}", self.lhs, self.rhs)
    }
}

/// Render state while a product cell is hovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixHover {
    pub row: usize,
    pub col: usize,
    pub result: String,
    pub terms: Vec<Term>,
}

impl MatrixHover {
    /// Cells to color, as `(matrix, row, col, color)`.
    pub fn highlighted_cells(&self) -> Vec<(Operand, usize, usize, String)> {
        let mut cells: Vec<_> = self
            .terms
            .iter()
            .enumerate()
            .flat_map(|(j, term)| {
                [
                    (Operand::Left, self.row, j, term.color.clone()),
                    (Operand::Right, j, self.col, term.color.clone()),
                ]
            })
            .collect();
        cells.push((Operand::Product, self.row, self.col, HOVER_CELL_COLOR.to_string()));
        cells
    }

    /// Plain-text rendering of the sum, e.g. `19 =1 ⋅ 5+2 ⋅ 7`.
    pub fn text(&self) -> String {
        let terms: Vec<String> = self.terms.iter().map(Term::text).collect();
        format!("{} ={}", self.result, terms.join("+"))
    }

    /// Markup rendering of the sum with each term on its shade.
    pub fn html(&self) -> String {
        let terms: Vec<String> = self
            .terms
            .iter()
            .map(|t| format!("<span style='background:{}'>{}</span>", t.color, t.text()))
            .collect();
        format!("{} ={}", self.result, terms.join("+"))
    }
}

/// Breakdown of product cell `(row, col)`. `None` when the cell or a term
/// it needs is out of range.
pub fn hover_cell(
    left: &Matrix,
    right: &Matrix,
    product: &Matrix,
    row: usize,
    col: usize,
) -> Option<MatrixHover> {
    let result = product.cell(row, col)?.to_string();
    let terms = (0..left.row_len(row)?)
        .map(|j| {
            Some(Term {
                lhs: left.cell(row, j)?.to_string(),
                rhs: right.cell(j, col)?.to_string(),
                color: term_color(j),
            })
        })
        .collect::<Option<Vec<_>>>()?;
    Some(MatrixHover {
        row,
        col,
        result,
        terms,
    })
}
