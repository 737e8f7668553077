//! Error types for building figures from markup and configuration.
//!
//! Interactive operations (dragging, rescaling) never fail; out-of-range
//! input is clamped instead. Errors only arise while reading the initial
//! geometry.

use thiserror::Error;

/// Errors raised while constructing figure state.
#[derive(Debug, Error)]
pub enum FigureError {
    #[error("Malformed path description: {0}")]
    MalformedPath(String),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Invalid viewport dimensions: {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FigureError {
    fn from(e: serde_json::Error) -> Self {
        FigureError::Config(e.to_string())
    }
}

/// Result type for figure construction.
pub type FigureResult<T> = Result<T, FigureError>;

/// Parse a numeric attribute value as written in markup.
pub fn parse_number(value: &str) -> FigureResult<f64> {
    let trimmed = value.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FigureError::InvalidNumber(trimmed.to_string()))
}
