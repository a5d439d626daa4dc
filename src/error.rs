//! Errors for the text-ingestion entry points.
//!
//! The color, normalization and geometry operations never fail; they fall
//! back to documented defaults. Only helpers that start from raw text
//! (`shapes_from_json`, `Palette::from_json`, `Palette::from_env`) can
//! report a problem.

/// Errors produced while reading shape lists or palette overrides from text.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// The input text is not valid JSON, or does not match the expected layout.
    #[error("json parse failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A color profile override holds a value outside its allowed range.
    #[error("invalid color profile {name}: {reason}")]
    InvalidProfile { name: String, reason: String },
}
