//! Error types for drill-core.

use thiserror::Error;

/// Result type alias using DrillError.
pub type Result<T> = std::result::Result<T, DrillError>;

/// Errors raised by the study engines and the deck import layer.
#[derive(Debug, Error)]
pub enum DrillError {
    #[error("deck has no words to study")]
    EmptyDeck,

    #[error("no words found with ids in range {start}..={end}")]
    EmptySelection { start: i64, end: i64 },

    #[error("session is not accepting answers")]
    NotPresenting,

    #[error("word at index {index} is missing required field `{field}`")]
    InvalidWord { index: usize, field: &'static str },

    #[error("invalid import data: {0}")]
    InvalidImport(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
