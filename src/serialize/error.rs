//! Serialization error types.

use thiserror::Error;

/// Errors that abort serialization of a whole document.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// Task parameters must flatten to a JSON object
    #[error("Task '{state}' parameters must be a JSON object, found {found}")]
    NonObjectParameters { state: String, found: &'static str },

    /// NaN and infinities have no JSON form
    #[error("State '{state}': {field} must be a finite number")]
    NonFiniteNumber { state: String, field: String },

    /// Encoding to JSON text failed
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
