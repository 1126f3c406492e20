//! Cross-cutting error types for transitq.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `FrameError`) are defined in
//! their respective crates. They converge in `tq-cli` through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any transitq crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {key}")]
    NotFound { entity_type: String, key: String },

    /// Data failed validation (unknown selection, malformed value).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by name or id.
    pub fn not_found(entity_type: &str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }
}
