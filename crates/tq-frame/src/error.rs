//! Normalization error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    /// The primary collection is empty or absent.
    #[error("response contained no data")]
    NoData,

    /// The primary collection holds more than one resource type.
    #[error("response data mixes resource types: {}", types.join(", "))]
    MixedTypes { types: Vec<String> },

    /// A relationship's `data` member has an unexpected shape. Non-fatal:
    /// the relationship id becomes null.
    #[error("relationship '{name}' is malformed: {reason}")]
    MalformedRelationship { name: String, reason: String },

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("arrow export failed: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
}
