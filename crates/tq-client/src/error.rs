//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: DNS, TLS, timeout, connection reset.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status on a request that must succeed.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The configured key cannot be sent as a header value.
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("invalid API description document: {0}")]
    Doc(#[from] tq_schema::SchemaError),
}
