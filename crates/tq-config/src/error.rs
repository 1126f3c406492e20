//! Errors raised while loading transitq settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or `TRANSITQ_*` variable could not be merged or parsed.
    #[error("failed to load transitq settings: {0}")]
    Figment(#[from] figment::Error),

    #[error("metamodel store path is empty (store.db_path)")]
    EmptyStorePath,

    /// `which` is `base` or `docs`.
    #[error("API {which} URL is empty (api.{which}_url)")]
    EmptyApiUrl { which: &'static str },

    #[error("API request timeout must be at least one second (api.timeout_secs)")]
    ZeroTimeout,

    /// A synonym or qualifier that can never match an identifier segment.
    #[error("naming vocabulary entry '{entry}' is unusable: {reason}")]
    Vocabulary { entry: String, reason: &'static str },
}
