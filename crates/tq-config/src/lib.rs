//! # tq-config
//!
//! Layered configuration loading for transitq using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TRANSITQ_*` prefix, `__` as separator)
//! 2. Project-level `.transitq/config.toml`
//! 3. User-level `~/.config/transitq/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TRANSITQ_API__API_KEY` -> `api.api_key`,
//! `TRANSITQ_STORE__DB_PATH` -> `store.db_path`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tq_config::TqConfig;
//!
//! let config = TqConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base_url);
//! ```

mod api;
mod error;
mod general;
mod naming;
mod store;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use naming::NamingConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TqConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TqConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".transitq/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TRANSITQ_").split("__"))
    }

    /// Reject values that would make every request or lookup fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty store path or API URL, a zero
    /// timeout, or a naming vocabulary entry that is empty or spans more than
    /// one identifier segment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.db_path.trim().is_empty() {
            return Err(ConfigError::EmptyStorePath);
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl { which: "base" });
        }
        if self.api.docs_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl { which: "docs" });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let words = self
            .naming
            .synonyms
            .iter()
            .flat_map(|(from, to)| [from, to])
            .chain(&self.naming.qualifiers);
        for word in words {
            if let Some(reason) = segment_problem(word) {
                return Err(ConfigError::Vocabulary {
                    entry: word.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("transitq").join("config.toml"))
    }
}

/// Identifiers are split on `_` before vocabulary lookup.
fn segment_problem(word: &str) -> Option<&'static str> {
    if word.trim().is_empty() {
        Some("must not be empty")
    } else if word.contains('_') {
        Some("must be a single segment without '_'")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TqConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.api.has_api_key());
        assert_eq!(config.store.db_path, ".transitq/metamodel.db");
        assert!(config.general.compact_results);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = TqConfig::default();
        config.api.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let mut config = TqConfig::default();
        config.api.base_url = "  ".into();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "API base URL is empty (api.base_url)");
    }

    #[test]
    fn empty_store_path_is_rejected() {
        let mut config = TqConfig::default();
        config.store.db_path = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "metamodel store path is empty (store.db_path)");
    }

    #[test]
    fn multi_segment_synonym_is_rejected() {
        let mut config = TqConfig::default();
        config
            .naming
            .synonyms
            .insert("bus_stop".into(), "stop".into());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Vocabulary { ref entry, .. } if entry == "bus_stop"));
        assert!(err.to_string().starts_with("naming vocabulary entry 'bus_stop'"));
    }

    #[test]
    fn empty_qualifier_is_rejected() {
        let mut config = TqConfig::default();
        config.naming.qualifiers.push(" ".into());
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Vocabulary { reason: "must not be empty", .. }
        ));
    }
}
