//! Remote API connection settings.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api-v3.mbta.com".to_string()
}

fn default_docs_url() -> String {
    "https://api-v3.mbta.com/docs/swagger/swagger.json".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL resource paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Location of the machine-readable API description document.
    #[serde(default = "default_docs_url")]
    pub docs_url: String,

    /// Sent as the `X-API-Key` header when non-empty.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            docs_url: default_docs_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Whether an API key is available. Requests without one are rate limited
    /// more aggressively but still allowed.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// The API key, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        if self.api_key.is_empty() {
            None
        } else {
            Some(&self.api_key)
        }
    }
}
