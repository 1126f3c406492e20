//! Metamodel store location.

use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    ".transitq/metamodel.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the libSQL database file holding the metamodel.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl StoreConfig {
    pub fn is_in_memory(&self) -> bool {
        self.db_path == ":memory:"
    }
}
