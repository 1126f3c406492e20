//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of rows printed for a result table.
const fn default_limit() -> u32 {
    100
}

const fn default_compact_results() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default row limit for `tq run` output.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Dictionary-encode low-cardinality columns after normalization.
    #[serde(default = "default_compact_results")]
    pub compact_results: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            compact_results: default_compact_results(),
        }
    }
}
