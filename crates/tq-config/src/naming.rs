//! Vocabulary for resolving include and filter names to resource types.
//!
//! Kept as configuration so new remote API vocabulary can be added without
//! touching the resolution algorithm.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_synonyms() -> BTreeMap<String, String> {
    BTreeMap::from([("station".to_string(), "stop".to_string())])
}

fn default_qualifiers() -> Vec<String> {
    vec!["parent".to_string(), "child".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamingConfig {
    /// Identifier segment -> replacement segment.
    #[serde(default = "default_synonyms")]
    pub synonyms: BTreeMap<String, String>,

    /// Segments that carry no type information and are dropped.
    #[serde(default = "default_qualifiers")]
    pub qualifiers: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            synonyms: default_synonyms(),
            qualifiers: default_qualifiers(),
        }
    }
}
