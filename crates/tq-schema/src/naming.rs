//! Name-resolution heuristic mapping include and filter identifiers to
//! resource types.
//!
//! `parent_station` -> drop `parent` -> `station` becomes `stop` -> `Stop`.
//! `child_stops` -> drop `child` -> `Stops` -> singular `Stop`.

use std::collections::{BTreeMap, BTreeSet};

use tq_core::{Metamodel, ResourceType};

use crate::error::SchemaError;

/// Synonyms and ignorable qualifier words used by [`NamingVocabulary::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingVocabulary {
    synonyms: BTreeMap<String, String>,
    qualifiers: BTreeSet<String>,
}

impl Default for NamingVocabulary {
    fn default() -> Self {
        Self::new(
            [("station".to_string(), "stop".to_string())],
            ["parent".to_string(), "child".to_string()],
        )
    }
}

impl NamingVocabulary {
    pub fn new(
        synonyms: impl IntoIterator<Item = (String, String)>,
        qualifiers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            synonyms: synonyms.into_iter().collect(),
            qualifiers: qualifiers.into_iter().collect(),
        }
    }

    /// The resource type name an identifier would map to, before lookup.
    #[must_use]
    pub fn candidate_name(&self, identifier: &str) -> String {
        let name: String = identifier
            .split('_')
            .filter(|segment| !self.qualifiers.contains(*segment))
            .map(|segment| {
                self.synonyms
                    .get(segment)
                    .map_or(segment, String::as_str)
            })
            .map(capitalize)
            .collect();
        singularize(&name)
    }

    /// Resolve an identifier to a resource type in `model`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnresolvedName`] if no resource type carries the
    /// candidate name.
    pub fn resolve<'a>(
        &self,
        identifier: &str,
        model: &'a Metamodel,
    ) -> Result<&'a ResourceType, SchemaError> {
        let candidate = self.candidate_name(identifier);
        model
            .resource_type_by_name(&candidate)
            .ok_or(SchemaError::UnresolvedName {
                identifier: identifier.to_string(),
                candidate,
            })
    }

    /// Nullable form of [`Self::resolve`].
    #[must_use]
    pub fn resolve_associated_resource_type<'a>(
        &self,
        identifier: &str,
        model: &'a Metamodel,
    ) -> Option<&'a ResourceType> {
        self.resolve(identifier, model).ok()
    }
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = name.strip_suffix('s') {
        stem.to_string()
    } else {
        name.to_string()
    }
}
