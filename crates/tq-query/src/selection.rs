//! A user's query selection, expressed in metamodel ids.

use serde::{Deserialize, Serialize};
use tq_core::{CoreError, Metamodel, ResourceType};

/// Separator between the values of one filter.
pub const VALUE_SEPARATOR: char = ',';

/// One attached filter and its raw value string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    pub filter_id: i64,
    /// Comma-delimited values, transmitted verbatim.
    pub values: String,
}

impl FilterValue {
    pub fn new(filter_id: i64, values: impl Into<String>) -> Self {
        Self {
            filter_id,
            values: values.into(),
        }
    }

    /// Build from separate values, joining them with [`VALUE_SEPARATOR`].
    pub fn from_values<I, S>(filter_id: i64, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&VALUE_SEPARATOR.to_string());
        Self::new(filter_id, joined)
    }

    /// Values split for display, trimmed, blanks removed.
    #[must_use]
    pub fn split_values(&self) -> Vec<&str> {
        self.values
            .split(VALUE_SEPARATOR)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub resource_type_id: i64,
    /// Include option ids, in the order they were picked.
    pub include_ids: Vec<i64>,
    /// Selected attributes across every touched resource type.
    pub attribute_ids: Vec<i64>,
    /// Filters in the order they were attached.
    pub filters: Vec<FilterValue>,
}

impl Selection {
    #[must_use]
    pub fn new(resource_type_id: i64) -> Self {
        Self {
            resource_type_id,
            ..Self::default()
        }
    }

    /// Primary resource type plus the associated type of every selected
    /// include, deduplicated, in first-seen order. Includes without an
    /// associated resource type contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] for an id absent from `model`.
    pub fn touched_resource_types<'a>(
        &self,
        model: &'a Metamodel,
    ) -> Result<Vec<&'a ResourceType>, CoreError> {
        let primary = model
            .resource_type(self.resource_type_id)
            .ok_or_else(|| CoreError::not_found("resource type", self.resource_type_id))?;
        let mut touched = vec![primary];

        for include_id in &self.include_ids {
            let include = model
                .include_option(*include_id)
                .ok_or_else(|| CoreError::not_found("include option", include_id))?;
            let Some(associated) = include.associated_resource else {
                continue;
            };
            let resource_type = model
                .resource_type(associated)
                .ok_or_else(|| CoreError::not_found("resource type", associated))?;
            if !touched.iter().any(|rt| rt.id == resource_type.id) {
                touched.push(resource_type);
            }
        }
        Ok(touched)
    }
}
