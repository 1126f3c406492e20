//! In-memory view of the metamodel.
//!
//! Collections are append-only: introspection only ever pushes new entities,
//! so the entities created by a run are the tail of each vector. The store
//! relies on this to persist exactly what a run added.

use serde::{Deserialize, Serialize};

use crate::entities::{AttributeDefinition, FilterDefinition, IncludeOption, ResourceType};
use crate::errors::CoreError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Metamodel {
    pub resource_types: Vec<ResourceType>,
    pub include_options: Vec<IncludeOption>,
    pub filters: Vec<FilterDefinition>,
    pub attributes: Vec<AttributeDefinition>,
}

/// Entity counts, used to slice off what an introspection run added.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetamodelCounts {
    pub resource_types: usize,
    pub include_options: usize,
    pub filters: usize,
    pub attributes: usize,
}

impl Metamodel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource_types.is_empty()
            && self.include_options.is_empty()
            && self.filters.is_empty()
            && self.attributes.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> MetamodelCounts {
        MetamodelCounts {
            resource_types: self.resource_types.len(),
            include_options: self.include_options.len(),
            filters: self.filters.len(),
            attributes: self.attributes.len(),
        }
    }

    // ── Lookups ────────────────────────────────────────────────────────

    #[must_use]
    pub fn resource_type(&self, id: i64) -> Option<&ResourceType> {
        self.resource_types.iter().find(|rt| rt.id == id)
    }

    #[must_use]
    pub fn resource_type_by_name(&self, name: &str) -> Option<&ResourceType> {
        self.resource_types.iter().find(|rt| rt.name == name)
    }

    /// Look up a resource type by name, failing with [`CoreError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no resource type has this name.
    pub fn require_resource_type(&self, name: &str) -> Result<&ResourceType, CoreError> {
        self.resource_type_by_name(name)
            .ok_or_else(|| CoreError::not_found("resource type", name))
    }

    #[must_use]
    pub fn include_option(&self, id: i64) -> Option<&IncludeOption> {
        self.include_options.iter().find(|inc| inc.id == id)
    }

    #[must_use]
    pub fn include_by_name(&self, name: &str) -> Option<&IncludeOption> {
        self.include_options.iter().find(|inc| inc.name == name)
    }

    #[must_use]
    pub fn filter(&self, id: i64) -> Option<&FilterDefinition> {
        self.filters.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn attribute(&self, id: i64) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.id == id)
    }

    /// Include options advertised by a resource type's list endpoint.
    pub fn includes_for(&self, resource_type_id: i64) -> impl Iterator<Item = &IncludeOption> {
        self.include_options
            .iter()
            .filter(move |inc| inc.is_included_by(resource_type_id))
    }

    pub fn filters_for(&self, resource_type_id: i64) -> impl Iterator<Item = &FilterDefinition> {
        self.filters
            .iter()
            .filter(move |f| f.for_resource == resource_type_id)
    }

    pub fn attributes_for(
        &self,
        resource_type_id: i64,
    ) -> impl Iterator<Item = &AttributeDefinition> {
        self.attributes
            .iter()
            .filter(move |a| a.for_resource == resource_type_id)
    }

    // ── Id allocation ──────────────────────────────────────────────────

    #[must_use]
    pub fn next_resource_type_id(&self) -> i64 {
        next_id(self.resource_types.iter().map(|rt| rt.id))
    }

    #[must_use]
    pub fn next_include_id(&self) -> i64 {
        next_id(self.include_options.iter().map(|inc| inc.id))
    }

    #[must_use]
    pub fn next_filter_id(&self) -> i64 {
        next_id(self.filters.iter().map(|f| f.id))
    }

    #[must_use]
    pub fn next_attribute_id(&self) -> i64 {
        next_id(self.attributes.iter().map(|a| a.id))
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}
