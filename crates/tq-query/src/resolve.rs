//! Resolution of a textual selection (as typed on the command line)
//! against the metamodel.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tq_core::{Metamodel, ResourceType};

use crate::error::QueryError;
use crate::selection::{FilterValue, Selection};

/// A selection written with names instead of ids.
///
/// Attributes are `name` for the primary resource type or
/// `<type-or-include>.name` for an included one; filters are
/// `name=value[,value...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSpec {
    pub resource: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub filters: Vec<String>,
}

impl SelectionSpec {
    /// Resolve every name to its metamodel id.
    ///
    /// Touched resource types without any explicitly selected attribute get
    /// all of their attributes, so no sparse fieldset is sent for them.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] naming the first unknown resource, include,
    /// attribute or filter, an attribute of a resource type the query does
    /// not touch, a malformed filter, or a missing filter on a resource type
    /// that requires one.
    pub fn resolve(&self, model: &Metamodel) -> Result<Selection, QueryError> {
        let primary = find_resource_type(model, &self.resource)
            .ok_or_else(|| tq_core::CoreError::not_found("resource type", &self.resource))?;
        let mut selection = Selection::new(primary.id);

        for include_name in &self.includes {
            let include = model
                .includes_for(primary.id)
                .find(|inc| inc.name == *include_name)
                .ok_or_else(|| QueryError::UnknownInclude {
                    resource: primary.name.clone(),
                    include: include_name.clone(),
                })?;
            if !selection.include_ids.contains(&include.id) {
                selection.include_ids.push(include.id);
            }
        }

        for spec in &self.filters {
            let (name, values) = spec
                .split_once('=')
                .filter(|(name, values)| !name.trim().is_empty() && !values.trim().is_empty())
                .ok_or_else(|| QueryError::InvalidFilterSpec { spec: spec.clone() })?;
            let filter = model
                .filters_for(primary.id)
                .find(|f| f.name == name.trim())
                .ok_or_else(|| QueryError::UnknownFilter {
                    resource: primary.name.clone(),
                    filter: name.trim().to_string(),
                })?;
            selection.filters.push(FilterValue::new(filter.id, values.trim()));
        }

        if primary.requires_filters && selection.filters.is_empty() {
            return Err(QueryError::FiltersRequired {
                resource: primary.name.clone(),
            });
        }

        let touched = selection.touched_resource_types(model)?;
        for spec in &self.attributes {
            let attribute_id = self.resolve_attribute(model, primary, &touched, spec)?;
            if !selection.attribute_ids.contains(&attribute_id) {
                selection.attribute_ids.push(attribute_id);
            }
        }

        let chosen: HashSet<i64> = selection.attribute_ids.iter().copied().collect();
        for resource_type in &touched {
            let known: Vec<i64> = model
                .attributes_for(resource_type.id)
                .map(|attr| attr.id)
                .collect();
            if !known.iter().any(|id| chosen.contains(id)) {
                selection.attribute_ids.extend(known);
            }
        }

        tracing::debug!(
            resource = %primary.name,
            includes = selection.include_ids.len(),
            attributes = selection.attribute_ids.len(),
            filters = selection.filters.len(),
            "resolved selection"
        );
        Ok(selection)
    }

    fn resolve_attribute(
        &self,
        model: &Metamodel,
        primary: &ResourceType,
        touched: &[&ResourceType],
        spec: &str,
    ) -> Result<i64, QueryError> {
        let (owner, name) = match spec.split_once('.') {
            Some((qualifier, name)) => {
                let owner = find_resource_type(model, qualifier)
                    .or_else(|| {
                        self.includes
                            .iter()
                            .find(|inc| inc.as_str() == qualifier)
                            .and_then(|inc| model.include_by_name(inc))
                            .and_then(|inc| inc.associated_resource)
                            .and_then(|id| model.resource_type(id))
                    })
                    .ok_or_else(|| tq_core::CoreError::not_found("resource type", qualifier))?;
                (owner, name)
            }
            None => (primary, spec),
        };

        if !touched.iter().any(|rt| rt.id == owner.id) {
            return Err(QueryError::UntouchedResource {
                spec: spec.to_string(),
                resource: owner.name.clone(),
            });
        }

        model
            .attributes_for(owner.id)
            .find(|attr| attr.name == name)
            .map(|attr| attr.id)
            .ok_or_else(|| QueryError::UnknownAttribute {
                resource: owner.name.clone(),
                attribute: name.to_string(),
            })
    }
}

/// Exact name first, then case-insensitive.
fn find_resource_type<'a>(model: &'a Metamodel, name: &str) -> Option<&'a ResourceType> {
    model.resource_type_by_name(name).or_else(|| {
        model
            .resource_types
            .iter()
            .find(|rt| rt.name.eq_ignore_ascii_case(name))
    })
}
