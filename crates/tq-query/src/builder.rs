//! Turns a [`Selection`] into wire-level request parameters.

use std::collections::HashSet;

use tq_core::{CoreError, Metamodel};

use crate::error::QueryError;
use crate::params::QueryParams;
use crate::selection::Selection;

/// Build request parameters in their fixed order: `include`, then one
/// `filter[<name>]` per attached filter, then `fields[<type>]` for every
/// touched resource type whose attributes are only partly selected.
///
/// # Errors
///
/// Returns [`QueryError::Core`] if the selection references ids that are
/// absent from `model`.
pub fn build_params(selection: &Selection, model: &Metamodel) -> Result<QueryParams, QueryError> {
    let mut params = QueryParams::new();

    if !selection.include_ids.is_empty() {
        let names = selection
            .include_ids
            .iter()
            .map(|id| {
                model
                    .include_option(*id)
                    .map(|inc| inc.name.as_str())
                    .ok_or_else(|| CoreError::not_found("include option", id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        params.insert("include", names.join(","));
    }

    for filter_value in &selection.filters {
        let filter = model
            .filter(filter_value.filter_id)
            .ok_or_else(|| CoreError::not_found("filter", filter_value.filter_id))?;
        params.insert(filter.param_name(), filter_value.values.clone());
    }

    let selected: HashSet<i64> = selection.attribute_ids.iter().copied().collect();
    for resource_type in selection.touched_resource_types(model)? {
        let known: Vec<_> = model.attributes_for(resource_type.id).collect();
        let chosen: Vec<&str> = known
            .iter()
            .filter(|attr| selected.contains(&attr.id))
            .map(|attr| attr.name.as_str())
            .collect();

        if chosen.len() < known.len() {
            params.insert(
                format!("fields[{}]", resource_type.fieldset_key()),
                chosen.join(","),
            );
        }
    }

    tracing::debug!(params = %params.to_query_string(), "built request parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::FilterValue;
    use pretty_assertions::assert_eq;
    use tq_core::{AttributeDefinition, FilterDefinition, IncludeOption, ResourceType};

    fn resource(id: i64, name: &str) -> ResourceType {
        ResourceType {
            id,
            path: format!("/{}s", name.to_lowercase()),
            name: name.to_string(),
            description: String::new(),
            can_specify_id: true,
            requires_filters: false,
        }
    }

    fn attribute(id: i64, for_resource: i64, name: &str) -> AttributeDefinition {
        AttributeDefinition {
            id,
            for_resource,
            name: name.to_string(),
            description: String::new(),
            required: false,
            data_type: "string".into(),
            default: String::new(),
            example: String::new(),
            minimum: None,
            choices: String::new(),
            data_format: String::new(),
        }
    }

    fn model() -> Metamodel {
        Metamodel {
            resource_types: vec![resource(1, "Stop"), resource(2, "Route")],
            include_options: vec![
                IncludeOption {
                    id: 1,
                    name: "route".into(),
                    associated_resource: Some(2),
                    included_by: vec![1],
                },
                IncludeOption {
                    id: 2,
                    name: "parent_station".into(),
                    associated_resource: Some(1),
                    included_by: vec![1],
                },
                IncludeOption {
                    id: 3,
                    name: "connecting_stops".into(),
                    associated_resource: None,
                    included_by: vec![1],
                },
            ],
            filters: vec![
                FilterDefinition {
                    id: 1,
                    for_resource: 1,
                    name: "route".into(),
                    associated_resource: Some(2),
                },
                FilterDefinition {
                    id: 2,
                    for_resource: 1,
                    name: "location_type".into(),
                    associated_resource: None,
                },
            ],
            attributes: vec![
                attribute(1, 1, "name"),
                attribute(2, 1, "latitude"),
                attribute(3, 1, "longitude"),
                attribute(4, 2, "long_name"),
                attribute(5, 2, "color"),
            ],
        }
    }

    #[test]
    fn full_attribute_set_omits_fields_regardless_of_order() {
        let selection = Selection {
            resource_type_id: 1,
            attribute_ids: vec![3, 1, 2],
            ..Selection::default()
        };
        let params = build_params(&selection, &model()).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn partial_attribute_set_emits_fields_in_stored_order() {
        let selection = Selection {
            resource_type_id: 1,
            attribute_ids: vec![3, 1],
            ..Selection::default()
        };
        let params = build_params(&selection, &model()).unwrap();
        assert_eq!(params.get("fields[stop]"), Some("name,longitude"));
    }

    #[test]
    fn parameters_follow_the_fixed_order() {
        let selection = Selection {
            resource_type_id: 1,
            include_ids: vec![1, 3],
            attribute_ids: vec![1, 2, 3, 4],
            filters: vec![
                FilterValue::new(2, "0,1"),
                FilterValue::new(1, "Red,Orange"),
            ],
        };
        let params = build_params(&selection, &model()).unwrap();
        assert_eq!(
            params.names(),
            vec![
                "include",
                "filter[location_type]",
                "filter[route]",
                "fields[route]",
            ]
        );
        assert_eq!(params.get("include"), Some("route,connecting_stops"));
        assert_eq!(params.get("filter[route]"), Some("Red,Orange"));
        assert_eq!(params.get("fields[route]"), Some("long_name"));
    }

    #[test]
    fn self_referencing_include_touches_the_primary_once() {
        let selection = Selection {
            resource_type_id: 1,
            include_ids: vec![2],
            attribute_ids: vec![1],
            ..Selection::default()
        };
        let params = build_params(&selection, &model()).unwrap();
        assert_eq!(params.names(), vec!["include", "fields[stop]"]);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let selection = Selection {
            resource_type_id: 1,
            include_ids: vec![42],
            ..Selection::default()
        };
        assert!(matches!(
            build_params(&selection, &model()),
            Err(QueryError::Core(CoreError::NotFound { .. }))
        ));
    }
}
