//! JSON:API response to a single denormalized table.

use serde_json::Value;

use crate::clean::clean_resources;
use crate::error::FrameError;
use crate::join::left_join;
use crate::table::Table;

/// Flatten a JSON:API document into one table.
///
/// The primary collection is cleaned and its columns prefixed with
/// `<type>_`. Each group of `included` resources, in first-appearance
/// order, is cleaned, prefixed with its own type and left-joined on
/// `<primary>_<included>` = `<included>_id`.
///
/// # Errors
///
/// Returns [`FrameError::NoData`] when `data` is absent, null or empty, and
/// [`FrameError::MixedTypes`] when it holds more than one resource type.
pub fn normalize(response: &Value) -> Result<Table, FrameError> {
    let data: Vec<&Value> = match response.get("data") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(object @ Value::Object(_)) => vec![object],
        _ => Vec::new(),
    };
    if data.is_empty() {
        return Err(FrameError::NoData);
    }

    let types = distinct_types(&data);
    if types.len() > 1 {
        return Err(FrameError::MixedTypes { types });
    }
    let main_type = types.into_iter().next().unwrap_or_default();

    let mut main = clean_resources(&data);
    main.prefix_columns(&format!("{main_type}_"));

    if let Some(Value::Array(included)) = response.get("included") {
        for (group_type, resources) in group_by_type(included) {
            let included_type = effective_type(&main_type, &group_type);
            let mut group = clean_resources(&resources);
            group.prefix_columns(&format!("{included_type}_"));

            let left_key = join_key(&main_type, included_type);
            let right_key = format!("{included_type}_id");
            main = left_join(main, &group, &left_key, &right_key);
        }
    }

    tracing::debug!(
        resource_type = %main_type,
        rows = main.len(),
        columns = main.width(),
        "normalized response"
    );
    Ok(main)
}

fn type_of(resource: &Value) -> String {
    resource
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn distinct_types(resources: &[&Value]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for resource in resources {
        let t = type_of(resource);
        if !types.contains(&t) {
            types.push(t);
        }
    }
    types
}

fn group_by_type(resources: &[Value]) -> Vec<(String, Vec<&Value>)> {
    let mut groups: Vec<(String, Vec<&Value>)> = Vec::new();
    for resource in resources {
        let t = type_of(resource);
        match groups.iter_mut().find(|(existing, _)| *existing == t) {
            Some((_, members)) => members.push(resource),
            None => groups.push((t, vec![resource])),
        }
    }
    groups
}

/// Route patterns reference their trip as `representative_trip`.
fn effective_type<'a>(main_type: &str, included_type: &'a str) -> &'a str {
    if main_type == "route_pattern" && included_type == "trip" {
        "representative_trip"
    } else {
        included_type
    }
}

/// Main-table column holding the related id. Lines relate to `routes`.
fn join_key(main_type: &str, included_type: &str) -> String {
    let key = format!("{main_type}_{included_type}");
    if key == "line_route" {
        "line_routes".to_string()
    } else {
        key
    }
}
