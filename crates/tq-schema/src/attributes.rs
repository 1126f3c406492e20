//! Attribute definition derivation from `definitions[<Name>Resource]`.

use serde_json::{Map, Value};
use tq_core::{AttributeDefinition, Metamodel};

use crate::doc::ApiDoc;
use crate::error::SchemaError;
use crate::report::{IntrospectionReport, Stage};

/// Create one attribute definition per property of each resource type's
/// attribute schema. No-op if any attribute definition exists.
pub fn derive_attribute_definitions(
    doc: &ApiDoc,
    model: &mut Metamodel,
    report: &mut IntrospectionReport,
) {
    if !model.attributes.is_empty() {
        report.skip(Stage::AttributeDefinitions);
        return;
    }

    let resources: Vec<(i64, String)> = model
        .resource_types
        .iter()
        .map(|rt| (rt.id, rt.name.clone()))
        .collect();

    for (resource_id, resource_name) in resources {
        let schemas = match doc.attribute_schemas(&resource_name) {
            Ok(schemas) => schemas,
            Err(error) => {
                report.issue(Stage::AttributeDefinitions, &resource_name, &error);
                continue;
            }
        };

        for (name, property) in schemas {
            let Some(property) = property.as_object() else {
                let error = SchemaError::MalformedDefinition {
                    name: format!("{resource_name}Resource.{name}"),
                    reason: "property schema is not an object".into(),
                };
                report.issue(Stage::AttributeDefinitions, &resource_name, &error);
                continue;
            };

            let attribute = build_attribute(model.next_attribute_id(), resource_id, name, property);
            model.attributes.push(attribute);
            report.created.attributes += 1;
        }
    }

    tracing::info!(count = report.created.attributes, "derived attribute definitions");
}

fn build_attribute(
    id: i64,
    resource_id: i64,
    name: &str,
    property: &Map<String, Value>,
) -> AttributeDefinition {
    AttributeDefinition {
        id,
        for_resource: resource_id,
        name: name.to_string(),
        description: text(property, "description"),
        required: property
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        data_type: text(property, "type"),
        default: text(property, "default"),
        example: text(property, "x-example"),
        minimum: minimum(property, resource_id, name),
        choices: property
            .get("enum")
            .and_then(Value::as_array)
            .map(|choices| AttributeDefinition::encode_choices(choices))
            .unwrap_or_default(),
        data_format: text(property, "format"),
    }
}

/// Integral `minimum` bound. Whole floats such as `1.0` are accepted;
/// a fractional or non-numeric bound is dropped with a debug event.
fn minimum(property: &Map<String, Value>, resource_id: i64, name: &str) -> Option<i64> {
    let value = property.get("minimum").filter(|v| !v.is_null())?;
    if let Some(int) = value.as_i64() {
        return Some(int);
    }
    let whole = value.as_f64().and_then(whole_number);
    if whole.is_none() {
        tracing::debug!(resource_id, attribute = name, %value, "ignoring non-integral minimum");
    }
    whole
}

#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn whole_number(float: f64) -> Option<i64> {
    // 2^53: every whole f64 below it converts to i64 exactly.
    const EXACT: f64 = 9_007_199_254_740_992.0;
    (float.trunc() == float && float.abs() < EXACT).then_some(float as i64)
}

/// Read a schema key as text: strings verbatim, other values as JSON,
/// absent or null as empty.
fn text(property: &Map<String, Value>, key: &str) -> String {
    match property.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
