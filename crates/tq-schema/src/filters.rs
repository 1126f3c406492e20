//! Filter definition derivation from `filter[<name>]` parameters.

use tq_core::{FilterDefinition, Metamodel};

use crate::doc::ApiDoc;
use crate::naming::NamingVocabulary;
use crate::report::{IntrospectionReport, Stage};

/// Create a filter definition for every `filter[X]` parameter of each
/// resource type's list endpoint.
///
/// `filter[id]` is associated with its owning resource type; every other
/// name goes through the naming heuristic. No-op if any filter exists.
pub fn derive_filter_definitions(
    doc: &ApiDoc,
    model: &mut Metamodel,
    vocabulary: &NamingVocabulary,
    report: &mut IntrospectionReport,
) {
    if !model.filters.is_empty() {
        report.skip(Stage::FilterDefinitions);
        return;
    }

    let resources: Vec<(i64, String, String)> = model
        .resource_types
        .iter()
        .map(|rt| (rt.id, rt.name.clone(), rt.path.clone()))
        .collect();

    for (resource_id, resource_name, path) in resources {
        let operation = match doc.operation(&path) {
            Ok(operation) => operation,
            Err(error) => {
                report.issue(Stage::FilterDefinitions, &resource_name, &error);
                continue;
            }
        };

        for name in operation.parameters.iter().filter_map(|p| filter_name(&p.name)) {
            if model
                .filters_for(resource_id)
                .any(|existing| existing.name == name)
            {
                continue;
            }

            let associated_resource = if name == "id" {
                Some(resource_id)
            } else {
                match vocabulary.resolve(name, model) {
                    Ok(rt) => Some(rt.id),
                    Err(error) => {
                        tracing::debug!(%error, resource = %resource_name, "filter has no associated resource type");
                        report.unresolved(name);
                        None
                    }
                }
            };

            let filter = FilterDefinition {
                id: model.next_filter_id(),
                for_resource: resource_id,
                name: name.to_string(),
                associated_resource,
            };
            model.filters.push(filter);
            report.created.filters += 1;
        }
    }

    tracing::info!(count = report.created.filters, "derived filter definitions");
}

/// `filter[route]` -> `route`.
pub(crate) fn filter_name(param: &str) -> Option<&str> {
    param
        .strip_prefix("filter[")
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|name| !name.is_empty())
}
