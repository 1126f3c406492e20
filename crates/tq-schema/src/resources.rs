//! Resource type derivation.

use tq_core::{Metamodel, ResourceType};

use crate::doc::ApiDoc;
use crate::error::SchemaError;
use crate::report::{IntrospectionReport, Stage};

/// Create one resource type per list path.
///
/// No-op if the metamodel already holds any resource type.
pub fn derive_resource_types(doc: &ApiDoc, model: &mut Metamodel, report: &mut IntrospectionReport) {
    if !model.resource_types.is_empty() {
        report.skip(Stage::ResourceTypes);
        return;
    }

    for path in doc.list_paths() {
        match build_resource_type(doc, path, model) {
            Ok(resource_type) => {
                tracing::debug!(name = %resource_type.name, path, "derived resource type");
                model.resource_types.push(resource_type);
                report.created.resource_types += 1;
            }
            Err(error) => report.issue(Stage::ResourceTypes, path, &error),
        }
    }

    tracing::info!(count = report.created.resource_types, "derived resource types");
}

fn build_resource_type(
    doc: &ApiDoc,
    path: &str,
    model: &Metamodel,
) -> Result<ResourceType, SchemaError> {
    let operation = doc.operation(path)?;
    let name = operation
        .resource_name()
        .ok_or_else(|| SchemaError::MissingTag {
            path: path.to_string(),
        })?
        .to_string();

    if model.resource_type_by_name(&name).is_some() {
        return Err(SchemaError::DuplicateResource {
            name,
            path: path.to_string(),
        });
    }

    Ok(ResourceType {
        id: model.next_resource_type_id(),
        path: path.to_string(),
        requires_filters: ResourceType::name_requires_filters(&name),
        name,
        description: operation.description,
        can_specify_id: doc.has_single_item_path(path),
    })
}
