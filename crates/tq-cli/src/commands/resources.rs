use std::collections::HashMap;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tq_core::{AttributeDefinition, FilterDefinition, IncludeOption, ResourceType};
use tq_db::error::DatabaseError;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResourceCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ResourceSummary {
    name: String,
    path: String,
    can_specify_id: bool,
    requires_filters: bool,
}

#[derive(Debug, Serialize, PartialEq)]
struct ResourceDetail {
    name: String,
    path: String,
    description: String,
    can_specify_id: bool,
    requires_filters: bool,
    includes: Vec<Related>,
    filters: Vec<Related>,
    attributes: Vec<AttributeSummary>,
}

/// An include or filter with the resource type it points at.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct Related {
    name: String,
    resource: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
struct AttributeSummary {
    name: String,
    data_type: String,
    required: bool,
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    choices: Vec<Value>,
}

/// Handle `tq resources <action>`.
pub async fn handle(
    action: &ResourceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ResourceCommands::List => {
            let resource_types = ctx.db.list_resource_types().await?;
            if resource_types.is_empty() {
                anyhow::bail!("metamodel is empty. Run 'tq init' first.");
            }
            let summaries: Vec<ResourceSummary> = resource_types
                .into_iter()
                .map(|rt| ResourceSummary {
                    name: rt.name,
                    path: rt.path,
                    can_specify_id: rt.can_specify_id,
                    requires_filters: rt.requires_filters,
                })
                .collect();
            output(&summaries, flags.format)
        }
        ResourceCommands::Show { name } => {
            let detail = show(ctx, name).await?;
            output(&detail, flags.format)
        }
    }
}

async fn show(ctx: &AppContext, name: &str) -> anyhow::Result<ResourceDetail> {
    let all = ctx.db.list_resource_types().await?;
    let resource = match ctx.db.get_resource_type_by_name(name).await {
        Ok(resource) => resource,
        Err(DatabaseError::NoResult) => all
            .iter()
            .find(|rt| rt.name.eq_ignore_ascii_case(name))
            .cloned()
            .with_context(|| format!("unknown resource type '{name}'"))?,
        Err(error) => return Err(error.into()),
    };

    let includes = ctx.db.list_includes_for(resource.id).await?;
    let filters = ctx.db.list_filters_for(resource.id).await?;
    let attributes = ctx.db.list_attributes_for(resource.id).await?;
    Ok(describe(resource, &all, &includes, &filters, &attributes))
}

fn describe(
    resource: ResourceType,
    all: &[ResourceType],
    includes: &[IncludeOption],
    filters: &[FilterDefinition],
    attributes: &[AttributeDefinition],
) -> ResourceDetail {
    let names: HashMap<i64, &str> = all.iter().map(|rt| (rt.id, rt.name.as_str())).collect();
    let target = |id: Option<i64>| id.and_then(|id| names.get(&id)).map(|n| (*n).to_string());

    ResourceDetail {
        includes: includes
            .iter()
            .map(|inc| Related {
                name: inc.name.clone(),
                resource: target(inc.associated_resource),
            })
            .collect(),
        filters: filters
            .iter()
            .map(|f| Related {
                name: f.name.clone(),
                resource: target(f.associated_resource),
            })
            .collect(),
        attributes: attributes
            .iter()
            .map(|attr| AttributeSummary {
                name: attr.name.clone(),
                data_type: attr.data_type.clone(),
                required: attr.required,
                description: attr.description.clone(),
                choices: attr.choices(),
            })
            .collect(),
        name: resource.name,
        path: resource.path,
        description: resource.description,
        can_specify_id: resource.can_specify_id,
        requires_filters: resource.requires_filters,
    }
}
