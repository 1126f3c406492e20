use anyhow::Context;
use serde::Serialize;
use tq_query::{QueryParams, build_params};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ParamsArgs, QueryArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct RequestPlan {
    pub resource: String,
    pub path: String,
    pub url: String,
    pub params: QueryParams,
}

/// Handle `tq params`.
pub async fn handle(args: &ParamsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let plan = plan(&args.query, ctx).await?;
    output(&plan, flags.format)
}

/// Resolve a query against the stored metamodel into the request it sends.
pub async fn plan(query: &QueryArgs, ctx: &AppContext) -> anyhow::Result<RequestPlan> {
    let model = ctx.metamodel().await?;
    let selection = query
        .selection_spec()
        .resolve(&model)
        .context("invalid selection")?;
    let params = build_params(&selection, &model)?;
    let resource = model
        .resource_type(selection.resource_type_id)
        .context("selection refers to a missing resource type")?;

    Ok(RequestPlan {
        resource: resource.name.clone(),
        path: resource.path.clone(),
        url: ctx.client.url_for(&resource.path, &params),
        params,
    })
}
