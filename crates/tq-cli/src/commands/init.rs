use anyhow::Context;
use serde::Serialize;
use tq_schema::{ApiDoc, IntrospectionReport};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    db_path: String,
    source: String,
    report: IntrospectionReport,
}

/// Handle `tq init`.
pub async fn handle(args: &InitArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (doc, source) = match &args.doc {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let doc = ApiDoc::from_json(&text)
                .with_context(|| format!("{} is not a valid API description", path.display()))?;
            (doc, path.display().to_string())
        }
        None => {
            let doc = ctx
                .client
                .fetch_api_doc()
                .await
                .context("failed to fetch API description")?;
            (doc, ctx.config.api.docs_url.clone())
        }
    };

    let report = ctx
        .db
        .ensure_initialized(&doc, &ctx.vocabulary)
        .await
        .context("failed to initialize metamodel")?;

    if report.is_noop() {
        tracing::info!("metamodel already initialized; nothing added");
    }
    for unresolved in &report.unresolved {
        tracing::debug!(identifier = %unresolved, "no resource type matches");
    }

    output(
        &InitResponse {
            db_path: ctx.config.store.db_path.clone(),
            source,
            report,
        },
        flags.format,
    )
}
