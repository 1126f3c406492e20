use anyhow::bail;
use tq_frame::QueryResults;

use crate::cli::root_commands::{QueryArgs, RunArgs};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::params::plan;
use crate::context::AppContext;
use crate::output::render_frame;

/// Handle `tq run`.
pub async fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let results = execute(&args.query, !args.no_compact, ctx).await?;

    if flags.format == OutputFormat::Raw {
        println!("{}", results.body());
        return Ok(());
    }
    if args.body {
        println!("{}", body_text(&results));
        return Ok(());
    }
    let table = require_table(&results)?;

    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    println!("{}", render_frame(table, limit, flags.format)?);

    if flags.format == OutputFormat::Table && !flags.quiet {
        let shown = limit.min(table.len());
        eprintln!(
            "{shown} of {} rows, {} columns, {} bytes",
            table.len(),
            table.width(),
            results.response_size_bytes.unwrap_or_default()
        );
    }
    Ok(())
}

/// Send the query and normalize the response.
pub async fn execute(
    query: &QueryArgs,
    compact: bool,
    ctx: &AppContext,
) -> anyhow::Result<QueryResults> {
    let plan = plan(query, ctx).await?;
    let response = ctx.client.get(&plan.path, &plan.params).await?;
    Ok(QueryResults::from_response(
        response.status,
        &response.reason,
        response.body,
        compact,
    ))
}

/// The normalized table, or the result-level error with its details.
pub fn require_table(results: &QueryResults) -> anyhow::Result<&tq_frame::Table> {
    if let Some(error) = &results.error {
        match results.error_details.as_deref() {
            Some(details) if !details.is_empty() => bail!("{error}\n{details}"),
            _ => bail!("{error}"),
        }
    }
    match &results.table {
        Some(table) => Ok(table),
        None => bail!("query returned no table"),
    }
}

/// Sorted, indented JSON; the untouched body when it is not JSON.
fn body_text(results: &QueryResults) -> String {
    results
        .pretty_json()
        .unwrap_or_else(|| results.body().to_string())
}

/// Global flag wins over the configured default.
fn effective_limit(global: Option<u32>, fallback: u32) -> usize {
    usize::try_from(global.unwrap_or(fallback)).unwrap_or(usize::MAX)
}
