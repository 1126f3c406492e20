use serde::Serialize;
use tq_frame::{Table, coordinate_pairs};

use crate::cli::root_commands::RunArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::run::{execute, require_table};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ColumnInfo {
    name: String,
    dtype: &'static str,
    arrow_type: String,
    distinct: Option<usize>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct CoordinateInfo {
    label: String,
    latitude: String,
    longitude: String,
    id: Option<String>,
    points: usize,
}

#[derive(Debug, Serialize)]
struct ColumnsResponse {
    rows: usize,
    columns: Vec<ColumnInfo>,
    coordinates: Vec<CoordinateInfo>,
}

/// Handle `tq columns`.
pub async fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let results = execute(&args.query, !args.no_compact, ctx).await?;
    let table = require_table(&results)?;
    let response = describe(table, &args.query.resource)?;

    if flags.format == OutputFormat::Table {
        output(&response.columns, flags.format)?;
        if !response.coordinates.is_empty() {
            println!();
            output(&response.coordinates, flags.format)?;
        }
        return Ok(());
    }
    output(&response, flags.format)
}

fn describe(table: &Table, resource: &str) -> anyhow::Result<ColumnsResponse> {
    let batch = table.to_record_batch()?;
    let schema = batch.schema();
    let columns = table
        .columns()
        .iter()
        .zip(schema.fields().iter())
        .map(|(column, field)| ColumnInfo {
            name: column.name.clone(),
            dtype: column.dtype().as_str(),
            arrow_type: field.data_type().to_string(),
            distinct: column.distinct_count(),
        })
        .collect();

    let coordinates = coordinate_pairs(table)
        .into_iter()
        .map(|pair| CoordinateInfo {
            label: pair.resource_label(resource),
            points: pair.points(table).len(),
            latitude: pair.latitude,
            longitude: pair.longitude,
            id: pair.id,
        })
        .collect();

    Ok(ColumnsResponse {
        rows: table.len(),
        columns,
        coordinates,
    })
}
