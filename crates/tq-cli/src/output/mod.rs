use serde::Serialize;
use serde_json::Value;
use tq_frame::{Cell, Table};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{NULL_MARKER, TableOptions, render_table};

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render a serializable response in the requested format. CSV applies to
/// query results only, so it renders as JSON here.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::Csv => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render the first `limit` rows of a normalized table. CSV always carries
/// every row.
pub fn render_frame(frame: &Table, limit: usize, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            let headers = frame.column_names();
            let rows: Vec<Vec<String>> = frame
                .rows()
                .take(limit)
                .map(|row| row.cells().map(cell_text).collect())
                .collect();
            Ok(render_table(&headers, &rows, table_options()))
        }
        OutputFormat::Json | OutputFormat::Raw => {
            let records: Vec<_> = frame.records().into_iter().take(limit).collect();
            if format == OutputFormat::Json {
                Ok(serde_json::to_string_pretty(&records)?)
            } else {
                Ok(serde_json::to_string(&records)?)
            }
        }
        OutputFormat::Csv => {
            let mut buffer = Vec::new();
            frame.write_csv(&mut buffer)?;
            Ok(String::from_utf8(buffer)?.trim_end().to_string())
        }
    }
}

fn cell_text(cell: &Cell) -> String {
    if cell.is_null() {
        NULL_MARKER.to_string()
    } else {
        cell.to_string()
    }
}

fn render_value_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect();
            Ok(render_table(&["key", "value"], &rows, table_options()))
        }
        scalar => Ok(render_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        )),
    }
}

/// Arrays of objects become one column per key, in first-appearance order.
fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![value_to_cell(item)]).collect();
        return render_table(&["value"], &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| NULL_MARKER.to_string(), value_to_cell))
                .collect()
        })
        .collect();
    render_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => NULL_MARKER.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
