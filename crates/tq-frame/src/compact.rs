//! Dictionary encoding of low-cardinality columns.

use std::collections::HashMap;

use crate::cell::{Cell, CellKey};
use crate::column::ColumnData;
use crate::table::Table;

/// Share of rows a column's distinct-value count must stay under.
const CARDINALITY_DIVISOR: usize = 5;

/// Dictionary-encode every plain column with fewer than
/// `rows / 5` distinct non-null values. Columns holding nested JSON
/// cannot be counted and are left alone. Returns the number of columns
/// converted.
pub fn compact_memory(table: &mut Table) -> usize {
    let threshold = table.len() / CARDINALITY_DIVISOR;
    let mut converted = 0;

    for column in table.columns_mut() {
        let Some(distinct) = column.distinct_count() else {
            tracing::debug!(column = %column.name, "unhashable values; not compacted");
            continue;
        };
        if column.is_dictionary() || distinct >= threshold {
            continue;
        }
        if let ColumnData::Plain(cells) = &mut column.data {
            column.data = encode(std::mem::take(cells));
            converted += 1;
        }
    }

    tracing::debug!(converted, threshold, "compacted columns");
    converted
}

/// Values in first-appearance order; nulls get no key.
fn encode(cells: Vec<Cell>) -> ColumnData {
    let mut values: Vec<Cell> = Vec::new();
    let mut index: HashMap<CellKey, u32> = HashMap::new();
    let mut keys = Vec::with_capacity(cells.len());

    for cell in cells {
        let Some(key) = cell.key() else {
            keys.push(None);
            continue;
        };
        let code = *index.entry(key).or_insert_with(|| {
            values.push(cell);
            u32::try_from(values.len() - 1).unwrap_or(u32::MAX)
        });
        keys.push(Some(code));
    }

    ColumnData::Dictionary { values, keys }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repeated(n: usize, values: &[&str]) -> Vec<Cell> {
        (0..n)
            .map(|i| Cell::Text(values[i % values.len()].to_string()))
            .collect()
    }

    #[test]
    fn low_cardinality_columns_become_dictionaries() {
        let mut table = Table::with_rows(20);
        table.push_column("route_type", repeated(20, &["0", "1", "3"]));
        let ids: Vec<Cell> = (0..20).map(|i| Cell::Text(i.to_string())).collect();
        table.push_column("stop_id", ids);
        let original = table.clone();

        assert_eq!(compact_memory(&mut table), 1);
        assert!(table.column("route_type").unwrap().is_dictionary());
        assert!(!table.column("stop_id").unwrap().is_dictionary());

        for (compacted, plain) in table.columns().iter().zip(original.columns()) {
            assert_eq!(compacted.decoded(), plain.decoded());
        }
    }

    #[test]
    fn threshold_uses_integer_division() {
        // 9 rows: threshold 1, so even a single distinct value stays plain.
        let mut table = Table::with_rows(9);
        table.push_column("x", repeated(9, &["a"]));
        assert_eq!(compact_memory(&mut table), 0);

        // 10 rows: threshold 2, a single distinct value is compacted.
        let mut table = Table::with_rows(10);
        table.push_column("x", repeated(10, &["a"]));
        assert_eq!(compact_memory(&mut table), 1);
    }

    #[test]
    fn nested_values_are_left_alone() {
        let mut table = Table::with_rows(10);
        table.push_column("x", vec![Cell::Json(serde_json::json!([1])); 10]);
        assert_eq!(compact_memory(&mut table), 0);
    }

    #[test]
    fn nanosecond_distinct_timestamps_stay_distinct() {
        use chrono::{TimeZone, Utc};

        let stamps: Vec<Cell> = (0..15)
            .map(|i| {
                let nanos = if i % 2 == 0 { 100 } else { 200 };
                Cell::Timestamp(Utc.timestamp_opt(1_700_000_000, nanos).single().unwrap())
            })
            .collect();
        let mut table = Table::with_rows(15);
        table.push_column("stop_created_at", stamps.clone());

        assert_eq!(compact_memory(&mut table), 1);
        let column = table.column("stop_created_at").unwrap();
        assert_eq!(column.distinct_count(), Some(2));
        assert_eq!(column.decoded(), stamps);
    }

    #[test]
    fn nulls_survive_encoding() {
        let mut cells = repeated(10, &["a"]);
        cells[3] = Cell::Null;
        let ColumnData::Dictionary { values, keys } = encode(cells) else {
            panic!("expected dictionary");
        };
        assert_eq!(values, vec![Cell::Text("a".into())]);
        assert_eq!(keys[3], None);
        assert_eq!(keys[4], Some(0));
    }
}
