//! Hash left join of two tables on one key column each.

use std::collections::HashMap;

use crate::cell::{Cell, CellKey};
use crate::column::Column;
use crate::table::Table;

/// Suffixes for column names present on both sides.
const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// Left-join `right` onto `left` matching `left_key` against `right_key`,
/// then drop `left_key` from the result.
///
/// Every left row is kept exactly once and in order; the first right row
/// with a given key wins. Unmatched rows get nulls. Returns `left`
/// unchanged, with a warning, if either key column is missing.
pub fn left_join(mut left: Table, right: &Table, left_key: &str, right_key: &str) -> Table {
    let Some(left_idx) = left.column_index(left_key) else {
        tracing::warn!(left_key, "join key column missing from main table; join skipped");
        return left;
    };
    let Some(right_idx) = right.column_index(right_key) else {
        tracing::warn!(right_key, "id column missing from included group; join skipped");
        return left;
    };

    let mut lookup: HashMap<CellKey, usize> = HashMap::new();
    for (row, cell) in right.columns()[right_idx].cells().enumerate() {
        if let Some(key) = cell.key() {
            lookup.entry(key).or_insert(row);
        }
    }

    let matches: Vec<Option<usize>> = left.columns()[left_idx]
        .cells()
        .map(|cell| cell.key().and_then(|key| lookup.get(&key).copied()))
        .collect();
    let matched = matches.iter().filter(|m| m.is_some()).count();

    let row_count = left.len();
    left.remove_column(left_idx);
    let mut left_columns = left.into_columns();

    let right_names: Vec<&str> = right.columns().iter().map(|c| c.name.as_str()).collect();
    let overlapping: Vec<String> = left_columns
        .iter()
        .filter(|c| right_names.contains(&c.name.as_str()))
        .map(|c| c.name.clone())
        .collect();

    for column in &mut left_columns {
        if overlapping.contains(&column.name) {
            column.name.push_str(LEFT_SUFFIX);
        }
    }

    let mut columns = left_columns;
    for column in right.columns() {
        let cells = matches
            .iter()
            .map(|m| m.map_or(Cell::Null, |row| column.cell(row).clone()))
            .collect();
        let name = if overlapping.contains(&column.name) {
            format!("{}{RIGHT_SUFFIX}", column.name)
        } else {
            column.name.clone()
        };
        columns.push(Column::new(name, cells));
    }

    tracing::debug!(left_key, right_key, rows = row_count, matched, "left join");
    Table::from_columns(row_count, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn stops() -> Table {
        let mut table = Table::with_rows(3);
        table.push_column("stop_id", vec![text("1"), text("2"), text("3")]);
        table.push_column("stop_name", vec![text("A"), text("B"), text("C")]);
        table.push_column("stop_route", vec![text("Red"), text("Blue"), Cell::Null]);
        table
    }

    fn routes() -> Table {
        let mut table = Table::with_rows(3);
        table.push_column("route_id", vec![text("Red"), text("Orange"), text("Red")]);
        table.push_column("route_color", vec![text("DA291C"), text("ED8B00"), text("dup")]);
        table
    }

    #[test]
    fn keeps_every_left_row_and_drops_the_key() {
        let joined = left_join(stops(), &routes(), "stop_route", "route_id");
        assert_eq!(joined.len(), 3);
        assert_eq!(
            joined.column_names(),
            vec!["stop_id", "stop_name", "route_id", "route_color"]
        );
        let colors: Vec<_> = joined.column("route_color").unwrap().decoded();
        assert_eq!(colors, vec![text("DA291C"), Cell::Null, Cell::Null]);
    }

    #[test]
    fn overlapping_names_get_suffixes() {
        let mut right = Table::with_rows(1);
        right.push_column("route_id", vec![text("Red")]);
        right.push_column("stop_name", vec![text("from route")]);

        let joined = left_join(stops(), &right, "stop_route", "route_id");
        assert_eq!(
            joined.column_names(),
            vec!["stop_id", "stop_name_x", "route_id", "stop_name_y"]
        );
    }

    #[test]
    fn missing_key_column_skips_the_join() {
        let joined = left_join(stops(), &routes(), "stop_line", "route_id");
        assert_eq!(joined, stops());
    }
}
