//! Named columns, plain or dictionary-encoded.

use crate::cell::{Cell, DataType, NULL};

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Plain(Vec<Cell>),
    /// Distinct `values` plus one key per row; `None` is null.
    Dictionary {
        values: Vec<Cell>,
        keys: Vec<Option<u32>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Plain(cells),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Plain(cells) => cells.len(),
            ColumnData::Dictionary { keys, .. } => keys.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn is_dictionary(&self) -> bool {
        matches!(self.data, ColumnData::Dictionary { .. })
    }

    /// Cell at `row`, or null when out of range.
    #[must_use]
    pub fn cell(&self, row: usize) -> &Cell {
        match &self.data {
            ColumnData::Plain(cells) => cells.get(row).unwrap_or(&NULL),
            ColumnData::Dictionary { values, keys } => keys
                .get(row)
                .copied()
                .flatten()
                .and_then(|key| values.get(key as usize))
                .unwrap_or(&NULL),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        (0..self.len()).map(|row| self.cell(row))
    }

    /// Materialized cells, decoding a dictionary column.
    #[must_use]
    pub fn decoded(&self) -> Vec<Cell> {
        self.cells().cloned().collect()
    }

    #[must_use]
    pub fn dtype(&self) -> DataType {
        match &self.data {
            ColumnData::Dictionary { .. } => DataType::Category,
            ColumnData::Plain(cells) => DataType::infer(cells),
        }
    }

    /// Number of distinct non-null values; `None` if a cell is unhashable.
    #[must_use]
    pub fn distinct_count(&self) -> Option<usize> {
        match &self.data {
            ColumnData::Dictionary { values, .. } => Some(values.len()),
            ColumnData::Plain(cells) => {
                let mut seen = std::collections::HashSet::new();
                for cell in cells {
                    if let Cell::Json(_) = cell {
                        return None;
                    }
                    if let Some(key) = cell.key() {
                        seen.insert(key);
                    }
                }
                Some(seen.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_cells_decode_through_keys() {
        let column = Column {
            name: "route_type".into(),
            data: ColumnData::Dictionary {
                values: vec![Cell::Int(0), Cell::Int(3)],
                keys: vec![Some(1), None, Some(0)],
            },
        };
        assert_eq!(column.len(), 3);
        assert_eq!(column.decoded(), vec![Cell::Int(3), Cell::Null, Cell::Int(0)]);
        assert_eq!(column.cell(10), &Cell::Null);
        assert_eq!(column.dtype(), DataType::Category);
    }

    #[test]
    fn distinct_count_skips_nulls_and_refuses_nested_values() {
        let column = Column::new(
            "x",
            vec![Cell::Text("a".into()), Cell::Null, Cell::Text("a".into())],
        );
        assert_eq!(column.distinct_count(), Some(1));

        let nested = Column::new("y", vec![Cell::Json(serde_json::json!([1]))]);
        assert_eq!(nested.distinct_count(), None);
    }
}
