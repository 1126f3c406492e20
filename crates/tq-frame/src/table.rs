//! The denormalized result table and its row view.

use std::io::Write;

use serde_json::{Map, Value};

use crate::cell::{Cell, DataType, NULL};
use crate::column::Column;
use crate::error::FrameError;

/// Column-major table. Every column has `row_count` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

/// Read-only view of one row with index-based cell access.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowView<'a> {
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Cell in column `column`, null when out of range.
    #[must_use]
    pub fn cell(&self, column: usize) -> &'a Cell {
        self.table
            .columns
            .get(column)
            .map_or(&NULL, |c| c.cell(self.index))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Cell> {
        self.table
            .column_index(name)
            .map(|column| self.cell(column))
    }

    pub fn cells(&self) -> impl Iterator<Item = &'a Cell> + 'a {
        let index = self.index;
        self.table.columns.iter().map(move |c| c.cell(index))
    }
}

impl Table {
    /// Table with `row_count` rows and no columns yet.
    #[must_use]
    pub const fn with_rows(row_count: usize) -> Self {
        Self {
            columns: Vec::new(),
            row_count,
        }
    }

    /// Build from columns, which must all be `row_count` long.
    ///
    /// # Panics
    ///
    /// Debug builds assert equal column lengths.
    #[must_use]
    pub fn from_columns(row_count: usize, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == row_count));
        Self { columns, row_count }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub(crate) fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Append a column, padding or truncating it to the row count.
    pub fn push_column(&mut self, name: impl Into<String>, mut cells: Vec<Cell>) {
        cells.resize(self.row_count, Cell::Null);
        self.columns.push(Column::new(name, cells));
    }

    pub(crate) fn remove_column(&mut self, index: usize) -> Column {
        self.columns.remove(index)
    }

    /// Prefix every column name with `prefix`.
    pub fn prefix_columns(&mut self, prefix: &str) {
        for column in &mut self.columns {
            column.name.insert_str(0, prefix);
        }
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        (index < self.row_count).then_some(RowView { table: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.row_count).map(move |index| RowView { table: self, index })
    }

    /// Column name to dtype, in column order.
    #[must_use]
    pub fn column_dtypes(&self) -> Vec<(&str, DataType)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.dtype()))
            .collect()
    }

    /// Rows as JSON objects keyed by column name, in column order.
    #[must_use]
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row.cells())
                    .map(|(column, cell)| (column.name.clone(), cell.to_json()))
                    .collect()
            })
            .collect()
    }

    /// Row-major CSV dump with a header row. Nulls are empty fields.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Csv`] if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), FrameError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.columns.iter().map(|c| c.name.as_str()))?;
        for row in self.rows() {
            csv.write_record(row.cells().map(ToString::to_string))?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
