//! Arrow `RecordBatch` export for columnar consumers.

use std::sync::Arc;

use arrow_array::types::Int32Type;
use arrow_array::{
    ArrayRef, BooleanArray, DictionaryArray, Float64Array, Int32Array, Int64Array, RecordBatch,
    StringArray, TimestampMicrosecondArray,
};
use arrow_schema::{DataType as ArrowType, Field, Schema, TimeUnit};

use crate::cell::{Cell, DataType};
use crate::column::{Column, ColumnData};
use crate::error::FrameError;
use crate::table::Table;

const UTC: &str = "UTC";

impl Table {
    /// Convert to an Arrow record batch, one nullable field per column.
    ///
    /// Dictionary columns become `Dictionary<Int32, Utf8>`; `object`
    /// columns become text.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Arrow`] if Arrow rejects the arrays.
    pub fn to_record_batch(&self) -> Result<RecordBatch, FrameError> {
        let mut fields = Vec::with_capacity(self.width());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.width());
        for column in self.columns() {
            let array = column_array(column)?;
            fields.push(Field::new(&column.name, array.data_type().clone(), true));
            arrays.push(array);
        }
        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
    }
}

fn column_array(column: &Column) -> Result<ArrayRef, FrameError> {
    if let ColumnData::Dictionary { values, keys } = &column.data {
        let keys: Int32Array = keys
            .iter()
            .map(|key| key.and_then(|k| i32::try_from(k).ok()))
            .collect();
        let values: ArrayRef = Arc::new(StringArray::from(
            values.iter().map(|v| Some(v.to_string())).collect::<Vec<_>>(),
        ));
        return Ok(Arc::new(DictionaryArray::<Int32Type>::try_new(keys, values)?));
    }

    let cells = column.cells();
    let array: ArrayRef = match column.dtype() {
        DataType::Int64 => Arc::new(
            cells
                .map(|c| match c {
                    Cell::Int(i) => Some(*i),
                    _ => None,
                })
                .collect::<Int64Array>(),
        ),
        DataType::Float64 => Arc::new(cells.map(Cell::as_f64).collect::<Float64Array>()),
        DataType::Bool => Arc::new(
            cells
                .map(|c| match c {
                    Cell::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<BooleanArray>(),
        ),
        DataType::DatetimeUtc => Arc::new(
            cells
                .map(|c| match c {
                    Cell::Timestamp(t) => Some(t.timestamp_micros()),
                    _ => None,
                })
                .collect::<TimestampMicrosecondArray>()
                .with_timezone(UTC),
        ),
        DataType::Object | DataType::Category => Arc::new(
            cells
                .map(|c| (!c.is_null()).then(|| c.to_string()))
                .collect::<StringArray>(),
        ),
    };
    Ok(array)
}

/// Arrow type a column of `dtype` exports as.
#[must_use]
pub fn arrow_type(dtype: DataType) -> ArrowType {
    match dtype {
        DataType::Int64 => ArrowType::Int64,
        DataType::Float64 => ArrowType::Float64,
        DataType::Bool => ArrowType::Boolean,
        DataType::DatetimeUtc => ArrowType::Timestamp(TimeUnit::Microsecond, Some(UTC.into())),
        DataType::Object => ArrowType::Utf8,
        DataType::Category => {
            ArrowType::Dictionary(Box::new(ArrowType::Int32), Box::new(ArrowType::Utf8))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::compact_memory;
    use arrow_array::Array;
    use chrono::{TimeZone, Utc};

    fn table() -> Table {
        let mut table = Table::with_rows(20);
        table.push_column("stop_id", (0..20).map(|i| Cell::Text(format!("s{i}"))).collect());
        table.push_column("stop_wheelchair_boarding", (0..20_i64).map(|i| Cell::Int(i % 2)).collect());
        table.push_column("stop_latitude", (0..20_i32).map(|i| Cell::Float(42.0 + f64::from(i))).collect());
        table.push_column(
            "stop_updated_at",
            vec![Cell::Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()); 20],
        );
        table
    }

    #[test]
    fn schema_follows_dtypes() {
        let batch = table().to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 20);
        let schema = batch.schema();
        for (field, dtype) in schema.fields().iter().zip(table().column_dtypes()) {
            assert_eq!(field.name(), dtype.0);
            assert_eq!(field.data_type(), &arrow_type(dtype.1));
        }
    }

    #[test]
    fn dictionary_columns_export_as_dictionaries() {
        let mut table = table();
        compact_memory(&mut table);
        let batch = table.to_record_batch().unwrap();
        let column = batch.column_by_name("stop_wheelchair_boarding").unwrap();
        assert_eq!(column.data_type(), &arrow_type(DataType::Category));

        let dict = column
            .as_any()
            .downcast_ref::<DictionaryArray<Int32Type>>()
            .unwrap();
        let values = dict.values().as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(values.value(0), "0");
        assert_eq!(values.value(1), "1");
    }

    #[test]
    fn nulls_are_preserved() {
        let mut table = Table::with_rows(2);
        table.push_column("route_color", vec![Cell::Text("DA291C".into()), Cell::Null]);
        let batch = table.to_record_batch().unwrap();
        assert_eq!(batch.column(0).null_count(), 1);
    }
}
