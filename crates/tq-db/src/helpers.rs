//! Row parsing helpers shared by the repositories.

use crate::error::DatabaseError;

/// Read an INTEGER column holding 0/1 as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read a nullable INTEGER column.
///
/// `row.get::<i64>(idx)` on a NULL column returns an error, so nullable
/// columns go through `Option<i64>`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_i64(row: &libsql::Row, idx: i32) -> Result<Option<i64>, DatabaseError> {
    Ok(row.get::<Option<i64>>(idx)?)
}

/// Store a `bool` as the INTEGER SQLite expects.
#[must_use]
pub fn bool_param(value: bool) -> i64 {
    i64::from(value)
}
