//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::TqDb;
use crate::error::DatabaseError;

/// Metamodel schema: 5 tables, 3 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_metamodel.sql");

impl TqDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_metamodel: {e}")))?;
        Ok(())
    }
}
