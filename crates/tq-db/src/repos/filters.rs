//! Filter definition repository.

use tq_core::FilterDefinition;

use crate::TqDb;
use crate::error::DatabaseError;
use crate::helpers::get_opt_i64;

const SELECT: &str = "SELECT id, resource_type_id, name, associated_resource_id
     FROM filter_definitions";

fn row_to_filter(row: &libsql::Row) -> Result<FilterDefinition, DatabaseError> {
    Ok(FilterDefinition {
        id: row.get::<i64>(0)?,
        for_resource: row.get::<i64>(1)?,
        name: row.get::<String>(2)?,
        associated_resource: get_opt_i64(row, 3)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<FilterDefinition>, DatabaseError> {
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(row_to_filter(&row)?);
    }
    Ok(out)
}

pub(crate) async fn select_all(
    conn: &libsql::Connection,
) -> Result<Vec<FilterDefinition>, DatabaseError> {
    collect(conn.query(&format!("{SELECT} ORDER BY id"), ()).await?).await
}

pub(crate) async fn insert(
    conn: &libsql::Connection,
    filter: &FilterDefinition,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO filter_definitions (id, resource_type_id, name, associated_resource_id)
         VALUES (?1, ?2, ?3, ?4)",
        libsql::params![
            filter.id,
            filter.for_resource,
            filter.name.as_str(),
            filter.associated_resource
        ],
    )
    .await?;
    Ok(())
}

impl TqDb {
    pub async fn list_filters_for(
        &self,
        resource_type_id: i64,
    ) -> Result<Vec<FilterDefinition>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!("{SELECT} WHERE resource_type_id = ?1 ORDER BY id"),
                libsql::params![resource_type_id],
            )
            .await?;
        collect(rows).await
    }
}
