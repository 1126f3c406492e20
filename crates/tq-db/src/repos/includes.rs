//! Include option repository. Owners live in `include_option_owners`.

use std::collections::HashMap;

use tq_core::IncludeOption;

use crate::TqDb;
use crate::error::DatabaseError;
use crate::helpers::get_opt_i64;

fn row_to_include(row: &libsql::Row) -> Result<IncludeOption, DatabaseError> {
    Ok(IncludeOption {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        associated_resource: get_opt_i64(row, 2)?,
        included_by: Vec::new(),
    })
}

/// Owner lists keyed by include option id, in insertion order.
async fn select_owners(conn: &libsql::Connection) -> Result<HashMap<i64, Vec<i64>>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT include_option_id, resource_type_id FROM include_option_owners
             ORDER BY include_option_id, position",
            (),
        )
        .await?;
    let mut owners: HashMap<i64, Vec<i64>> = HashMap::new();
    while let Some(row) = rows.next().await? {
        owners
            .entry(row.get::<i64>(0)?)
            .or_default()
            .push(row.get::<i64>(1)?);
    }
    Ok(owners)
}

async fn collect_with_owners(
    conn: &libsql::Connection,
    mut rows: libsql::Rows,
) -> Result<Vec<IncludeOption>, DatabaseError> {
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(row_to_include(&row)?);
    }
    let mut owners = select_owners(conn).await?;
    for include in &mut out {
        include.included_by = owners.remove(&include.id).unwrap_or_default();
    }
    Ok(out)
}

pub(crate) async fn select_all(conn: &libsql::Connection) -> Result<Vec<IncludeOption>, DatabaseError> {
    let rows = conn
        .query(
            "SELECT id, name, associated_resource_id FROM include_options ORDER BY id",
            (),
        )
        .await?;
    collect_with_owners(conn, rows).await
}

pub(crate) async fn insert(
    conn: &libsql::Connection,
    include: &IncludeOption,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO include_options (id, name, associated_resource_id) VALUES (?1, ?2, ?3)",
        libsql::params![include.id, include.name.as_str(), include.associated_resource],
    )
    .await?;

    for (position, owner) in (0_i64..).zip(&include.included_by) {
        conn.execute(
            "INSERT INTO include_option_owners (include_option_id, resource_type_id, position)
             VALUES (?1, ?2, ?3)",
            libsql::params![include.id, *owner, position],
        )
        .await?;
    }
    Ok(())
}

impl TqDb {
    /// Include options advertised by a resource type, in id order.
    pub async fn list_includes_for(
        &self,
        resource_type_id: i64,
    ) -> Result<Vec<IncludeOption>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                "SELECT i.id, i.name, i.associated_resource_id
                 FROM include_options i
                 JOIN include_option_owners o ON o.include_option_id = i.id
                 WHERE o.resource_type_id = ?1
                 ORDER BY i.id",
                libsql::params![resource_type_id],
            )
            .await?;
        collect_with_owners(self.conn(), rows).await
    }
}
