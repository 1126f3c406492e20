//! Resource type repository.

use tq_core::ResourceType;

use crate::TqDb;
use crate::error::DatabaseError;
use crate::helpers::{bool_param, get_bool};

const SELECT: &str = "SELECT id, path, name, description, can_specify_id, requires_filters
     FROM resource_types";

fn row_to_resource_type(row: &libsql::Row) -> Result<ResourceType, DatabaseError> {
    Ok(ResourceType {
        id: row.get::<i64>(0)?,
        path: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        description: row.get::<String>(3)?,
        can_specify_id: get_bool(row, 4)?,
        requires_filters: get_bool(row, 5)?,
    })
}

/// All resource types in id (creation) order.
pub(crate) async fn select_all(conn: &libsql::Connection) -> Result<Vec<ResourceType>, DatabaseError> {
    let mut rows = conn.query(&format!("{SELECT} ORDER BY id"), ()).await?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(row_to_resource_type(&row)?);
    }
    Ok(out)
}

pub(crate) async fn insert(
    conn: &libsql::Connection,
    resource_type: &ResourceType,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO resource_types (id, path, name, description, can_specify_id, requires_filters)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        libsql::params![
            resource_type.id,
            resource_type.path.as_str(),
            resource_type.name.as_str(),
            resource_type.description.as_str(),
            bool_param(resource_type.can_specify_id),
            bool_param(resource_type.requires_filters)
        ],
    )
    .await?;
    Ok(())
}

impl TqDb {
    /// All resource types, ordered by name.
    pub async fn list_resource_types(&self) -> Result<Vec<ResourceType>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("{SELECT} ORDER BY name"), ())
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(row_to_resource_type(&row)?);
        }
        Ok(out)
    }

    pub async fn get_resource_type_by_name(&self, name: &str) -> Result<ResourceType, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("{SELECT} WHERE name = ?1"), [name])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_resource_type(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: i64, name: &str) -> ResourceType {
        ResourceType {
            id,
            path: "/stops".into(),
            name: name.into(),
            description: String::new(),
            can_specify_id: true,
            requires_filters: false,
        }
    }

    #[tokio::test]
    async fn endpoint_paths_are_unique() {
        let db = TqDb::open_local(":memory:").await.unwrap();
        insert(db.conn(), &stop(1, "Stop")).await.unwrap();

        let duplicate = insert(db.conn(), &stop(2, "Station")).await;
        assert!(duplicate.is_err());
        assert_eq!(select_all(db.conn()).await.unwrap().len(), 1);
    }
}
