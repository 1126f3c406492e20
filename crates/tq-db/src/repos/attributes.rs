//! Attribute definition repository.

use tq_core::AttributeDefinition;

use crate::TqDb;
use crate::error::DatabaseError;
use crate::helpers::{bool_param, get_bool, get_opt_i64};

const SELECT: &str = "SELECT id, resource_type_id, name, description, required, data_type,
            default_value, example, minimum, choices, data_format
     FROM attribute_definitions";

fn row_to_attribute(row: &libsql::Row) -> Result<AttributeDefinition, DatabaseError> {
    Ok(AttributeDefinition {
        id: row.get::<i64>(0)?,
        for_resource: row.get::<i64>(1)?,
        name: row.get::<String>(2)?,
        description: row.get::<String>(3)?,
        required: get_bool(row, 4)?,
        data_type: row.get::<String>(5)?,
        default: row.get::<String>(6)?,
        example: row.get::<String>(7)?,
        minimum: get_opt_i64(row, 8)?,
        choices: row.get::<String>(9)?,
        data_format: row.get::<String>(10)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<AttributeDefinition>, DatabaseError> {
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(row_to_attribute(&row)?);
    }
    Ok(out)
}

pub(crate) async fn select_all(
    conn: &libsql::Connection,
) -> Result<Vec<AttributeDefinition>, DatabaseError> {
    collect(conn.query(&format!("{SELECT} ORDER BY id"), ()).await?).await
}

pub(crate) async fn insert(
    conn: &libsql::Connection,
    attribute: &AttributeDefinition,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO attribute_definitions
             (id, resource_type_id, name, description, required, data_type,
              default_value, example, minimum, choices, data_format)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        libsql::params![
            attribute.id,
            attribute.for_resource,
            attribute.name.as_str(),
            attribute.description.as_str(),
            bool_param(attribute.required),
            attribute.data_type.as_str(),
            attribute.default.as_str(),
            attribute.example.as_str(),
            attribute.minimum,
            attribute.choices.as_str(),
            attribute.data_format.as_str()
        ],
    )
    .await?;
    Ok(())
}

impl TqDb {
    /// Attribute definitions of a resource type, in document order.
    pub async fn list_attributes_for(
        &self,
        resource_type_id: i64,
    ) -> Result<Vec<AttributeDefinition>, DatabaseError> {
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
