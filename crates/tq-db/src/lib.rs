//! # tq-db
//!
//! libSQL-backed metamodel store for transitq.
//!
//! Holds the resource types, include options, filter definitions and
//! attribute definitions derived from the remote API's Swagger document.
//! Initialization runs introspection inside a single `BEGIN IMMEDIATE`
//! transaction, so concurrent first runs cannot insert duplicate rows.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

use std::path::Path;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};
use tq_core::Metamodel;
use tq_core::metamodel::MetamodelCounts;
use tq_schema::{ApiDoc, IntrospectionReport, NamingVocabulary};

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Handle to the metamodel database.
pub struct TqDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl TqDb {
    /// Open a local database at `path`, creating parent directories.
    ///
    /// Runs migrations automatically. `":memory:"` opens a private
    /// in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:"
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Other(anyhow::anyhow!(
                    "creating store directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        // PRAGMA busy_timeout answers with a row, so it goes through query().
        conn.query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;

        let tq_db = Self { db, conn };
        tq_db.run_migrations().await?;
        tracing::debug!(path, "opened metamodel store");
        Ok(tq_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Read the whole metamodel into memory, every collection in id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query or row conversion fails.
    pub async fn load_metamodel(&self) -> Result<Metamodel, DatabaseError> {
        load_metamodel(&self.conn).await
    }

    /// Populate the metamodel from `doc` unless it is already populated.
    ///
    /// Loading, derivation and insertion share one `BEGIN IMMEDIATE`
    /// transaction: a second process blocks on the write lock until the
    /// first commits, then finds every kind present and does nothing.
    /// On any error the transaction is rolled back.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started,
    /// a read or insert fails, or the commit fails.
    pub async fn ensure_initialized(
        &self,
        doc: &ApiDoc,
        vocabulary: &NamingVocabulary,
    ) -> Result<IntrospectionReport, DatabaseError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;

        let outcome = async {
            let mut model = load_metamodel(&tx).await?;
            let before = model.counts();
            let report = tq_schema::introspect(doc, &mut model, vocabulary);
            persist_new(&tx, &model, before).await?;
            Ok::<_, DatabaseError>(report)
        }
        .await;

        match outcome {
            Ok(report) => {
                tx.commit().await?;
                Ok(report)
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(%rollback, "rollback after failed initialization");
                }
                Err(error)
            }
        }
    }
}

async fn load_metamodel(conn: &libsql::Connection) -> Result<Metamodel, DatabaseError> {
    Ok(Metamodel {
        resource_types: repos::resource_types::select_all(conn).await?,
        include_options: repos::includes::select_all(conn).await?,
        filters: repos::filters::select_all(conn).await?,
        attributes: repos::attributes::select_all(conn).await?,
    })
}

/// Insert the entities appended to `model` after `before` was taken.
async fn persist_new(
    conn: &libsql::Connection,
    model: &Metamodel,
    before: MetamodelCounts,
) -> Result<(), DatabaseError> {
    for resource_type in &model.resource_types[before.resource_types..] {
        repos::resource_types::insert(conn, resource_type).await?;
    }
    for include in &model.include_options[before.include_options..] {
        repos::includes::insert(conn, include).await?;
    }
    for filter in &model.filters[before.filters..] {
        repos::filters::insert(conn, filter).await?;
    }
    for attribute in &model.attributes[before.attributes..] {
        repos::attributes::insert(conn, attribute).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn test_db() -> TqDb {
        TqDb::open_local(":memory:").await.unwrap()
    }

    fn small_doc() -> ApiDoc {
        ApiDoc::from_value(json!({
            "paths": {
                "/stops": {"get": {"tags": ["Stop"], "description": "List stops.", "parameters": [
                    {"name": "include", "description": "Relationships.\n\n* `route`\n* `parent_station`"},
                    {"name": "filter[id]"},
                    {"name": "filter[route]"}
                ]}},
                "/stops/{id}": {"get": {"tags": ["Stop"]}},
                "/routes": {"get": {"tags": ["Route"], "description": "List routes."}}
            },
            "definitions": {
                "StopResource": {"properties": {"attributes": {"properties": {
                    "name": {"type": "string"},
                    "wheelchair_boarding": {"type": "integer", "enum": [0, 1, 2], "minimum": 0}
                }}}},
                "RouteResource": {"properties": {"attributes": {"properties": {
                    "long_name": {"type": "string", "required": true}
                }}}}
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let tables = [
            "resource_types",
            "include_options",
            "include_option_owners",
            "filter_definitions",
            "attribute_definitions",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn empty_store_loads_empty_metamodel() {
        let db = test_db().await;
        assert!(db.load_metamodel().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn initialization_round_trips_through_the_store() {
        let db = test_db().await;
        let mut expected = Metamodel::default();
        tq_schema::introspect(&small_doc(), &mut expected, &NamingVocabulary::default());

        let report = db
            .ensure_initialized(&small_doc(), &NamingVocabulary::default())
            .await
            .unwrap();
        assert_eq!(report.created, expected.counts());

        let loaded = db.load_metamodel().await.unwrap();
        assert_eq!(loaded, expected);
    }

    #[tokio::test]
    async fn second_initialization_inserts_nothing() {
        let db = test_db().await;
        let vocabulary = NamingVocabulary::default();
        db.ensure_initialized(&small_doc(), &vocabulary).await.unwrap();
        let first = db.load_metamodel().await.unwrap();

        let report = db.ensure_initialized(&small_doc(), &vocabulary).await.unwrap();
        assert!(report.is_noop());
        assert_eq!(db.load_metamodel().await.unwrap(), first);
    }

    #[tokio::test]
    async fn failed_insert_rolls_back() {
        let db = test_db().await;
        let mut model = Metamodel::default();
        tq_schema::introspect(&small_doc(), &mut model, &NamingVocabulary::default());
        // Filter pointing at a resource type that does not exist.
        model.filters[0].for_resource = 999;

        let tx = db
            .conn()
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await
            .unwrap();
        let result = persist_new(&tx, &model, MetamodelCounts::default()).await;
        assert!(result.is_err());
        tx.rollback().await.unwrap();

        assert!(db.load_metamodel().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resource_types_list_by_name() {
        let db = test_db().await;
        db.ensure_initialized(&small_doc(), &NamingVocabulary::default())
            .await
            .unwrap();

        let names: Vec<_> = db
            .list_resource_types()
            .await
            .unwrap()
            .into_iter()
            .map(|rt| rt.name)
            .collect();
        assert_eq!(names, vec!["Route", "Stop"]);

        let stop = db.get_resource_type_by_name("Stop").await.unwrap();
        assert!(stop.can_specify_id);
        assert!(matches!(
            db.get_resource_type_by_name("Bus").await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn per_resource_queries() {
        let db = test_db().await;
        db.ensure_initialized(&small_doc(), &NamingVocabulary::default())
            .await
            .unwrap();
        let stop = db.get_resource_type_by_name("Stop").await.unwrap();
        let route = db.get_resource_type_by_name("Route").await.unwrap();

        let includes = db.list_includes_for(stop.id).await.unwrap();
        let names: Vec<_> = includes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["route", "parent_station"]);
        assert_eq!(includes[0].associated_resource, Some(route.id));
        assert_eq!(includes[0].included_by, vec![stop.id]);
        assert!(db.list_includes_for(route.id).await.unwrap().is_empty());

        let filters = db.list_filters_for(stop.id).await.unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].associated_resource, Some(stop.id));

        let attributes = db.list_attributes_for(stop.id).await.unwrap();
        let wheelchair = attributes
            .iter()
            .find(|a| a.name == "wheelchair_boarding")
            .unwrap();
        assert_eq!(wheelchair.choices(), vec![json!(0), json!(1), json!(2)]);
        assert_eq!(wheelchair.minimum, Some(0));

        let route_attributes = db.list_attributes_for(route.id).await.unwrap();
        assert!(route_attributes[0].required);
    }
}
