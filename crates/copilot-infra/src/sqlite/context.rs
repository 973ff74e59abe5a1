//! SQLite storage context.
//!
//! Implements `StorageContext` from `copilot-core` for any serde entity.
//! Each context owns one table holding one JSON document per row:
//!
//! ```sql
//! CREATE TABLE "<table>" (
//!     id            TEXT PRIMARY KEY NOT NULL,
//!     partition_key TEXT NOT NULL,
//!     body          TEXT NOT NULL,
//!     created_at    TEXT NOT NULL,
//!     updated_at    TEXT NOT NULL
//! )
//! ```
//!
//! Every operation checks a connection out of the pool for its own duration:
//! reads go through the reader pool, writes run in a transaction on the
//! single writer connection. Dropping an uncommitted transaction rolls it
//! back, so early returns never leave partial writes behind.

use std::marker::PhantomData;

use chrono::Utc;
use copilot_core::storage::context::StorageContext;
use copilot_types::error::RepositoryError;
use copilot_types::storage::{validate_entity_id, StorageEntity};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::Row;
use tracing::{debug, warn};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `StorageContext` for entity type `T`.
pub struct SqliteStorageContext<T> {
    pool: DatabasePool,
    table: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> SqliteStorageContext<T>
where
    T: StorageEntity + Serialize + DeserializeOwned,
{
    /// Create a context over `table_name`, creating the table if needed.
    ///
    /// The table name must be a plain identifier. Table creation is best
    /// effort: a failure is logged and surfaces later on first use.
    pub async fn new(pool: DatabasePool, table_name: &str) -> Result<Self, RepositoryError> {
        validate_table_name(table_name)?;

        let context = Self {
            pool,
            table: table_name.to_string(),
            _entity: PhantomData,
        };

        if let Err(e) = context.ensure_table().await {
            warn!(table = %context.table, error = %e, "could not create storage table");
        }

        Ok(context)
    }

    async fn ensure_table(&self) -> Result<(), RepositoryError> {
        let sql = format!(
            r#"CREATE TABLE IF NOT EXISTS "{}" (
                id            TEXT PRIMARY KEY NOT NULL,
                partition_key TEXT NOT NULL,
                body          TEXT NOT NULL,
                created_at    TEXT NOT NULL,
                updated_at    TEXT NOT NULL
            )"#,
            self.table
        );

        sqlx::query(&sql)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    fn decode(&self, body: &str) -> Result<T, RepositoryError> {
        serde_json::from_str(body).map_err(|e| {
            RepositoryError::Serialization(format!("invalid row in {}: {e}", self.table))
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Accept ASCII identifiers (`[A-Za-z_][A-Za-z0-9_]*`) only.
///
/// The name is interpolated into SQL, so nothing else gets through.
pub fn validate_table_name(name: &str) -> Result<(), RepositoryError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(RepositoryError::InvalidTable(name.to_string()))
    }
}

fn encode<T: Serialize>(entity: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(entity)
        .map_err(|e| RepositoryError::Serialization(format!("failed to serialize entity: {e}")))
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(db.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepositoryError::Connection,
        other => RepositoryError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// StorageContext implementation
// ---------------------------------------------------------------------------

impl<T> StorageContext<T> for SqliteStorageContext<T>
where
    T: StorageEntity + Serialize + DeserializeOwned,
{
    async fn query_entities<P>(&self, predicate: P) -> Result<Vec<T>, RepositoryError>
    where
        P: Fn(&T) -> bool + Send + Sync,
    {
        let sql = format!(r#"SELECT body FROM "{}" ORDER BY rowid"#, self.table);

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        let mut entities = Vec::new();
        for row in &rows {
            let body: String = row.try_get("body").map_err(map_sqlx_error)?;
            let entity = self.decode(&body)?;
            if predicate(&entity) {
                entities.push(entity);
            }
        }

        Ok(entities)
    }

    async fn create(&self, entity: &T) -> Result<(), RepositoryError> {
        validate_entity_id(entity.id(), "entity.id")?;
        let body = encode(entity)?;
        let now = Utc::now().to_rfc3339();
        let sql = format!(
            r#"INSERT INTO "{}" (id, partition_key, body, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
            self.table
        );

        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;
        sqlx::query(&sql)
            .bind(entity.id())
            .bind(entity.partition())
            .bind(&body)
            .bind(&now)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(table = %self.table, id = %entity.id(), "entity created");
        Ok(())
    }

    async fn read(&self, entity_id: &str, _partition_key: &str) -> Result<T, RepositoryError> {
        validate_entity_id(entity_id, "entity_id")?;
        let sql = format!(r#"SELECT body FROM "{}" WHERE id = ?"#, self.table);

        let row = sqlx::query(&sql)
            .bind(entity_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let body: String = row.try_get("body").map_err(map_sqlx_error)?;
                self.decode(&body)
            }
            None => Err(RepositoryError::NotFound(entity_id.to_string())),
        }
    }

    async fn upsert(&self, entity: &T) -> Result<(), RepositoryError> {
        validate_entity_id(entity.id(), "entity.id")?;
        let body = encode(entity)?;
        let now = Utc::now().to_rfc3339();

        let exists_sql = format!(r#"SELECT 1 FROM "{}" WHERE id = ?"#, self.table);
        let update_sql = format!(
            r#"UPDATE "{}" SET partition_key = ?, body = ?, updated_at = ? WHERE id = ?"#,
            self.table
        );
        let insert_sql = format!(
            r#"INSERT INTO "{}" (id, partition_key, body, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
            self.table
        );

        // Existence check and write share the single writer transaction.
        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;
        let existing = sqlx::query(&exists_sql)
            .bind(entity.id())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if existing.is_some() {
            sqlx::query(&update_sql)
                .bind(entity.partition())
                .bind(&body)
                .bind(&now)
                .bind(entity.id())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        } else {
            sqlx::query(&insert_sql)
                .bind(entity.id())
                .bind(entity.partition())
                .bind(&body)
                .bind(&now)
                .bind(&now)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }
        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(
            table = %self.table,
            id = %entity.id(),
            updated = existing.is_some(),
            "entity upserted"
        );
        Ok(())
    }

    async fn delete(&self, entity: &T) -> Result<(), RepositoryError> {
        validate_entity_id(entity.id(), "entity.id")?;
        let sql = format!(r#"DELETE FROM "{}" WHERE id = ?"#, self.table);

        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;
        let result = sqlx::query(&sql)
            .bind(entity.id())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(
            table = %self.table,
            id = %entity.id(),
            removed = result.rows_affected(),
            "entity deleted"
        );
        Ok(())
    }
}
