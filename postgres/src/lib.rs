//! `PostgreSQL` record store implementation for hxtodo.
//!
//! This crate provides a durable `RecordStore` backed by a single
//! `records` table:
//!
//! ```sql
//! CREATE TABLE records (
//!     namespace TEXT NOT NULL,
//!     id TEXT COLLATE "C" NOT NULL,
//!     value BYTEA NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     PRIMARY KEY (namespace, id)
//! );
//! ```
//!
//! Ids use the `"C"` collation so prefix scans come back in byte order,
//! independent of the database locale.
//!
//! # Example
//!
//! ```ignore
//! use hxtodo_postgres::PostgresRecordStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresRecordStore::connect("postgres://localhost/hxtodo", 10, 30).await?;
//!     store.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use hxtodo_core::store::{Entry, ListSelector, RecordKey, RecordStore, StoreError, StoreFuture};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// PostgreSQL-backed record store.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

/// Map a sqlx failure onto the store error taxonomy.
fn map_sqlx_error(error: sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(error.to_string())
        },
        other => StoreError::Backend(other.to_string()),
    }
}

impl PostgresRecordStore {
    /// Create a store using an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a new pool.
    ///
    /// # Arguments
    ///
    /// - `database_url`: `PostgreSQL` connection string
    /// - `max_connections`: pool size
    /// - `connect_timeout_secs`: how long to wait for a connection
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the database cannot be reached.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    /// Create the `records` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl RecordStore for PostgresRecordStore {
    fn get<'a>(&'a self, key: &'a RecordKey) -> StoreFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move {
            let row: Option<(Vec<u8>,)> =
                sqlx::query_as("SELECT value FROM records WHERE namespace = $1 AND id = $2")
                    .bind(key.namespace())
                    .bind(key.id())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

            metrics::counter!("record_store.postgres.operations", "operation" => "get")
                .increment(1);
            Ok(row.map(|(value,)| value))
        })
    }

    fn set<'a>(&'a self, key: &'a RecordKey, value: Vec<u8>) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let result = sqlx::query(
                "INSERT INTO records (namespace, id, value, updated_at)
                 VALUES ($1, $2, $3, now())
                 ON CONFLICT (namespace, id) DO UPDATE
                 SET value = EXCLUDED.value, updated_at = now()",
            )
            .bind(key.namespace())
            .bind(key.id())
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

            if result.rows_affected() != 1 {
                tracing::warn!(
                    key = %key,
                    rows_affected = result.rows_affected(),
                    "Record write not acknowledged"
                );
                return Err(StoreError::WriteRejected {
                    key: key.clone(),
                    reason: format!("{} rows affected", result.rows_affected()),
                });
            }

            metrics::counter!("record_store.postgres.operations", "operation" => "set")
                .increment(1);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a RecordKey) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            sqlx::query("DELETE FROM records WHERE namespace = $1 AND id = $2")
                .bind(key.namespace())
                .bind(key.id())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            metrics::counter!("record_store.postgres.operations", "operation" => "delete")
                .increment(1);
            Ok(())
        })
    }

    fn list<'a>(&'a self, selector: &'a ListSelector) -> StoreFuture<'a, Vec<Entry>> {
        Box::pin(async move {
            // LIMIT NULL means no limit.
            let limit = selector
                .max_entries()
                .map(|n| i64::try_from(n).unwrap_or(i64::MAX));
            let query = if selector.is_reverse() {
                "SELECT id, value FROM records WHERE namespace = $1 ORDER BY id DESC LIMIT $2"
            } else {
                "SELECT id, value FROM records WHERE namespace = $1 ORDER BY id ASC LIMIT $2"
            };

            let rows: Vec<(String, Vec<u8>)> = sqlx::query_as(query)
                .bind(selector.namespace())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            metrics::counter!("record_store.postgres.operations", "operation" => "list")
                .increment(1);
            Ok(rows
                .into_iter()
                .map(|(id, value)| Entry {
                    key: RecordKey::new(selector.namespace(), id),
                    value,
                })
                .collect())
        })
    }
}
