//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. `DatabasePool` pairs a
//! multi-connection read-only pool for SELECTs with a single-connection
//! writer pool, so every write transaction is serialized. Connections are
//! checked out per operation and returned when the operation ends.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection pool (up to 8) for concurrent SELECT queries.
/// - `writer`: Single-connection pool for serialized INSERT/UPDATE/DELETE.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the database at `database_url`, creating the file if missing.
    ///
    /// Both pools use WAL journal mode, foreign key enforcement, and a
    /// 5-second busy timeout. Tables are created by the storage contexts.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        // Writer first so the file exists before read-only connections open it.
        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(read_opts)
            .await?;

        tracing::debug!(url = %database_url, "database pool ready");

        Ok(Self { reader, writer })
    }

    /// Close both pools, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.writer.close().await;
        self.reader.close().await;
    }
}

/// Database URL for `{data_dir}/{database}.db`.
pub fn default_database_url(data_dir: &Path, database: &str) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join(format!("{database}.db")).display()
    )
}
