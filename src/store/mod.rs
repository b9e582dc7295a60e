//! Database capability used by the catalog loader and the CRUD service.
//! Backends: MySQL (`mysql://...`) and SQLite (`sqlite:...`). Both take positional `?` placeholders.

mod mysql;
mod sqlite;

use crate::catalog::ColumnSchema;
use crate::codec::ScanBuffer;
use crate::error::SchemaError;
use crate::sql::QueryBuf;
use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

/// Column metadata as reported by the database, before type mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub data_type: String,
    pub is_primary_key: bool,
    pub not_null: bool,
}

/// Result of a write statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Base table names, ordered by name.
    async fn table_names(&self) -> Result<Vec<String>, sqlx::Error>;

    /// Columns of one table in ordinal order.
    async fn describe(&self, table: &str) -> Result<Vec<RawColumn>, sqlx::Error>;

    /// Run a SELECT and fill one scan buffer per column, in `columns` order.
    async fn fetch(
        &self,
        q: &QueryBuf,
        columns: &[ColumnSchema],
    ) -> Result<Vec<Vec<ScanBuffer>>, sqlx::Error>;

    async fn execute(&self, q: &QueryBuf) -> Result<ExecOutcome, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// Open a pool for the backend named by the url scheme.
/// In-memory SQLite is held on a single connection so every request sees the same database.
pub async fn connect(url: &str, max_connections: u32) -> Result<Arc<dyn Store>, SchemaError> {
    if url.starts_with("mysql:") {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(SchemaError::Connect)?;
        Ok(Arc::new(pool))
    } else if url.starts_with("sqlite:") {
        let options = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };
        let pool = options.connect(url).await.map_err(SchemaError::Connect)?;
        Ok(Arc::new(pool))
    } else {
        Err(SchemaError::UnsupportedUrl(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let err = connect("postgres://localhost/db", 1).await.err().unwrap();
        assert!(matches!(err, SchemaError::UnsupportedUrl(_)));
    }
}
