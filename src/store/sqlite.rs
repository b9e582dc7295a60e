use crate::catalog::ColumnSchema;
use crate::codec::ScanBuffer;
use crate::sql::{QueryBuf, Value};
use crate::store::{ExecOutcome, RawColumn, Store};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow};
use sqlx::Row;

fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for p in params {
        query = match p {
            Value::Null => query.bind(None::<String>),
            Value::Integer(n) => query.bind(*n),
            Value::Text(s) => query.bind(s.clone()),
        };
    }
    query
}

fn scan(row: &SqliteRow, columns: &[ColumnSchema]) -> Result<Vec<ScanBuffer>, sqlx::Error> {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Ok(match ScanBuffer::for_column(c) {
                ScanBuffer::Integer(_) => ScanBuffer::Integer(row.try_get::<Option<i64>, _>(i)?),
                ScanBuffer::Text(_) => ScanBuffer::Text(row.try_get::<Option<String>, _>(i)?),
            })
        })
        .collect()
}

#[async_trait]
impl Store for SqlitePool {
    async fn table_names(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            r"SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\' ORDER BY name",
        )
        .fetch_all(self)
        .await
    }

    async fn describe(&self, table: &str) -> Result<Vec<RawColumn>, sqlx::Error> {
        let rows: Vec<(String, String, i64, i64)> = sqlx::query_as(
            r#"SELECT name, type, "notnull", pk FROM pragma_table_info(?) ORDER BY cid"#,
        )
        .bind(table)
        .fetch_all(self)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(name, data_type, not_null, pk)| RawColumn {
                name,
                data_type,
                is_primary_key: pk > 0,
                not_null: not_null != 0,
            })
            .collect())
    }

    async fn fetch(
        &self,
        q: &QueryBuf,
        columns: &[ColumnSchema],
    ) -> Result<Vec<Vec<ScanBuffer>>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_all(self)
            .await?;
        rows.iter().map(|r| scan(r, columns)).collect()
    }

    async fn execute(&self, q: &QueryBuf) -> Result<ExecOutcome, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = bind_all(sqlx::query(&q.sql), &q.params)
            .execute(self)
            .await?;
        Ok(ExecOutcome {
            rows_affected: done.rows_affected(),
            last_insert_id: u64::try_from(done.last_insert_rowid()).unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(self).await.map(|_| ())
    }
}
