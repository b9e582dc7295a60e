use crate::catalog::ColumnSchema;
use crate::codec::ScanBuffer;
use crate::sql::{QueryBuf, Value};
use crate::store::{ExecOutcome, RawColumn, Store};
use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool, MySqlRow};
use sqlx::query::Query;
use sqlx::Row;

fn bind_all<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &[Value],
) -> Query<'q, MySql, MySqlArguments> {
    for p in params {
        query = match p {
            Value::Null => query.bind(None::<String>),
            Value::Integer(n) => query.bind(*n),
            Value::Text(s) => query.bind(s.clone()),
        };
    }
    query
}

/// Signed columns decode as i64; unsigned ones fall back to u64.
fn integer_at(row: &MySqlRow, i: usize) -> Result<Option<i64>, sqlx::Error> {
    match row.try_get::<Option<i64>, _>(i) {
        Ok(v) => Ok(v),
        Err(signed_err) => match row.try_get::<Option<u64>, _>(i) {
            Ok(v) => v
                .map(|n| i64::try_from(n).map_err(|e| sqlx::Error::Decode(Box::new(e))))
                .transpose(),
            Err(_) => Err(signed_err),
        },
    }
}

fn scan(row: &MySqlRow, columns: &[ColumnSchema]) -> Result<Vec<ScanBuffer>, sqlx::Error> {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Ok(match ScanBuffer::for_column(c) {
                ScanBuffer::Integer(_) => ScanBuffer::Integer(integer_at(row, i)?),
                ScanBuffer::Text(_) => ScanBuffer::Text(row.try_get::<Option<String>, _>(i)?),
            })
        })
        .collect()
}

#[async_trait]
impl Store for MySqlPool {
    async fn table_names(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT CAST(table_name AS CHAR) FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
        )
        .fetch_all(self)
        .await
    }

    async fn describe(&self, table: &str) -> Result<Vec<RawColumn>, sqlx::Error> {
        let rows: Vec<(String, String, i64, i64)> = sqlx::query_as(
            "SELECT CAST(column_name AS CHAR), CAST(data_type AS CHAR), \
                    CAST(column_key = 'PRI' AS SIGNED), CAST(is_nullable = 'NO' AS SIGNED) \
             FROM information_schema.columns \
             WHERE table_schema = DATABASE() AND table_name = ? \
             ORDER BY ordinal_position",
        )
        .bind(table)
        .fetch_all(self)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(name, data_type, is_key, not_null)| RawColumn {
                name,
                data_type,
                is_primary_key: is_key != 0,
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
            last_insert_id: done.last_insert_id(),
        })
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(self).await.map(|_| ())
    }
}
