//! Generic CRUD execution: build the statement, run it, decode the rows.

use crate::catalog::TableSchema;
use crate::codec::{decode_row, GenericRow};
use crate::error::AppError;
use crate::sql::{delete, insert, select_by_key, select_list, update, Page};
use crate::store::Store;

/// What an insert produced: the generated key when the table has one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Created {
    Key { name: String, id: u64 },
    Rows(u64),
}

pub struct CrudService;

impl CrudService {
    /// List one page of rows.
    pub async fn list(
        store: &dyn Store,
        schema: &TableSchema,
        page: Page,
    ) -> Result<Vec<GenericRow>, AppError> {
        let q = select_list(schema, page);
        let rows = store.fetch(&q, &schema.columns).await?;
        Ok(rows.into_iter().map(|b| decode_row(schema, b)).collect())
    }

    /// Fetch one row by key. A missing row is RecordNotFound, not a database error.
    pub async fn read(
        store: &dyn Store,
        schema: &TableSchema,
        id: &str,
    ) -> Result<GenericRow, AppError> {
        let q = select_by_key(schema, id)?;
        let row = store
            .fetch(&q, &schema.columns)
            .await?
            .into_iter()
            .next()
            .ok_or(AppError::RecordNotFound)?;
        Ok(decode_row(schema, row))
    }

    pub async fn create(
        store: &dyn Store,
        schema: &TableSchema,
        payload: &GenericRow,
    ) -> Result<Created, AppError> {
        let q = insert(schema, payload);
        let done = store.execute(&q).await?;
        Ok(match &schema.key {
            Some(name) => Created::Key {
                name: name.clone(),
                id: done.last_insert_id,
            },
            None => Created::Rows(done.rows_affected),
        })
    }

    /// Update one row by key. Returns the affected row count.
    pub async fn update(
        store: &dyn Store,
        schema: &TableSchema,
        id: &str,
        payload: &GenericRow,
    ) -> Result<u64, AppError> {
        let q = update(schema, id, payload)?;
        Ok(store.execute(&q).await?.rows_affected)
    }

    /// Delete one row by key. Returns the affected row count.
    pub async fn delete(store: &dyn Store, schema: &TableSchema, id: &str) -> Result<u64, AppError> {
        let q = delete(schema, id)?;
        Ok(store.execute(&q).await?.rows_affected)
    }
}
