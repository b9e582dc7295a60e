//! Payload validation against the table schema. Purely local: never touches the database.

use crate::catalog::{ColumnSchema, ColumnType, TableSchema};
use crate::codec::GenericRow;
use crate::error::AppError;
use crate::sql::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Check every schema field present in the payload. Fields unknown to the schema are ignored.
    /// Updates pass `forbid_key = true`: the key can never be rewritten.
    pub fn validate(
        schema: &TableSchema,
        payload: &GenericRow,
        forbid_key: bool,
    ) -> Result<(), AppError> {
        for column in &schema.columns {
            let Some(value) = payload.get(&column.name) else {
                continue;
            };
            if forbid_key && column.is_primary_key {
                return Err(AppError::invalid_field(&column.name));
            }
            validate_field(column, value)?;
        }
        Ok(())
    }
}

fn validate_field(column: &ColumnSchema, value: &Value) -> Result<(), AppError> {
    let ok = match value {
        Value::Null => !column.required,
        Value::Integer(_) => column.column_type == ColumnType::Integer,
        Value::Text(_) => column.column_type == ColumnType::Text,
    };
    if ok {
        Ok(())
    } else {
        Err(AppError::invalid_field(&column.name))
    }
}
