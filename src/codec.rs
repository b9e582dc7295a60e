//! Row codec: nullable scan buffers to generic rows, and request bodies to generic rows.

use crate::catalog::{ColumnSchema, ColumnType, TableSchema};
use crate::error::AppError;
use crate::sql::Value;
use std::collections::BTreeMap;

/// Column name to value. Used for request payloads and response records alike.
pub type GenericRow = BTreeMap<String, Value>;

/// One nullable, typed slot per column, filled by the driver for a single fetched row.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanBuffer {
    Integer(Option<i64>),
    Text(Option<String>),
}

impl ScanBuffer {
    /// Empty buffer matching the column's declared type. Backends match on it to pick the
    /// decode type for each fetched cell.
    pub fn for_column(column: &ColumnSchema) -> Self {
        match column.column_type {
            ColumnType::Integer => ScanBuffer::Integer(None),
            ColumnType::Text => ScanBuffer::Text(None),
        }
    }

    fn into_value(self) -> Value {
        match self {
            ScanBuffer::Integer(Some(n)) => Value::Integer(n),
            ScanBuffer::Text(Some(s)) => Value::Text(s),
            ScanBuffer::Integer(None) | ScanBuffer::Text(None) => Value::Null,
        }
    }
}

/// Pair buffers with schema columns positionally.
pub fn decode_row(schema: &TableSchema, buffers: Vec<ScanBuffer>) -> GenericRow {
    schema
        .columns
        .iter()
        .zip(buffers)
        .map(|(c, b)| (c.name.clone(), b.into_value()))
        .collect()
}

/// Decode a request body into a generic row of schema fields. Unknown fields are dropped;
/// a schema field holding a JSON kind no column can store is rejected.
pub fn decode_payload(schema: &TableSchema, body: &[u8]) -> Result<GenericRow, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenericRow::new());
    }
    let json: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest("invalid json body".into()))?;
    let serde_json::Value::Object(map) = json else {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    };
    let mut row = GenericRow::new();
    for (name, v) in map {
        if schema.column(&name).is_none() {
            continue;
        }
        let value = Value::from_json(&v).ok_or_else(|| AppError::invalid_field(&name))?;
        row.insert(name, value);
    }
    Ok(row)
}
