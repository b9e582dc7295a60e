//! Tagged values exchanged between client payloads, bound parameters and fetched rows.

use crate::catalog::ColumnType;
use serde::Serialize;

/// A value that can be bound to a statement or returned in a record.
/// Serializes as a bare JSON null, number or string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl Value {
    /// Convert a JSON value. Returns None for JSON kinds no column can hold
    /// (floats, booleans, arrays, objects).
    pub fn from_json(v: &serde_json::Value) -> Option<Self> {
        match v {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Number(n) => n.as_i64().map(Value::Integer),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            _ => None,
        }
    }

    /// Id taken from a URL segment. Integer keys get an integer parameter when the segment parses;
    /// anything else is bound as text and compared by the database.
    pub fn from_path_segment(column_type: ColumnType, raw: &str) -> Self {
        match column_type {
            ColumnType::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(raw.to_string())),
            ColumnType::Text => Value::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
