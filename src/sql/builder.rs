//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table schema.

use crate::catalog::TableSchema;
use crate::codec::GenericRow;
use crate::error::AppError;
use crate::sql::Value;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: u64 = 5;
pub const DEFAULT_OFFSET: u64 = 0;

/// Quote identifier for MySQL/SQLite (safe: only from the catalog).
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) {
        self.params.push(v);
    }
}

/// Page window for list queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Page {
    /// Read `limit` and `offset` from query params; missing, non-numeric, negative or
    /// out-of-range values use defaults.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Page {
            limit: window_param(params, "limit", DEFAULT_LIMIT),
            offset: window_param(params, "offset", DEFAULT_OFFSET),
        }
    }
}

/// Bounded by i64 so the literal stays an integer for every backend.
fn window_param(params: &HashMap<String, String>, name: &str, default: u64) -> u64 {
    params
        .get(name)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(default)
}

/// SELECT list: the catalog columns in ordinal order, so fetched rows line up with the schema.
fn select_column_list(schema: &TableSchema) -> String {
    schema
        .columns
        .iter()
        .map(|c| quoted(&c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT page of rows, ordered by key when the table has one.
pub fn select_list(schema: &TableSchema, page: Page) -> QueryBuf {
    let mut q = QueryBuf::new();
    let order_clause = schema
        .key
        .as_deref()
        .map(|k| format!(" ORDER BY {}", quoted(k)))
        .unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {}{} LIMIT {} OFFSET {}",
        select_column_list(schema),
        quoted(&schema.name),
        order_clause,
        page.limit,
        page.offset
    );
    q
}

/// SELECT by primary key; id is the sole param.
pub fn select_by_key(schema: &TableSchema, id: &str) -> Result<QueryBuf, AppError> {
    let key = schema.key_column()?;
    let mut q = QueryBuf::new();
    q.push_param(Value::from_path_segment(key.column_type, id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list(schema),
        quoted(&schema.name),
        quoted(&key.name)
    );
    Ok(q)
}

/// INSERT every non-key column. Missing optional columns get NULL, missing required ones
/// the zero value of their type. The key is generated by the database.
pub fn insert(schema: &TableSchema, payload: &GenericRow) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in &schema.columns {
        if schema.is_key(&c.name) {
            continue;
        }
        let val = match payload.get(&c.name) {
            Some(v) if !v.is_null() => v.clone(),
            _ if c.required => c.column_type.zero_value(),
            _ => Value::Null,
        };
        q.push_param(val);
        cols.push(quoted(&c.name));
        placeholders.push("?");
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(&schema.name),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id: SET only schema columns present in the payload; id is the last param.
pub fn update(schema: &TableSchema, id: &str, payload: &GenericRow) -> Result<QueryBuf, AppError> {
    let key = schema.key_column()?;
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in &schema.columns {
        if c.name == key.name {
            continue;
        }
        let Some(v) = payload.get(&c.name) else { continue };
        q.push_param(v.clone());
        sets.push(format!("{} = ?", quoted(&c.name)));
    }
    if sets.is_empty() {
        return Err(AppError::Validation("no fields to update".into()));
    }
    q.push_param(Value::from_path_segment(key.column_type, id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(&schema.name),
        sets.join(", "),
        quoted(&key.name)
    );
    Ok(q)
}

/// DELETE by id.
pub fn delete(schema: &TableSchema, id: &str) -> Result<QueryBuf, AppError> {
    let key = schema.key_column()?;
    let mut q = QueryBuf::new();
    q.push_param(Value::from_path_segment(key.column_type, id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(&schema.name),
        quoted(&key.name)
    );
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnSchema, ColumnType};

    fn items() -> TableSchema {
        let col = |name: &str, column_type, required, is_primary_key| ColumnSchema {
            name: String::from(name),
            column_type,
            required,
            is_primary_key,
        };
        TableSchema {
            name: "items".into(),
            key: Some("id".into()),
            columns: vec![
                col("id", ColumnType::Integer, true, true),
                col("title", ColumnType::Text, true, false),
                col("stock", ColumnType::Integer, true, false),
                col("note", ColumnType::Text, false, false),
            ],
        }
    }

    fn keyless() -> TableSchema {
        TableSchema {
            key: None,
            name: "log".into(),
            columns: vec![ColumnSchema {
                name: "line".into(),
                column_type: ColumnType::Text,
                required: false,
                is_primary_key: false,
            }],
        }
    }

    fn payload(entries: &[(&str, Value)]) -> GenericRow {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_page_defaults_and_fallback() {
        let mut params = HashMap::new();
        assert_eq!(Page::from_query(&params), Page { limit: 5, offset: 0 });
        params.insert("limit".to_string(), "2".to_string());
        params.insert("offset".to_string(), "1".to_string());
        assert_eq!(Page::from_query(&params), Page { limit: 2, offset: 1 });
        params.insert("limit".to_string(), "many".to_string());
        params.insert("offset".to_string(), "-3".to_string());
        assert_eq!(Page::from_query(&params), Page { limit: 5, offset: 0 });
    }

    #[test]
    fn test_page_rejects_values_beyond_i64() {
        let mut params = HashMap::new();
        params.insert("limit".to_string(), "18446744073709551615".to_string());
        params.insert("offset".to_string(), "9223372036854775808".to_string());
        assert_eq!(Page::from_query(&params), Page { limit: 5, offset: 0 });

        params.insert("limit".to_string(), "9223372036854775807".to_string());
        assert_eq!(Page::from_query(&params).limit, i64::MAX as u64);
    }

    #[test]
    fn test_select_list() {
        let q = select_list(&items(), Page { limit: 2, offset: 1 });
        assert_eq!(
            q.sql,
            "SELECT `id`, `title`, `stock`, `note` FROM `items` ORDER BY `id` LIMIT 2 OFFSET 1"
        );
        assert!(q.params.is_empty());

        let q = select_list(&keyless(), Page::default());
        assert_eq!(q.sql, "SELECT `line` FROM `log` LIMIT 5 OFFSET 0");
    }

    #[test]
    fn test_select_by_key() {
        let q = select_by_key(&items(), "3").unwrap();
        assert_eq!(
            q.sql,
            "SELECT `id`, `title`, `stock`, `note` FROM `items` WHERE `id` = ?"
        );
        assert_eq!(q.params, vec![Value::Integer(3)]);
    }

    #[test]
    fn test_insert_fills_defaults() {
        let q = insert(&items(), &payload(&[("title", Value::Text("db".into())), ("id", Value::Integer(9))]));
        assert_eq!(
            q.sql,
            "INSERT INTO `items` (`title`, `stock`, `note`) VALUES (?, ?, ?)"
        );
        assert_eq!(
            q.params,
            vec![Value::Text("db".into()), Value::Integer(0), Value::Null]
        );
    }

    #[test]
    fn test_insert_keyless_includes_all_columns() {
        let q = insert(&keyless(), &payload(&[("line", Value::Text("x".into()))]));
        assert_eq!(q.sql, "INSERT INTO `log` (`line`) VALUES (?)");
        assert_eq!(q.params, vec![Value::Text("x".into())]);
    }

    #[test]
    fn test_update_binds_id_last() {
        let q = update(
            &items(),
            "4",
            &payload(&[
                ("note", Value::Null),
                ("title", Value::Text("new".into())),
                ("unknown", Value::Integer(1)),
            ]),
        )
        .unwrap();
        assert_eq!(q.sql, "UPDATE `items` SET `title` = ?, `note` = ? WHERE `id` = ?");
        assert_eq!(
            q.params,
            vec![Value::Text("new".into()), Value::Null, Value::Integer(4)]
        );
    }

    #[test]
    fn test_update_rejects_empty_payload() {
        let err = update(&items(), "1", &payload(&[("unknown", Value::Integer(1))])).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "no fields to update"));
        let err = update(&items(), "1", &GenericRow::new()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_delete() {
        let q = delete(&items(), "x1").unwrap();
        assert_eq!(q.sql, "DELETE FROM `items` WHERE `id` = ?");
        assert_eq!(q.params, vec![Value::Text("x1".into())]);
    }

    #[test]
    fn test_key_operations_require_key() {
        assert!(matches!(select_by_key(&keyless(), "1"), Err(AppError::NoPrimaryKey(_))));
        assert!(matches!(
            update(&keyless(), "1", &payload(&[("line", Value::Null)])),
            Err(AppError::NoPrimaryKey(_))
        ));
        assert!(matches!(delete(&keyless(), "1"), Err(AppError::NoPrimaryKey(_))));
    }

    #[test]
    fn test_identifiers_are_quoted() {
        let mut schema = keyless();
        schema.name = "we`ird".into();
        let q = select_list(&schema, Page::default());
        assert!(q.sql.contains("FROM `we``ird`"));
    }
}
