//! Passive schema types: one column, one table, and the process-wide registry.

use crate::error::AppError;
use crate::sql::Value;
use std::collections::HashMap;

/// Semantic column type. Only integer and text columns are addressable through the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    /// Map a declared database type (e.g. "int", "VARCHAR(255)", "bigint unsigned") to a
    /// supported column type. Returns None for anything outside the integer and text families.
    pub fn from_declared(data_type: &str) -> Option<Self> {
        let lower = data_type.trim().to_ascii_lowercase();
        let base = lower
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or("");
        match base {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" => {
                Some(ColumnType::Integer)
            }
            "char" | "varchar" | "text" | "tinytext" | "mediumtext" | "longtext" => {
                Some(ColumnType::Text)
            }
            _ => None,
        }
    }

    /// Value written for a required column the client left out.
    pub fn zero_value(self) -> Value {
        match self {
            ColumnType::Integer => Value::Integer(0),
            ColumnType::Text => Value::Text(String::new()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: ColumnType,
    /// NOT NULL constraint.
    pub required: bool,
    pub is_primary_key: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableSchema {
    pub name: String,
    /// Name of the primary key column; None when the table has no addressable key.
    pub key: Option<String>,
    /// Ordinal order. This is also the scan order for fetched rows.
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The key column, or NoPrimaryKey for tables that cannot be addressed by id.
    pub fn key_column(&self) -> Result<&ColumnSchema, AppError> {
        self.key
            .as_deref()
            .and_then(|k| self.column(k))
            .ok_or_else(|| AppError::NoPrimaryKey(self.name.clone()))
    }

    pub fn is_key(&self, name: &str) -> bool {
        self.key.as_deref() == Some(name)
    }
}

/// Immutable registry of table schemas, built once at startup.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, TableSchema>,
    table_names: Vec<String>,
}

impl Catalog {
    /// Build from tables in introspection order. Later duplicates replace earlier ones.
    pub fn from_tables(tables: Vec<TableSchema>) -> Self {
        let mut catalog = Catalog::default();
        for table in tables {
            if !catalog.tables.contains_key(&table.name) {
                catalog.table_names.push(table.name.clone());
            }
            catalog.tables.insert(table.name.clone(), table);
        }
        catalog
    }

    pub fn table(&self, name: &str) -> Result<&TableSchema, AppError> {
        self.tables.get(name).ok_or(AppError::UnknownTable)
    }

    pub fn table_names(&self) -> &[String] {
        &self.table_names
    }

    pub fn len(&self) -> usize {
        self.table_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table_names.is_empty()
    }
}
