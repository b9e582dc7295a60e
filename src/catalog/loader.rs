//! Build the catalog from database metadata.

use crate::catalog::types::{Catalog, ColumnSchema, ColumnType, TableSchema};
use crate::error::SchemaError;
use crate::store::{RawColumn, Store};

/// Introspect every table once. Any metadata failure aborts the whole build.
/// Tables left with no supported columns are not served.
pub async fn load(store: &dyn Store) -> Result<Catalog, SchemaError> {
    let names = store.table_names().await.map_err(SchemaError::ListTables)?;
    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let raw = store
            .describe(&name)
            .await
            .map_err(|source| SchemaError::DescribeTable {
                table: name.clone(),
                source,
            })?;
        let table = assemble(name, raw);
        if table.columns.is_empty() {
            tracing::warn!(table = %table.name, "skipping table with no supported columns");
            continue;
        }
        tables.push(table);
    }
    let catalog = Catalog::from_tables(tables);
    tracing::info!(tables = catalog.len(), "catalog built");
    Ok(catalog)
}

/// Turn raw column metadata into a table schema. Unsupported column types are left out.
pub fn assemble(name: String, raw: Vec<RawColumn>) -> TableSchema {
    let mut key: Option<String> = None;
    let mut columns = Vec::with_capacity(raw.len());
    for c in raw {
        let Some(column_type) = ColumnType::from_declared(&c.data_type) else {
            tracing::warn!(table = %name, column = %c.name, data_type = %c.data_type, "skipping column of unsupported type");
            continue;
        };
        let mut is_primary_key = false;
        if c.is_primary_key {
            match &key {
                None => {
                    key = Some(c.name.clone());
                    is_primary_key = true;
                }
                Some(first) => {
                    tracing::warn!(table = %name, key = %first, column = %c.name, "composite primary key, using first column");
                }
            }
        }
        columns.push(ColumnSchema {
            name: c.name,
            column_type,
            required: c.not_null,
            is_primary_key,
        });
    }
    TableSchema { name, key, columns }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, data_type: &str, is_primary_key: bool, not_null: bool) -> RawColumn {
        RawColumn {
            name: name.into(),
            data_type: data_type.into(),
            is_primary_key,
            not_null,
        }
    }

    #[test]
    fn test_assemble_picks_key_and_keeps_order() {
        let table = assemble(
            "items".into(),
            vec![
                raw("id", "int", true, true),
                raw("title", "varchar", false, true),
                raw("description", "text", false, true),
                raw("updated", "varchar", false, false),
            ],
        );
        assert_eq!(table.key.as_deref(), Some("id"));
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "title", "description", "updated"]);
        assert!(table.columns[0].is_primary_key);
        assert!(table.columns[1].required);
        assert!(!table.columns[3].required);
    }

    #[test]
    fn test_assemble_without_key() {
        let table = assemble("log".into(), vec![raw("line", "text", false, false)]);
        assert_eq!(table.key, None);
    }

    #[test]
    fn test_assemble_skips_unsupported_types() {
        let table = assemble(
            "events".into(),
            vec![
                raw("id", "bigint", true, true),
                raw("at", "datetime", false, true),
                raw("name", "varchar", false, false),
            ],
        );
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "name"]);
    }

    #[test]
    fn test_assemble_composite_key_uses_first() {
        let table = assemble(
            "pairs".into(),
            vec![raw("a", "int", true, true), raw("b", "int", true, true)],
        );
        assert_eq!(table.key.as_deref(), Some("a"));
        assert!(table.columns[0].is_primary_key);
        assert!(!table.columns[1].is_primary_key);
    }
}
