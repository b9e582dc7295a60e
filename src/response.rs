//! Standard response envelope: `{"response": {...}}` on success.

use crate::codec::GenericRow;
use crate::service::Created;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Serialize)]
pub struct TablesBody<'a> {
    pub tables: &'a [String],
}

#[derive(Serialize)]
pub struct RecordsBody {
    pub records: Vec<GenericRow>,
}

#[derive(Serialize)]
pub struct RecordBody {
    pub record: GenericRow,
}

#[derive(Serialize)]
pub struct UpdatedBody {
    pub updated: u64,
}

#[derive(Serialize)]
pub struct DeletedBody {
    pub deleted: u64,
}

pub fn success<T: Serialize>(response: T) -> Json<Envelope<T>> {
    Json(Envelope { response })
}

/// `{"<key>": id}` for tables with a key, `{"inserted": n}` otherwise.
pub fn created_body(created: Created) -> serde_json::Value {
    match created {
        Created::Key { name, id } => {
            let mut map = serde_json::Map::new();
            map.insert(name, id.into());
            serde_json::Value::Object(map)
        }
        Created::Rows(n) => serde_json::json!({ "inserted": n }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelopes() {
        let tables = vec!["items".to_string(), "users".to_string()];
        let out = serde_json::to_value(&success(TablesBody { tables: &tables }).0).unwrap();
        assert_eq!(out, json!({"response": {"tables": ["items", "users"]}}));

        let out = serde_json::to_value(&success(UpdatedBody { updated: 1 }).0).unwrap();
        assert_eq!(out, json!({"response": {"updated": 1}}));
    }

    #[test]
    fn test_created_body() {
        let body = created_body(Created::Key { name: "user_id".into(), id: 3 });
        assert_eq!(body, json!({"user_id": 3}));
        assert_eq!(created_body(Created::Rows(1)), json!({"inserted": 1}));
    }
}
