//! Table CRUD handlers: list tables, list rows, read, create, update, delete.

use crate::codec::decode_payload;
use crate::error::AppError;
use crate::response::{
    created_body, success, DeletedBody, RecordBody, RecordsBody, TablesBody, UpdatedBody,
};
use crate::service::{CrudService, RequestValidator};
use crate::sql::Page;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

/// GET /, table names in catalog order.
pub async fn list_tables(State(state): State<AppState>) -> impl IntoResponse {
    success(TablesBody {
        tables: state.catalog.table_names(),
    })
    .into_response()
}

/// POST or DELETE on /:table. Resolves the table first so unknown tables stay a 404.
pub async fn missing_id(State(state): State<AppState>, Path(table): Path<String>) -> AppError {
    match state.catalog.table(&table) {
        Ok(_) => AppError::MethodNotAllowed,
        Err(e) => e,
    }
}

/// Any path outside the routing table.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}

/// GET /:table?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let schema = state.catalog.table(&table)?;
    let page = Page::from_query(&params);
    let records = CrudService::list(state.store.as_ref(), schema, page).await?;
    Ok(success(RecordsBody { records }))
}

/// GET /:table/:id
pub async fn read(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let schema = state.catalog.table(&table)?;
    let record = CrudService::read(state.store.as_ref(), schema, &id).await?;
    Ok(success(RecordBody { record }))
}

/// PUT /:table. The key is generated by the database.
pub async fn create(
    State(state): State<AppState>,
    Path(table): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let schema = state.catalog.table(&table)?;
    let payload = decode_payload(schema, &body)?;
    RequestValidator::validate(schema, &payload, false)?;
    let created = CrudService::create(state.store.as_ref(), schema, &payload).await?;
    Ok(success(created_body(created)))
}

/// POST /:table/:id. The key field may not appear in the body.
pub async fn update(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let schema = state.catalog.table(&table)?;
    let payload = decode_payload(schema, &body)?;
    RequestValidator::validate(schema, &payload, true)?;
    let updated = CrudService::update(state.store.as_ref(), schema, &id, &payload).await?;
    Ok(success(UpdatedBody { updated }))
}

/// DELETE /:table/:id
pub async fn delete(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let schema = state.catalog.table(&table)?;
    let deleted = CrudService::delete(state.store.as_ref(), schema, &id).await?;
    Ok(success(DeletedBody { deleted }))
}
