//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Startup failure while introspecting the database. Fatal: no partial catalog is served.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("list tables: {0}")]
    ListTables(#[source] sqlx::Error),
    #[error("describe table {table}: {source}")]
    DescribeTable {
        table: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
    #[error("connect: {0}")]
    Connect(#[source] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("unknown table")]
    UnknownTable,
    #[error("record not found")]
    RecordNotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("table {0} has no primary key")]
    NoPrimaryKey(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("not found")]
    RouteNotFound,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// The "field X have invalid type" rejection used for every per-field check.
    pub fn invalid_field(name: &str) -> Self {
        AppError::Validation(format!("field {} have invalid type", name))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownTable | AppError::RecordNotFound | AppError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::NoPrimaryKey(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "statement failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
