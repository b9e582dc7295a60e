//! DB Explorer: generic CRUD REST surface over a relational schema introspected at startup.

pub mod catalog;
pub mod codec;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use catalog::{Catalog, ColumnSchema, ColumnType, TableSchema};
pub use codec::{GenericRow, ScanBuffer};
pub use error::{AppError, SchemaError};
pub use routes::{app, common_routes, explorer_routes};
pub use service::{CrudService, RequestValidator};
pub use settings::Settings;
pub use sql::Value;
pub use state::AppState;
pub use store::{connect, Store};
