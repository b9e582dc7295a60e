//! Table routes. Handlers resolve the table from the path against the catalog.

use crate::handlers::explorer::{create, delete, list, list_tables, missing_id, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn explorer_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_tables))
        .route(
            "/:table",
            get(list).put(create).post(missing_id).delete(missing_id),
        )
        .route("/:table/:id", get(read).post(update).delete(delete))
        .with_state(state)
}
