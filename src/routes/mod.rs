mod common;
mod explorer;

pub use common::common_routes;
pub use explorer::explorer_routes;

use crate::handlers::not_found;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Full application: common routes beside the table routes, a JSON 404 for anything else,
/// and a request body cap.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(explorer_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
}
