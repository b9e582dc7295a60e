//! Shared application state for all routes. The catalog is built once and never mutated.

use crate::catalog::Catalog;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, catalog: Catalog) -> Self {
        AppState {
            store,
            catalog: Arc::new(catalog),
        }
    }
}
