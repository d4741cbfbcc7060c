//! Products API routes

use axum::Router;
use domain_catalog::{CatalogService, InMemoryProductStore, PgProductStore, ProductMapper, handlers};

use crate::state::AppState;

/// Catalog routes over whichever store the state carries.
pub fn router(state: &AppState) -> Router {
    match &state.db {
        Some(db) => {
            let service = CatalogService::new(PgProductStore::new(db.clone()), ProductMapper);
            handlers::router(service)
        }
        None => {
            tracing::warn!("Using the in-memory product store; data is lost on restart");
            let service = CatalogService::new(InMemoryProductStore::new(), ProductMapper);
            handlers::router(service)
        }
    }
}
