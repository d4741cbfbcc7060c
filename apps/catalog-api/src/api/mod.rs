//! API routes module

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Versioned API routes, nested under `/api` by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/v1/products", products::router(state))
}

/// `GET /ready`
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
