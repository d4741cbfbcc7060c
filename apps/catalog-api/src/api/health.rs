//! Readiness probe backed by a real database round trip.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            match &state.db {
                Some(db) => database::postgres::check_health(db)
                    .await
                    .map_err(|e| e.to_string()),
                None => Ok(()),
            }
        }),
    )];

    run_health_checks(checks).await.into_response()
}
