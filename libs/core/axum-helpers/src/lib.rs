//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog service.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly with OpenAPI viewers, health endpoints, graceful shutdown
//! - **[`http`]**: middleware (security headers)
//! - **[`errors`]**: `AppError` and the two error body shapes
//! - **[`extractors`]**: id path, validated JSON and validated query extractors

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal, trim_trailing_slash,
};

pub use http::security_headers;

pub use errors::{AppError, ErrorCode, ErrorResponse, FieldErrors};

pub use extractors::{IdPath, ValidatedJson, ValidatedQuery};
