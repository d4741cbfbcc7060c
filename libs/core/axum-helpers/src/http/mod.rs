//! HTTP middleware.
//!
//! CORS is configured in [`crate::server::create_router`]; this module holds
//! the standalone middleware functions.

pub mod security;

pub use security::security_headers;
