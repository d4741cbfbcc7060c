//! Type-safe error codes attached to error logs.
//!
//! Clients never see these; they go into the `error_code` field of the
//! `tracing` event emitted when an [`AppError`](super::AppError) is rendered,
//! so dashboards can group failures without parsing messages.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error codes grouped by range:
/// - 1000-1999: client errors
/// - 2000-2999: storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body or query failed field validation
    ValidationError,

    /// Path parameter could not be parsed
    InvalidPathParameter,

    /// JSON body could not be read or deserialized
    JsonExtraction,

    /// Referenced resource does not exist
    NotFound,

    /// Unexpected server-side failure
    InternalError,

    /// HTTP method not supported on an existing route
    MethodNotAllowed,

    /// Dependency (usually the database) is unavailable
    ServiceUnavailable,

    /// Query string could not be deserialized
    InvalidQuery,

    /// Storage layer reported a failure
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidPathParameter => "INVALID_PATH_PARAMETER",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::StorageError => "STORAGE_ERROR",
        }
    }

    /// Integer code for structured logs and metrics.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidPathParameter => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::MethodNotAllowed => 1006,
            Self::ServiceUnavailable => 1011,
            Self::InvalidQuery => 1012,
            Self::StorageError => 2003,
        }
    }

    /// Message used when the caller has nothing more specific to say.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidPathParameter => "Invalid path parameter",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "The requested resource was not found",
            Self::InternalError => "An internal server error occurred",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::InvalidQuery => "Invalid query parameters",
            Self::StorageError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
