pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body returned for every non-validation error.
///
/// ```json
/// { "status": 404, "message": "Product not found with id: 42" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Body returned for validation failures: one message per offending field.
///
/// Field names are rendered in camelCase to match the JSON payloads.
///
/// ```json
/// { "name": "Product name is required", "inventoryCount": "Inventory count must be at least 0" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let message = errors
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .or_else(|| errors.first().map(|e| format!("invalid value ({})", e.code)))
                    .unwrap_or_else(|| "invalid value".to_string());
                (to_camel_case(&field.to_string()), message)
            })
            .collect();

        Self(fields)
    }
}

/// `inventory_count` -> `inventoryCount`
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;

    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type so that every
/// endpoint renders failures with the same two body shapes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPathParameter(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    e
                );
                let body = FieldErrors::from(&e);
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                // axum reports shape mismatches as 422; the API contract is 400
                (StatusCode::BAD_REQUEST, e.body_text(), ErrorCode::JsonExtraction)
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidQuery.code(),
                    "Query extraction error: {:?}",
                    e
                );
                (StatusCode::BAD_REQUEST, e.body_text(), ErrorCode::InvalidQuery)
            }
            AppError::InvalidPathParameter(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidPathParameter.code(),
                    "Invalid path parameter: {}",
                    msg
                );
                (StatusCode::BAD_REQUEST, msg, ErrorCode::InvalidPathParameter)
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, ErrorCode::ValidationError)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, ErrorCode::NotFound)
            }
            AppError::Storage(details) => {
                tracing::error!(
                    error_code = ErrorCode::StorageError.code(),
                    "Storage error: {}",
                    details
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StorageError.default_message().to_string(),
                    ErrorCode::StorageError,
                )
            }
            AppError::InternalServerError(details) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    details
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    ErrorCode::InternalError,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                (StatusCode::SERVICE_UNAVAILABLE, msg, ErrorCode::ServiceUnavailable)
            }
        };

        tracing::debug!(error = %code, status = status.as_u16(), "Rendering error response");
        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::borrow::Cow;
    use validator::ValidationError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("inventory_count"), "inventoryCount");
        assert_eq!(to_camel_case("image_url"), "imageUrl");
        assert_eq!(to_camel_case("name"), "name");
    }

    #[tokio::test]
    async fn test_not_found_renders_status_and_message() {
        let response = AppError::NotFound("Product not found with id: 7".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({"status": 404, "message": "Product not found with id: 7"})
        );
    }

    #[tokio::test]
    async fn test_validation_renders_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "inventory_count",
            ValidationError::new("range")
                .with_message(Cow::Borrowed("Inventory count must be at least 0")),
        );
        errors.add("name", ValidationError::new("length"));

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["inventoryCount"], "Inventory count must be at least 0");
        assert_eq!(body["name"], "invalid value (length)");
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let response = AppError::Storage("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(body.status, 500);
        assert!(!body.message.contains("connection refused"));
    }
}
