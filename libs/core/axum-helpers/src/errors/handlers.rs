use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    let status = StatusCode::NOT_FOUND;
    let body = Json(ErrorResponse::new(
        status,
        ErrorCode::NotFound.default_message(),
    ));

    (status, body).into_response()
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    let status = StatusCode::METHOD_NOT_ALLOWED;
    let body = Json(ErrorResponse::new(
        status,
        ErrorCode::MethodNotAllowed.default_message(),
    ));

    (status, body).into_response()
}
