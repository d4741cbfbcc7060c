//! Reusable OpenAPI response types for consistent API documentation.

use super::{ErrorResponse, FieldErrors};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - one message per invalid field",
    content_type = "application/json",
    example = json!({
        "name": "Product name is required",
        "price": "Price must be greater than or equal to 0"
    })
)]
pub struct ValidationErrorResponse(pub FieldErrors);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed path, query or body",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "message": "Invalid id 'abc': expected an integer"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "message": "Product not found with id: 42"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "status": 503,
        "message": "Service is temporarily unavailable"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
