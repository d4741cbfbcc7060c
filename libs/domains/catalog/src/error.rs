use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found with id: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// The store could not be reached or rejected the statement
    #[error("Store error: {0}")]
    Store(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// A validation failure on a single field.
    pub fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(
            field,
            ValidationError::new(code).with_message(Cow::Borrowed(message)),
        );
        CatalogError::Validation(errors)
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        CatalogError::Store(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            e @ CatalogError::NotFound(_) => AppError::NotFound(e.to_string()),
            CatalogError::Validation(errors) => AppError::ValidationError(errors),
            CatalogError::Store(details) => AppError::Storage(details),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
