//! API error types with IntoResponse
//!
//! Errors are converted to `{ "error", "message" }` JSON bodies. Internal
//! failures are logged here and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Store rejected the write (409)
    Conflict(String),

    /// Database unreachable (503, logged)
    Unavailable(DbError),

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Conflict(detail) => {
                tracing::warn!("Constraint violation: {}", detail);
                (
                    StatusCode::CONFLICT,
                    json!({
                        "error": "constraint_violation",
                        "message": "the request conflicts with related records"
                    }),
                )
            }
            Self::Unavailable(e) => {
                tracing::error!("Database unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({
                        "error": "database_unavailable",
                        "message": "the database is unreachable"
                    }),
                )
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::ConstraintViolation(message) => Self::Conflict(message),
            DbError::Validation(v) => Self::Validation(v),
            DbError::Connection(_) => Self::Unavailable(e),
            DbError::Query(_) => Self::Database(e),
        }
    }
}
