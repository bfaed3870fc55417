//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Database causes are logged and never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::{ValidationError, ValidationErrors};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// One or more fields failed their rules (400)
    Validation(ValidationErrors),

    /// Required query parameter absent (400)
    MissingParameter { message: &'static str },

    /// Body could not be read as fields (400)
    MalformedBody { reason: String },

    /// Query string could not be parsed (400)
    MalformedQuery { reason: String },

    /// Pool or statement failure (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, json!({ "errors": e.errors() })),
            Self::MissingParameter { message } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            Self::MalformedBody { reason } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("malformed request body: {}", reason) }),
            ),
            Self::MalformedQuery { reason } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("malformed query string: {}", reason) }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
