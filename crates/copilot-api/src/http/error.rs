//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use copilot_types::error::{MemoryError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Memory query errors.
    Memory(MemoryError),
    /// Storage errors.
    Repository(RepositoryError),
    /// Missing caller identity.
    Unauthorized(String),
    /// Caller is not allowed to access the resource.
    Forbidden(String),
    /// Validation error.
    Validation(String),
    /// Path does not name a resource this service serves.
    NotFound(String),
    /// Generic internal error.
    Internal(String),
}

impl From<MemoryError> for AppError {
    fn from(e: MemoryError) -> Self {
        AppError::Memory(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Memory(e @ MemoryError::SessionNotFound(_))
            | AppError::Memory(e @ MemoryError::InvalidMemoryName(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Memory(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MEMORY_ERROR", e.to_string())
            }
            AppError::Repository(e) if e.is_validation() => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Repository(RepositoryError::NotFound(id)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", format!("Entity {id} not found"))
            }
            AppError::Repository(RepositoryError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Repository(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, error = %message, "request failed");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
