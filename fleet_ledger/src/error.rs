//! Error taxonomy shared by the registry, ledger, scheduler, and HTTP layer.
//!
//! Each [`FleetError`] variant maps to a stable machine-readable code and an
//! HTTP status. The JSON body is always
//!
//! ```json
//! {"error": "truck 9999 not found", "code": "NOT_FOUND"}
//! ```
//!
//! Storage failures are logged with full detail and reported to the caller
//! with a generic message only.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Stable error code constants. Clients match on these, never on messages.
pub mod error_code {
    /// Missing or malformed input.
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    /// Caller identity does not match the requested warehouse.
    pub const FORBIDDEN: &str = "FORBIDDEN";
    /// Referenced record does not exist.
    pub const NOT_FOUND: &str = "NOT_FOUND";
    /// Operation would violate an invariant.
    pub const CONFLICT: &str = "CONFLICT";
    /// Persistence layer failure.
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// Message returned to callers in place of storage error details.
pub const STORAGE_FAILURE_MESSAGE: &str = "internal storage error";

/// Errors surfaced by fleet operations.
#[derive(thiserror::Error, Debug)]
pub enum FleetError {
    /// Missing/malformed required field or invalid enum value. HTTP 400.
    #[error("{0}")]
    InvalidArgument(String),

    /// Caller identity disagrees with the requested warehouse. HTTP 403.
    #[error("{0}")]
    Forbidden(String),

    /// Referenced id does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Would violate an invariant (double assignment, duplicate key). HTTP 409.
    #[error("{0}")]
    Conflict(String),

    /// Underlying persistence call failed. HTTP 500.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Result alias used across the crate's operations.
pub type FleetResult<T> = Result<T, FleetError>;

impl FleetError {
    /// Shorthand for [`FleetError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        FleetError::InvalidArgument(msg.into())
    }

    /// Shorthand for [`FleetError::NotFound`].
    pub fn not_found(msg: impl Into<String>) -> Self {
        FleetError::NotFound(msg.into())
    }

    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            FleetError::InvalidArgument(_) => error_code::INVALID_ARGUMENT,
            FleetError::Forbidden(_) => error_code::FORBIDDEN,
            FleetError::NotFound(_) => error_code::NOT_FOUND,
            FleetError::Conflict(_) => error_code::CONFLICT,
            FleetError::Storage(_) => error_code::STORAGE_ERROR,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FleetError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            FleetError::Forbidden(_) => StatusCode::FORBIDDEN,
            FleetError::NotFound(_) => StatusCode::NOT_FOUND,
            FleetError::Conflict(_) => StatusCode::CONFLICT,
            FleetError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to API callers.
    pub fn public_message(&self) -> String {
        match self {
            FleetError::Storage(_) => STORAGE_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Rejects missing (non-positive) identifiers with [`FleetError::InvalidArgument`].
pub fn ensure_id(field: &str, value: i32) -> FleetResult<i32> {
    if value > 0 {
        Ok(value)
    } else {
        Err(FleetError::InvalidArgument(format!("{field} is required")))
    }
}

impl From<DieselError> for FleetError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => FleetError::NotFound("record not found".into()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                FleetError::Conflict(format!("duplicate record: {}", info.message()))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                FleetError::NotFound("referenced record does not exist".into())
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                FleetError::InvalidArgument(format!("value rejected: {}", info.message()))
            }
            other => FleetError::Storage(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for FleetError {
    fn from(err: diesel::ConnectionError) -> Self {
        FleetError::Storage(err.to_string())
    }
}

impl From<tokio::task::JoinError> for FleetError {
    fn from(err: tokio::task::JoinError) -> Self {
        FleetError::Storage(format!("blocking task failed: {err}"))
    }
}

impl IntoResponse for FleetError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            FleetError::Storage(detail) => tracing::error!(%detail, "storage failure"),
            other => tracing::debug!(code = other.error_code(), %other, "request rejected"),
        }
        let body = serde_json::json!({
            "error": self.public_message(),
            "code": self.error_code(),
        });
        (status, Json(body)).into_response()
    }
}
