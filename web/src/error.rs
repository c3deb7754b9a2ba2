//! Error types for web handlers.
//!
//! This module bridges the validation error taxonomy and HTTP responses,
//! implementing Axum's `IntoResponse` trait.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use matchday_validation::ValidationError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// Wraps a rejection in an HTTP-friendly shape. The gate scanner client
/// switches on the status code; the human operator reads `details`.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Stable error code (for client error handling)
    error: &'static str,
    /// Human-readable detail (operator-facing)
    details: String,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, error: &'static str, details: String) -> Self {
        Self {
            status,
            error,
            details,
        }
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", details.into())
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error, self.details)
    }
}

impl std::error::Error for AppError {}

/// Map every validation outcome onto the three-way status taxonomy:
/// bad request for anything the scanned credential itself caused,
/// not found for missing ids, server error for storage faults.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_infrastructure() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        };

        let error = match &err {
            ValidationError::InvalidInput => "INVALID_INPUT",
            ValidationError::TicketNotFound
            | ValidationError::SubscriptionNotFound
            | ValidationError::CredentialNotFound => "NOT_FOUND",
            ValidationError::DataMismatch { .. } => "DATA_MISMATCH",
            ValidationError::AlreadyValidated { .. } => "ALREADY_VALIDATED",
            ValidationError::FixtureExpired { .. } => "FIXTURE_EXPIRED",
            ValidationError::SubscriptionNotYetActive { .. } => "SUBSCRIPTION_NOT_ACTIVE",
            ValidationError::SubscriptionExpired { .. } => "SUBSCRIPTION_EXPIRED",
            ValidationError::WriteFailed(_) | ValidationError::Database(_) => "INTERNAL_ERROR",
        };

        // Storage faults get a generic detail line; the full message goes
        // to the log, not to the client.
        let details = if err.is_infrastructure() {
            "Validation could not be completed".to_string()
        } else {
            err.to_string()
        };

        Self::new(status, error, details)
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Stable error code.
    error: &'static str,
    /// Human-readable detail.
    details: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors with context; business rejections are logged
        // at the service layer already.
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                error = self.error,
                details = %self.details,
                "Internal server error"
            );
        }

        let body = ErrorResponse {
            error: self.error,
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}
