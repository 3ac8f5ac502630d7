//! Error types for the HTTP layer.
//!
//! [`ApiError`] unifies every failure a handler can produce. Its
//! [`IntoResponse`] implementation is the single place where failures are
//! turned into status codes and [`ErrorEnvelope`] bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sentinel_db::DbError;

use crate::envelope::ErrorEnvelope;

/// Message returned to clients for any server-side failure.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was malformed or failed validation.
    #[error("bad request: {message}")]
    BadRequest {
        /// Envelope message.
        message: String,
        /// One entry per individual problem.
        errors: Vec<String>,
    },

    /// The addressed record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The path exists but does not accept the request method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request body exceeded the configured limit.
    #[error("payload too large")]
    PayloadTooLarge,

    /// The persistence gateway failed.
    #[error("database error: {0}")]
    Database(#[from] DbError),

    /// Any other unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// A 400 with a message and no sub-errors.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// A 400 with a message and sub-errors.
    pub fn invalid(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            errors,
        }
    }

    /// The HTTP status this error is answered with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match self {
            Self::BadRequest { message, errors } => ErrorEnvelope::new(status, message, errors),
            Self::NotFound(message) => ErrorEnvelope::new(status, message, Vec::new()),
            Self::MethodNotAllowed => ErrorEnvelope::new(status, "Method not allowed", Vec::new()),
            Self::PayloadTooLarge => {
                ErrorEnvelope::new(status, "Request body too large", Vec::new())
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "Database failure while handling request");
                ErrorEnvelope::new(status, INTERNAL_MESSAGE, Vec::new())
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Internal failure while handling request");
                ErrorEnvelope::new(status, INTERNAL_MESSAGE, Vec::new())
            }
        };
        envelope.into_response()
    }
}
