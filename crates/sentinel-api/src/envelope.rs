//! Uniform response envelopes.
//!
//! Every handler answers with an [`ApiResponse`]; every failure is rendered
//! as an [`ErrorEnvelope`] by [`ApiError`](crate::error::ApiError). Both
//! carry the status code in the body and a `success` flag derived from it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Successful response body: `{statusCode, success, data, message}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code, repeated in the body.
    pub status_code: u16,
    /// `true` for any status below 400.
    pub success: bool,
    /// The payload.
    pub data: T,
    /// Human-readable summary of what happened.
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Build an envelope for an arbitrary status.
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            success: status.as_u16() < 400,
            data,
            message: message.into(),
        }
    }

    /// `200 OK`.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, data, message)
    }

    /// `201 Created`.
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CREATED, data, message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Error response body: `{statusCode, success: false, message, errors}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// HTTP status code, repeated in the body.
    pub status_code: u16,
    /// Always `false`.
    pub success: bool,
    /// What went wrong.
    pub message: String,
    /// Individual problems (one per invalid field, for example).
    pub errors: Vec<String>,
}

impl ErrorEnvelope {
    /// Build an error envelope.
    pub fn new(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            success: false,
            message: message.into(),
            errors,
        }
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
