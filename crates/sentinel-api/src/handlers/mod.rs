//! REST endpoint handlers.
//!
//! Every handler extracts and validates its input, performs exactly one
//! gateway call, and answers with an [`ApiResponse`](crate::envelope::ApiResponse).
//! Failures are returned as [`ApiError`] and rendered by its single
//! `IntoResponse` implementation.
//!
//! # Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/hospital` | [`hospital::list`] |
//! | `GET` | `/api/hospital/{id}` | [`hospital::get`] |
//! | `POST` | `/api/pharma` | [`pharma::create`] |
//! | `GET` | `/api/pharma` | [`pharma::list`] |
//! | `GET` / `PUT` / `DELETE` | `/api/pharma/{id}` | [`pharma::get`], [`pharma::update`], [`pharma::delete`] |
//! | `POST` | `/api/social` | [`social::create`] |
//! | `GET` | `/api/social` | [`social::list`] |
//! | `GET` / `PUT` / `DELETE` | `/api/social/{id}` | [`social::get`], [`social::update`], [`social::delete`] |
//! | `GET` | `/api/summary/latest` | [`summary::latest`] |
//! | `GET` | `/api/summary/district/{district}` | [`summary::district_trend`] |
//! | `GET` | `/api/summary` | [`summary::list`] |
//! | `GET` | `/api/alerts` | [`alerts::list`] |

pub mod alerts;
pub mod hospital;
pub mod pharma;
pub mod social;
pub mod summary;

use axum::response::IntoResponse;
use sentinel_db::DbError;
use uuid::Uuid;

use crate::error::ApiError;

/// Parse a UUID path segment, answering 400 on garbage.
pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| ApiError::invalid("Invalid id", vec![e.to_string()]))
}

/// Parse an integer path segment, answering 400 on garbage.
pub(crate) fn parse_int_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|e| ApiError::invalid("Invalid id", vec![e.to_string()]))
}

/// Map a gateway error, turning a missing row into a 404 with `message`.
pub(crate) fn or_not_found(err: DbError, message: &str) -> ApiError {
    match err {
        DbError::NotFound(_) => ApiError::NotFound(message.to_owned()),
        other => ApiError::Database(other),
    }
}

/// Fallback for paths that match neither a route nor a static file.
pub async fn route_not_found() -> impl IntoResponse {
    ApiError::NotFound(String::from("Route not found"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_are_bad_requests() {
        assert!(matches!(parse_uuid("nope"), Err(ApiError::BadRequest { .. })));
        assert!(matches!(parse_int_id("12a"), Err(ApiError::BadRequest { .. })));
        assert_eq!(parse_int_id("42").unwrap(), 42);
    }

    #[test]
    fn missing_rows_become_404() {
        let err = or_not_found(DbError::NotFound(String::from("pharma x")), "Pharma not found");
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Pharma not found"));

        let err = or_not_found(DbError::Config(String::from("bad")), "Pharma not found");
        assert!(matches!(err, ApiError::Database(_)));
    }
}

/// Fallback for a known path hit with a method it does not serve.
pub async fn method_not_allowed() -> impl IntoResponse {
    ApiError::MethodNotAllowed
}
