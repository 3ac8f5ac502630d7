//! Outbreak alert endpoint.

use std::sync::Arc;

use axum::extract::State;
use sentinel_types::AggregatedSummary;
use sentinel_types::query::{ALERT_LIMIT, DEFAULT_ALERT_THRESHOLD};
use serde::Deserialize;

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::extract::{ApiQuery, empty_as_none};
use crate::state::AppState;

/// Query parameters for `GET /api/alerts`.
#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    /// Minimum outbreak risk score (default 0.7).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub threshold: Option<f64>,
}

/// `GET /api/alerts` -- summaries scoring at least `threshold`, highest
/// first, at most 50.
pub async fn list(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<AlertsQuery>,
) -> Result<ApiResponse<Vec<AggregatedSummary>>, ApiError> {
    let threshold = query.threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD);
    if !threshold.is_finite() {
        return Err(ApiError::invalid(
            "Invalid query parameters",
            vec![String::from("threshold must be a finite number")],
        ));
    }

    let rows = state.gateway.alert_summaries(threshold, ALERT_LIMIT).await?;
    Ok(ApiResponse::ok(rows, format!("Alerts above threshold {threshold}")))
}
