//! Aggregated summary endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use sentinel_types::query::TREND_WINDOW;
use sentinel_types::{AggregatedSummary, PageRequest};
use serde::Deserialize;

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::extract::{ApiQuery, empty_as_none};
use crate::state::AppState;

/// Query parameters for `GET /api/summary`.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Page size, clamped to `1..=200` (default 50).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    /// 1-based page number (default 1).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
}

/// `GET /api/summary/latest` -- one row per district, its newest date.
pub async fn latest(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<Vec<AggregatedSummary>>, ApiError> {
    let rows = state.gateway.latest_summaries().await?;
    Ok(ApiResponse::ok(rows, "Latest summary per district fetched"))
}

/// `GET /api/summary/district/{district}` -- the 30 most recent rows,
/// oldest first.
pub async fn district_trend(
    State(state): State<Arc<AppState>>,
    Path(district): Path<String>,
) -> Result<ApiResponse<Vec<AggregatedSummary>>, ApiError> {
    let district = district.trim();
    if district.is_empty() {
        return Err(ApiError::bad_request("District is required"));
    }
    let rows = state.gateway.district_trend(district, TREND_WINDOW).await?;
    Ok(ApiResponse::ok(rows, format!("Trend data for {district}")))
}

/// `GET /api/summary` -- newest date first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> Result<ApiResponse<Vec<AggregatedSummary>>, ApiError> {
    let rows = state
        .gateway
        .list_summaries(PageRequest::new(query.limit, query.page))
        .await?;
    Ok(ApiResponse::ok(rows, "Summaries fetched"))
}
