//! Hospital record endpoints (read-only; rows are written by external jobs).

use std::sync::Arc;

use axum::extract::{Path, State};
use sentinel_types::{HospitalFilter, HospitalRecord, PageRequest};
use serde::Deserialize;

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::extract::{ApiQuery, empty_as_none};
use crate::handlers::parse_int_id;
use crate::state::AppState;

/// Query parameters for `GET /api/hospital`.
#[derive(Debug, Default, Deserialize)]
pub struct HospitalQuery {
    /// Restrict to one district.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub district: Option<String>,
    /// Page size, clamped to `1..=200` (default 50).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    /// 1-based page number (default 1).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
}

/// `GET /api/hospital` -- newest visits first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<HospitalQuery>,
) -> Result<ApiResponse<Vec<HospitalRecord>>, ApiError> {
    let filter = HospitalFilter::new(query.district, PageRequest::new(query.limit, query.page));
    let records = state.gateway.list_hospital_records(&filter).await?;
    Ok(ApiResponse::ok(records, "Hospital records fetched"))
}

/// `GET /api/hospital/{id}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<HospitalRecord>, ApiError> {
    let id = parse_int_id(&id)?;
    state
        .gateway
        .get_hospital_record(id)
        .await?
        .map(|record| ApiResponse::ok(record, "Hospital record fetched"))
        .ok_or_else(|| ApiError::NotFound(String::from("Hospital record not found")))
}
