//! Pharmacy CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use sentinel_types::payloads::check;
use sentinel_types::query::RECENT_LIMIT;
use sentinel_types::{NewPharma, Pharma, PharmaPatch};

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::extract::Payload;
use crate::handlers::{or_not_found, parse_uuid};
use crate::state::AppState;

const NOT_FOUND: &str = "Pharma not found";

/// `POST /api/pharma` -- 201 with the stored row.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Payload(new): Payload<NewPharma>,
) -> Result<ApiResponse<Pharma>, ApiError> {
    check(&new).map_err(|errors| ApiError::invalid("All required fields must be provided", errors))?;
    let pharma = state.gateway.create_pharma(&new).await?;
    Ok(ApiResponse::created(pharma, "Pharma created successfully"))
}

/// `GET /api/pharma` -- the 50 most recently created.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<Vec<Pharma>>, ApiError> {
    let pharmas = state.gateway.list_pharmas(RECENT_LIMIT).await?;
    Ok(ApiResponse::ok(pharmas, "Pharmas fetched"))
}

/// `GET /api/pharma/{id}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Pharma>, ApiError> {
    let id = parse_uuid(&id)?;
    state
        .gateway
        .get_pharma(id)
        .await?
        .map(|pharma| ApiResponse::ok(pharma, "Pharma fetched"))
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))
}

/// `PUT /api/pharma/{id}` -- fields absent from the body keep their value;
/// `"contact": null` clears the contact.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Payload(patch): Payload<PharmaPatch>,
) -> Result<ApiResponse<Pharma>, ApiError> {
    let id = parse_uuid(&id)?;
    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    check(&patch).map_err(|errors| ApiError::invalid("Invalid pharma fields", errors))?;

    let pharma = state
        .gateway
        .update_pharma(id, &patch)
        .await
        .map_err(|e| or_not_found(e, NOT_FOUND))?;
    Ok(ApiResponse::ok(pharma, "Pharma updated successfully"))
}

/// `DELETE /api/pharma/{id}` -- `data` is `null`.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let id = parse_uuid(&id)?;
    state
        .gateway
        .delete_pharma(id)
        .await
        .map_err(|e| or_not_found(e, NOT_FOUND))?;
    Ok(ApiResponse::ok((), "Pharma deleted successfully"))
}
