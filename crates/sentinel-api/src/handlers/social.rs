//! Social post CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use sentinel_types::payloads::check;
use sentinel_types::query::RECENT_LIMIT;
use sentinel_types::{NewSocialPost, SocialPost, SocialPostPatch};

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::extract::Payload;
use crate::handlers::{or_not_found, parse_uuid};
use crate::state::AppState;

const NOT_FOUND: &str = "Social post not found";

/// `POST /api/social` -- 201 with the stored row.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Payload(new): Payload<NewSocialPost>,
) -> Result<ApiResponse<SocialPost>, ApiError> {
    check(&new).map_err(|errors| {
        ApiError::invalid("platform, content and district are required", errors)
    })?;
    let post = state.gateway.create_social_post(&new).await?;
    Ok(ApiResponse::created(post, "Social post created successfully"))
}

/// `GET /api/social` -- the 50 most recently created.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<Vec<SocialPost>>, ApiError> {
    let posts = state.gateway.list_social_posts(RECENT_LIMIT).await?;
    Ok(ApiResponse::ok(posts, "Social posts fetched"))
}

/// `GET /api/social/{id}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SocialPost>, ApiError> {
    let id = parse_uuid(&id)?;
    state
        .gateway
        .get_social_post(id)
        .await?
        .map(|post| ApiResponse::ok(post, "Social post fetched"))
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))
}

/// `PUT /api/social/{id}` -- an explicit `null` clears `sentiment` or `reach`.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Payload(patch): Payload<SocialPostPatch>,
) -> Result<ApiResponse<SocialPost>, ApiError> {
    let id = parse_uuid(&id)?;
    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    check(&patch).map_err(|errors| ApiError::invalid("Invalid social post fields", errors))?;

    let post = state
        .gateway
        .update_social_post(id, &patch)
        .await
        .map_err(|e| or_not_found(e, NOT_FOUND))?;
    Ok(ApiResponse::ok(post, "Social post updated successfully"))
}

/// `DELETE /api/social/{id}`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let id = parse_uuid(&id)?;
    state
        .gateway
        .delete_social_post(id)
        .await
        .map_err(|e| or_not_found(e, NOT_FOUND))?;
    Ok(ApiResponse::ok((), "Social post deleted successfully"))
}
