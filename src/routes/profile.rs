use axum::extract::{Path, State};
use axum::Json;
use garde::Validate;
use serde::Deserialize;

use crate::app_state::AppState;
use crate::db::queries;
use crate::models::listing::UserProfile;
use crate::routes::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[garde(length(min = 1, max = 100))]
    pub name: String,

    #[garde(length(max = 500))]
    pub bio: Option<String>,

    #[garde(length(max = 500))]
    pub avatar: Option<String>,
}

/// GET /api/v1/profile/:id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = queries::get_user(&state.db, &id).await?;
    user.map(Json).ok_or(ApiError::NotFound)
}

/// PUT /api/v1/profile/:id
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let updated = queries::update_user(
        &state.db,
        &id,
        &request.name,
        request.bio.as_deref(),
        request.avatar.as_deref(),
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound);
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
