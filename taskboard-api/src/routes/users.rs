/// Current-user profile endpoints
///
/// # Endpoints
///
/// - `GET /v1/users/me` - Fetch the authenticated user's profile
/// - `PUT /v1/users/me` - Update display name and/or avatar

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::user::{UpdateProfile, User, UserSummary},
};
use validator::Validate;

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    /// New display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub full_name: Option<String>,

    /// New avatar URL
    #[validate(length(max = 500, message = "Avatar URL must be at most 500 characters"))]
    pub avatar_url: Option<String>,
}

/// Returns the authenticated user's profile
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserSummary>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.summary()))
}

/// Updates the authenticated user's profile
///
/// Only the supplied fields change.
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateMeRequest>,
) -> ApiResult<Json<UserSummary>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = User::update_profile(
        &state.db,
        auth.user_id,
        UpdateProfile {
            full_name: req.full_name.map(Some),
            avatar_url: req.avatar_url.map(Some),
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.summary()))
}
