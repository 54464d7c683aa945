use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use streamhub_core::models::{ProfileUpdate, UserResponse};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserResponse,
}

#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = state.users.get_profile(auth.user_id).await?;
    Ok(Json(ProfileResponse {
        message: None,
        user: user.into(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "profile",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid email or username", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Username or email already in use", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, update), fields(user_id = %auth.user_id))]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ValidatedJson(update): ValidatedJson<ProfileUpdate>,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = state.users.update_profile(auth.user_id, update).await?;
    Ok(Json(ProfileResponse {
        message: Some("Profile updated successfully".to_string()),
        user: user.into(),
    }))
}
