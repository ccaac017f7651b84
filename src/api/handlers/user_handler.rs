//! User profile handler.

use axum::{extract::State, response::Json, routing::get, Extension, Router};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserProfileResponse;
use crate::errors::AppResult;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "Users",
    responses(
        (status = 200, description = "Current user with role-specific profile", body = UserProfileResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserProfileResponse>> {
    let profile = state.user_service.get_profile(user.id).await?;
    Ok(Json(profile))
}
