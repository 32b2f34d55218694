//! Profile and role administration handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::resolve_caller;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Profile, Role, UpdateProfile};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Role assignment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRoleRequest {
    /// One of: admin, editor, contributor, president, viewer
    pub role: Role,
}

/// Create profile routes (all require authentication)
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(my_profile).put(update_my_profile))
        .route("/:user_id", get(get_profile).put(update_profile))
        .route("/:user_id/role", post(assign_role))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/profiles/me",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile found", body = Profile),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn my_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Profile>> {
    let caller = resolve_caller(&state, &user).await?;
    let profile = state.profile_service.my_profile(&caller).await?;

    Ok(Json(profile))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/profiles/me",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = Profile)
    )
)]
pub async fn update_my_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(changes): ValidatedJson<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    let caller = resolve_caller(&state, &user).await?;
    let profile = state
        .profile_service
        .update_profile(&caller, user.id, changes)
        .await?;

    Ok(Json(profile))
}

/// Get a profile by user id (owner or admin)
#[utoipa::path(
    get,
    path = "/profiles/{user_id}",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile found", body = Profile),
        (status = 403, description = "Not the owner or an admin"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    let caller = resolve_caller(&state, &user).await?;
    let profile = state.profile_service.get_profile(&caller, user_id).await?;

    Ok(Json(profile))
}

/// Update a profile by user id (owner or admin)
#[utoipa::path(
    put,
    path = "/profiles/{user_id}",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User id")),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 403, description = "Not the owner or an admin")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(changes): ValidatedJson<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    let caller = resolve_caller(&state, &user).await?;
    let profile = state
        .profile_service
        .update_profile(&caller, user_id, changes)
        .await?;

    Ok(Json(profile))
}

/// Assign a role to a user (admin only)
#[utoipa::path(
    post,
    path = "/profiles/{user_id}/role",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User id")),
    request_body = AssignRoleRequest,
    responses(
        (status = 200, description = "Role assigned"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn assign_role(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AssignRoleRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let caller = resolve_caller(&state, &user).await?;
    state
        .role_service
        .assign_role(&caller, user_id, payload.role)
        .await?;

    Ok(Json(ApiResponse::message("Role assigned")))
}
