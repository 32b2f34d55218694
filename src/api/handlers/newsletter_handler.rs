//! Newsletter archive handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::resolve_caller;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Newsletter;
use crate::errors::AppResult;

/// Publication flag payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPublishedRequest {
    pub published: bool,
}

/// Public newsletter routes
pub fn newsletter_routes() -> Router<AppState> {
    Router::new().route("/", get(list_newsletters))
}

/// Authenticated newsletter management routes
pub fn newsletter_admin_routes() -> Router<AppState> {
    Router::new().route("/:id/published", put(set_published))
}

/// List the published newsletter archive
#[utoipa::path(
    get,
    path = "/newsletters",
    tag = "Newsletters",
    responses((status = 200, description = "Published newsletters", body = [Newsletter]))
)]
pub async fn list_newsletters(State(state): State<AppState>) -> AppResult<Json<Vec<Newsletter>>> {
    let newsletters = state.query_service.newsletter_archive().await?;
    Ok(Json(newsletters))
}

/// Set a newsletter's publication flag (admin/president)
#[utoipa::path(
    put,
    path = "/newsletters/{id}/published",
    tag = "Newsletters",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Newsletter id")),
    request_body = SetPublishedRequest,
    responses(
        (status = 200, description = "Newsletter updated", body = Newsletter),
        (status = 403, description = "Requires admin or president")
    )
)]
pub async fn set_published(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetPublishedRequest>,
) -> AppResult<Json<Newsletter>> {
    let caller = resolve_caller(&state, &user).await?;
    let newsletter = state
        .moderation_service
        .set_newsletter_published(&caller, id, payload.published)
        .await?;

    Ok(Json(newsletter))
}
