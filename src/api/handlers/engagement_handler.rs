//! Reaction and feedback handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::resolve_caller;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{EntityKind, Feedback, NewFeedback, Reaction, ReactionCounts, ReactionKind};
use crate::errors::AppResult;

/// Reaction toggle payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReactRequest {
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
    pub reaction: ReactionKind,
}

/// Entity selector for reaction queries
#[derive(Debug, Deserialize)]
pub struct EntityQuery {
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
}

/// Result of a reaction toggle
#[derive(Debug, Serialize, ToSchema)]
pub struct ReactResponse {
    /// The stored reaction; null when the toggle removed one
    pub reaction: Option<Reaction>,
}

/// Authenticated reaction routes
pub fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(react))
        .route("/mine", get(my_reaction))
}

/// Public reaction count route + feedback form
pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/", post(submit_feedback))
}

/// Public reaction counts route
pub fn reaction_count_routes() -> Router<AppState> {
    Router::new().route("/counts", get(reaction_counts))
}

/// Toggle the caller's reaction on an entity
#[utoipa::path(
    post,
    path = "/reactions",
    tag = "Engagement",
    security(("bearer_auth" = [])),
    request_body = ReactRequest,
    responses((status = 200, description = "Toggle applied", body = ReactResponse))
)]
pub async fn react(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ReactRequest>,
) -> AppResult<Json<ReactResponse>> {
    let caller = resolve_caller(&state, &user).await?;
    let reaction = state
        .engagement_service
        .react(&caller, payload.entity_type, payload.entity_id, payload.reaction)
        .await?;

    Ok(Json(ReactResponse { reaction }))
}

/// The caller's current reaction on an entity
#[utoipa::path(
    get,
    path = "/reactions/mine",
    tag = "Engagement",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Current reaction", body = ReactResponse))
)]
pub async fn my_reaction(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<EntityQuery>,
) -> AppResult<Json<ReactResponse>> {
    let caller = resolve_caller(&state, &user).await?;
    let reaction = state
        .engagement_service
        .my_reaction(&caller, query.entity_type, query.entity_id)
        .await?;

    Ok(Json(ReactResponse { reaction }))
}

/// Public like/dislike tallies for an entity
#[utoipa::path(
    get,
    path = "/reactions/counts",
    tag = "Engagement",
    responses((status = 200, description = "Tallies", body = ReactionCounts))
)]
pub async fn reaction_counts(
    State(state): State<AppState>,
    Query(query): Query<EntityQuery>,
) -> AppResult<Json<ReactionCounts>> {
    let counts = state
        .engagement_service
        .reaction_counts(query.entity_type, query.entity_id)
        .await?;

    Ok(Json(counts))
}

/// Submit feedback; anonymous unless a valid bearer token is supplied
#[utoipa::path(
    post,
    path = "/feedback",
    tag = "Engagement",
    request_body = NewFeedback,
    responses(
        (status = 201, description = "Feedback recorded", body = Feedback),
        (status = 400, description = "Rating out of range")
    )
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(payload): Json<NewFeedback>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    let user_id = user.map(|Extension(u)| u.id);
    let feedback = state
        .engagement_service
        .submit_feedback(user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(feedback)))
}
