//! Subscription handlers: double-opt-in subscribe and confirm.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::SubscribeRequest;
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Confirmation token payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmRequest {
    pub token: String,
}

/// Create subscription routes (public)
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscribe))
        .route("/confirm", post(confirm))
}

/// Subscribe to the newsletter (double opt-in)
#[utoipa::path(
    post,
    path = "/subscriptions/subscribe",
    tag = "Subscriptions",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription created; confirmation sent"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Already subscribed and confirmed")
    )
)]
pub async fn subscribe(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SubscribeRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.subscription_service.subscribe(payload).await?;

    Ok(Json(ApiResponse::message(
        "Subscription created successfully. Please check your email for confirmation.",
    )))
}

/// Redeem a confirmation token
#[utoipa::path(
    post,
    path = "/subscriptions/confirm",
    tag = "Subscriptions",
    request_body = ConfirmRequest,
    responses(
        (status = 200, description = "Subscription confirmed"),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn confirm(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let outcome = state.subscription_service.confirm(&payload.token).await?;

    let message = if outcome.already_confirmed {
        "Email already confirmed"
    } else {
        "Email confirmed successfully!"
    };

    Ok(Json(ApiResponse::message(message)))
}
