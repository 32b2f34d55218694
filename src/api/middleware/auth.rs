//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated user extracted from JWT token.
///
/// Carries identity only; the effective role is resolved per request
/// through the role service so fresh assignments apply immediately.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

fn user_from_bearer(state: &AppState, auth_header: &str) -> Result<CurrentUser, AppError> {
    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    Ok(CurrentUser {
        id: claims.sub,
        email: claims.email,
    })
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let current_user = user_from_bearer(&state, auth_header)?;
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Best-effort authentication for endpoints open to anonymous callers
/// (feedback). A valid bearer token attaches the user; anything else
/// passes through anonymously.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Ok(current_user) = user_from_bearer(&state, auth_header) {
            request.extensions_mut().insert(current_user);
        }
    }

    next.run(request).await
}
