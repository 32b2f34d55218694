//! Notice board handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::Notice;
use crate::errors::AppResult;

#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub limit: Option<u64>,
}

/// Create notice board routes (public)
pub fn notice_routes() -> Router<AppState> {
    Router::new().route("/", get(active_notices))
}

/// Currently visible notices, pinned first
#[utoipa::path(
    get,
    path = "/notices",
    tag = "Notices",
    params(("limit" = Option<u64>, Query, description = "Optional cap on results")),
    responses((status = 200, description = "Active notices", body = [Notice]))
)]
pub async fn active_notices(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> AppResult<Json<Vec<Notice>>> {
    let notices = state.query_service.active_notices(query.limit).await?;
    Ok(Json(notices))
}
