//! Dashboard read models: activity feed, stats, trending, spotlight.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::config::{ACTIVITY_FEED_LIMIT, SPOTLIGHT_LIMIT, TRENDING_LIMIT, TRENDING_WINDOW_DAYS};
use crate::domain::{ActivityItem, RankedNewsletter, Submission};
use crate::errors::AppResult;
use crate::services::Stats;

/// Create dashboard routes (public reads)
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/activity", get(recent_activity))
        .route("/stats", get(stats))
        .route("/trending", get(trending))
        .route("/spotlight", get(spotlight))
}

/// Recent activity feed across submissions, newsletters, and feedback
#[utoipa::path(
    get,
    path = "/dashboard/activity",
    tag = "Dashboard",
    responses((status = 200, description = "Recent activity", body = [ActivityItem]))
)]
pub async fn recent_activity(State(state): State<AppState>) -> AppResult<Json<Vec<ActivityItem>>> {
    let feed = state
        .query_service
        .recent_activity(ACTIVITY_FEED_LIMIT)
        .await?;

    Ok(Json(feed))
}

/// Site-wide counters
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "Dashboard",
    responses((status = 200, description = "Stats", body = Stats))
)]
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<Stats>> {
    let stats = state.query_service.stats().await?;
    Ok(Json(stats))
}

/// Most liked newsletters from the trailing window
#[utoipa::path(
    get,
    path = "/dashboard/trending",
    tag = "Dashboard",
    responses((status = 200, description = "Trending newsletters", body = [RankedNewsletter]))
)]
pub async fn trending(State(state): State<AppState>) -> AppResult<Json<Vec<RankedNewsletter>>> {
    let ranked = state
        .query_service
        .trending_newsletters(TRENDING_WINDOW_DAYS, TRENDING_LIMIT as usize)
        .await?;

    Ok(Json(ranked))
}

/// Pinned, approved submissions shown prominently
#[utoipa::path(
    get,
    path = "/dashboard/spotlight",
    tag = "Dashboard",
    responses((status = 200, description = "Spotlight submissions", body = [Submission]))
)]
pub async fn spotlight(State(state): State<AppState>) -> AppResult<Json<Vec<Submission>>> {
    let submissions = state
        .query_service
        .spotlight_submissions(SPOTLIGHT_LIMIT)
        .await?;

    Ok(Json(submissions))
}
