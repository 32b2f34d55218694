//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, dashboard_routes, department_routes, feedback_routes, issue_admin_routes,
    issue_routes, newsletter_admin_routes, newsletter_routes, notice_routes, profile_routes,
    reaction_count_routes, reaction_routes, submission_admin_routes, submission_routes,
    subscription_routes,
};
use super::middleware::{
    auth_middleware, optional_auth_middleware, rate_limit_form_middleware, rate_limit_middleware,
};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::MAX_UPLOAD_BYTES;

/// Create the application router with all routes configured
pub fn create_router(state: AppState, media_root: String) -> Router {
    // Multipart bodies carry PDFs; leave headroom over the file cap
    let upload_limit = DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024);

    Router::new()
        // Health check endpoints (no rate limiting)
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Stored PDFs and media
        .nest_service("/media", ServeDir::new(media_root))
        // Public reads
        .nest("/issues", issue_routes())
        .nest("/newsletters", newsletter_routes())
        .nest("/notices", notice_routes())
        .nest("/departments", department_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/reactions", reaction_count_routes())
        // Public forms (stricter rate limiting)
        .nest(
            "/auth",
            auth_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_form_middleware,
            )),
        )
        .nest(
            "/subscriptions",
            subscription_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_form_middleware,
            )),
        )
        .nest(
            "/submissions",
            submission_routes()
                .layer(upload_limit.clone())
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_form_middleware,
                )),
        )
        .nest(
            "/feedback",
            feedback_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    optional_auth_middleware,
                ))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_form_middleware,
                )),
        )
        // Authenticated routes (JWT + general rate limiting)
        .nest(
            "/reactions",
            reaction_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_middleware,
                )),
        )
        .nest(
            "/profiles",
            profile_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_middleware,
                )),
        )
        .nest(
            "/issues",
            issue_admin_routes()
                .layer(upload_limit)
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        .nest(
            "/newsletters",
            newsletter_admin_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        .nest(
            "/admin/submissions",
            submission_admin_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Chronicle - student club newsletter API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    redis: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database and Redis connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let redis_status = match state.cache.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let all_healthy = db_status.status == "healthy" && redis_status.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth {
            database: db_status,
            redis: redis_status,
        },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
