//! Department reference data handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::Department;
use crate::errors::{AppError, AppResult};

/// Create department routes (public)
pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments))
        .route("/:slug", get(get_department))
}

/// List all departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "Departments",
    responses((status = 200, description = "Departments", body = [Department]))
)]
pub async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    let departments = state.query_service.departments().await?;
    Ok(Json(departments))
}

/// Get a department by slug
#[utoipa::path(
    get,
    path = "/departments/{slug}",
    tag = "Departments",
    params(("slug" = String, Path, description = "Department slug")),
    responses(
        (status = 200, description = "Department", body = Department),
        (status = 404, description = "Unknown slug")
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Department>> {
    let department = state
        .query_service
        .department_by_slug(slug)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(department))
}
