//! Issue handlers: public listings plus the role-gated publish and
//! upload paths.

use axum::{
    extract::{Multipart, Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use uuid::Uuid;

use super::resolve_caller;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{DepartmentIssue, Issue};
use crate::errors::{AppError, AppResult};
use crate::services::{DepartmentIssueMeta, GlobalIssueMeta, UploadFile};

/// Public issue routes
pub fn issue_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_issues))
        .route("/current", get(current_issue))
        .route("/:id/departments", get(list_department_issues))
}

/// Authenticated issue management routes
pub fn issue_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/global", post(upload_global_issue))
        .route("/department", post(upload_department_issue))
        .route("/:id/publish", post(publish_issue))
        .route("/:id/unpublish", post(unpublish_issue))
}

/// Pull the uploaded file and named text fields out of a multipart body.
async fn read_upload(
    mut multipart: Multipart,
) -> AppResult<(UploadFile, std::collections::HashMap<String, String>)> {
    let mut file: Option<UploadFile> = None;
    let mut fields = std::collections::HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed upload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let extension = field
                .file_name()
                .and_then(|f| f.rsplit('.').next())
                .unwrap_or_default()
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Malformed upload: {}", e)))?;
            file = Some(UploadFile {
                bytes: bytes.to_vec(),
                extension,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Malformed upload: {}", e)))?;
            fields.insert(name, value);
        }
    }

    let file = file.ok_or_else(|| AppError::validation("Missing file field"))?;
    Ok((file, fields))
}

fn required<'a>(
    fields: &'a std::collections::HashMap<String, String>,
    name: &str,
) -> AppResult<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| AppError::validation(format!("Missing {} field", name)))
}

/// List all issues
#[utoipa::path(
    get,
    path = "/issues",
    tag = "Issues",
    responses((status = 200, description = "Issues, newest period first", body = [Issue]))
)]
pub async fn list_issues(State(state): State<AppState>) -> AppResult<Json<Vec<Issue>>> {
    let issues = state.query_service.issues().await?;
    Ok(Json(issues))
}

/// Get the current issue (most recent published period)
#[utoipa::path(
    get,
    path = "/issues/current",
    tag = "Issues",
    responses(
        (status = 200, description = "Current issue, null when nothing is published", body = Issue)
    )
)]
pub async fn current_issue(State(state): State<AppState>) -> AppResult<Json<Option<Issue>>> {
    let issue = state.query_service.current_issue().await?;
    Ok(Json(issue))
}

/// List department contributions for an issue
#[utoipa::path(
    get,
    path = "/issues/{id}/departments",
    tag = "Issues",
    params(("id" = Uuid, Path, description = "Issue id")),
    responses((status = 200, description = "Department issues", body = [DepartmentIssue]))
)]
pub async fn list_department_issues(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<DepartmentIssue>>> {
    let department_issues = state.query_service.department_issues(id).await?;
    Ok(Json(department_issues))
}

/// Upload the global newsletter PDF for a (year, month) period.
/// Multipart fields: file, year, month, title. Admin/president only.
#[utoipa::path(
    post,
    path = "/issues/global",
    tag = "Issues",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Issue upserted and published", body = Issue),
        (status = 403, description = "Requires admin or president")
    )
)]
pub async fn upload_global_issue(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> AppResult<Json<Issue>> {
    let caller = resolve_caller(&state, &user).await?;
    let (file, fields) = read_upload(multipart).await?;

    let meta = GlobalIssueMeta {
        year: required(&fields, "year")?
            .parse()
            .map_err(|_| AppError::validation("Year must be a number"))?,
        month: required(&fields, "month")?
            .parse()
            .map_err(|_| AppError::validation("Month must be a number"))?,
        title: required(&fields, "title")?.to_string(),
    };

    let issue = state
        .moderation_service
        .upload_global_issue(&caller, file, meta)
        .await?;

    Ok(Json(issue))
}

/// Upload a department's PDF for an issue.
/// Multipart fields: file, issue_id, department_id, summary (optional).
/// Admin/president anywhere; contributors only for their own department.
#[utoipa::path(
    post,
    path = "/issues/department",
    tag = "Issues",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Department issue upserted and published", body = DepartmentIssue),
        (status = 403, description = "Not allowed for this department")
    )
)]
pub async fn upload_department_issue(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> AppResult<Json<DepartmentIssue>> {
    let caller = resolve_caller(&state, &user).await?;
    let (file, fields) = read_upload(multipart).await?;

    let meta = DepartmentIssueMeta {
        issue_id: required(&fields, "issue_id")?
            .parse()
            .map_err(|_| AppError::validation("issue_id must be a UUID"))?,
        department_id: required(&fields, "department_id")?
            .parse()
            .map_err(|_| AppError::validation("department_id must be a UUID"))?,
        summary: fields.get("summary").cloned().filter(|s| !s.is_empty()),
    };

    let department_issue = state
        .moderation_service
        .upload_department_issue(&caller, file, meta)
        .await?;

    Ok(Json(department_issue))
}

/// Publish an issue (idempotent)
#[utoipa::path(
    post,
    path = "/issues/{id}/publish",
    tag = "Issues",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Issue id")),
    responses(
        (status = 200, description = "Issue published", body = Issue),
        (status = 403, description = "Requires admin or president")
    )
)]
pub async fn publish_issue(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Issue>> {
    let caller = resolve_caller(&state, &user).await?;
    let issue = state.moderation_service.publish_issue(&caller, id).await?;

    Ok(Json(issue))
}

/// Unpublish an issue (no-op on drafts)
#[utoipa::path(
    post,
    path = "/issues/{id}/unpublish",
    tag = "Issues",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Issue id")),
    responses(
        (status = 200, description = "Issue unpublished", body = Issue),
        (status = 403, description = "Requires admin or president")
    )
)]
pub async fn unpublish_issue(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Issue>> {
    let caller = resolve_caller(&state, &user).await?;
    let issue = state
        .moderation_service
        .unpublish_issue(&caller, id)
        .await?;

    Ok(Json(issue))
}
