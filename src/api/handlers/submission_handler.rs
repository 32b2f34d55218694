//! Submission handlers: the public form, the students listing, and the
//! moderation surface.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::resolve_caller;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ModerationDecision, NewSubmission, Submission, SubmissionStatus};
use crate::errors::{AppError, AppResult};
use crate::services::UploadFile;
use crate::types::ApiResponse;

/// Filters for the public students listing
#[derive(Debug, Deserialize)]
pub struct StudentsQuery {
    pub department: Option<String>,
    pub category: Option<String>,
}

/// Status filter for the moderation queue
#[derive(Debug, Deserialize)]
pub struct ModerationQuery {
    pub status: Option<SubmissionStatus>,
}

/// Moderation decision payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct ModerateRequest {
    pub decision: ModerationDecision,
}

/// URL of an uploaded media object
#[derive(Debug, Serialize, ToSchema)]
pub struct MediaUploadResponse {
    pub url: String,
}

/// Public submission routes (form + listing)
pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_submission).get(list_approved))
        .route("/media", post(upload_media))
}

/// Authenticated moderation routes
pub fn submission_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_for_moderation))
        .route("/:id/moderate", post(moderate))
        .route("/:id/pin", post(toggle_pin))
        .route("/:id", delete(delete_submission))
}

/// Submit a showcase item. Open to any visitor; always starts pending.
#[utoipa::path(
    post,
    path = "/submissions",
    tag = "Submissions",
    request_body = NewSubmission,
    responses(
        (status = 201, description = "Submission received, pending review", body = Submission),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_submission(
    State(state): State<AppState>,
    Json(payload): Json<NewSubmission>,
) -> AppResult<(StatusCode, Json<Submission>)> {
    let submission = state.moderation_service.submit_content(payload).await?;

    Ok((StatusCode::CREATED, Json(submission)))
}

/// Upload submission media (image/video) before submitting the form
#[utoipa::path(
    post,
    path = "/submissions/media",
    tag = "Submissions",
    responses(
        (status = 200, description = "Media stored", body = MediaUploadResponse),
        (status = 400, description = "Invalid or oversized file")
    )
)]
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<MediaUploadResponse>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed upload: {}", e)))?
        .ok_or_else(|| AppError::validation("Missing file field"))?;

    let extension = field
        .file_name()
        .and_then(|f| f.rsplit('.').next())
        .unwrap_or_default()
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::validation(format!("Malformed upload: {}", e)))?;

    let url = state
        .moderation_service
        .upload_submission_media(UploadFile {
            bytes: bytes.to_vec(),
            extension,
        })
        .await?;

    Ok(Json(MediaUploadResponse { url }))
}

/// Public students listing: approved submissions only
#[utoipa::path(
    get,
    path = "/submissions",
    tag = "Submissions",
    params(
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses((status = 200, description = "Approved submissions", body = [Submission]))
)]
pub async fn list_approved(
    State(state): State<AppState>,
    Query(query): Query<StudentsQuery>,
) -> AppResult<Json<Vec<Submission>>> {
    let submissions = state
        .query_service
        .approved_submissions(query.department, query.category)
        .await?;

    Ok(Json(submissions))
}

/// Moderation queue listing, any status
#[utoipa::path(
    get,
    path = "/admin/submissions",
    tag = "Moderation",
    security(("bearer_auth" = [])),
    params(("status" = Option<String>, Query, description = "Filter by status")),
    responses(
        (status = 200, description = "Submissions", body = [Submission]),
        (status = 403, description = "Not a moderation-capable role")
    )
)]
pub async fn list_for_moderation(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ModerationQuery>,
) -> AppResult<Json<Vec<Submission>>> {
    let caller = resolve_caller(&state, &user).await?;
    let submissions = state
        .moderation_service
        .list_submissions(&caller, query.status)
        .await?;

    Ok(Json(submissions))
}

/// Approve or reject a submission
#[utoipa::path(
    post,
    path = "/admin/submissions/{id}/moderate",
    tag = "Moderation",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Submission id")),
    request_body = ModerateRequest,
    responses(
        (status = 200, description = "Decision applied", body = Submission),
        (status = 403, description = "Role gate failed"),
        (status = 422, description = "Illegal transition")
    )
)]
pub async fn moderate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModerateRequest>,
) -> AppResult<Json<Submission>> {
    let caller = resolve_caller(&state, &user).await?;
    let submission = state
        .moderation_service
        .moderate(&caller, id, payload.decision)
        .await?;

    Ok(Json(submission))
}

/// Toggle the featured pin on an approved submission
#[utoipa::path(
    post,
    path = "/admin/submissions/{id}/pin",
    tag = "Moderation",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Pin toggled", body = Submission),
        (status = 422, description = "Submission is not approved")
    )
)]
pub async fn toggle_pin(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Submission>> {
    let caller = resolve_caller(&state, &user).await?;
    let submission = state.moderation_service.toggle_pin(&caller, id).await?;

    Ok(Json(submission))
}

/// Permanently delete a submission
#[utoipa::path(
    delete,
    path = "/admin/submissions/{id}",
    tag = "Moderation",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Submission deleted"),
        (status = 404, description = "Unknown submission")
    )
)]
pub async fn delete_submission(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let caller = resolve_caller(&state, &user).await?;
    state
        .moderation_service
        .delete_submission(&caller, id)
        .await?;

    Ok(Json(ApiResponse::message("Submission deleted")))
}
