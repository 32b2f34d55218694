//! Moderation workflow engine.
//!
//! Owns every mutation of submission status, pinning, issue publication,
//! and the two upload paths. Role gates run before any storage or
//! repository write, so an unauthorized caller can never leave a partial
//! write behind.
//!
//! Submission state machine:
//!   pending -> approved | rejected   (moderator decision)
//!   rejected -> approved             (re-review)
//!   approved -> rejected             (disallowed; InvalidStateTransition)
//! Pinning is only legal while approved. Deletion is allowed from any
//! state and removes the row permanently.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::config::{MAX_UPLOAD_BYTES, STORAGE_PREFIX_DEPARTMENT, STORAGE_PREFIX_GLOBAL, STORAGE_PREFIX_SUBMISSIONS};
use crate::domain::{
    Caller, DepartmentIssue, Issue, ModerationDecision, NewSubmission, Newsletter, Role,
    Submission, SubmissionStatus, MODERATOR_ROLES, PUBLISHER_ROLES,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    DepartmentIssueRepository, DepartmentRepository, IssueRepository, NewsletterRepository,
    ProfileRepository, SubmissionFilter, SubmissionRepository, UpsertDepartmentIssue, UpsertIssue,
};
use crate::infra::ObjectStorage;

/// An uploaded file as received from the transport layer.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub bytes: Vec<u8>,
    /// File extension without the dot, e.g. "pdf"
    pub extension: String,
}

/// Metadata for a global newsletter upload, keyed on (year, month).
#[derive(Debug, Clone)]
pub struct GlobalIssueMeta {
    pub year: i32,
    pub month: i16,
    pub title: String,
}

/// Metadata for a department newsletter upload.
#[derive(Debug, Clone)]
pub struct DepartmentIssueMeta {
    pub issue_id: Uuid,
    pub department_id: Uuid,
    pub summary: Option<String>,
}

/// Moderation service trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationService: Send + Sync {
    /// Create a submission. Open to any visitor; status is forced to
    /// pending regardless of caller.
    async fn submit_content(&self, payload: NewSubmission) -> AppResult<Submission>;

    /// Store submission media before the record write; returns the public URL.
    async fn upload_submission_media(&self, file: UploadFile) -> AppResult<String>;

    /// Moderation queue listing, optionally filtered by status.
    /// Open to every moderation-capable role, including contributors.
    async fn list_submissions(
        &self,
        caller: &Caller,
        status: Option<SubmissionStatus>,
    ) -> AppResult<Vec<Submission>>;

    /// Apply a moderator decision to a submission.
    async fn moderate(
        &self,
        caller: &Caller,
        submission_id: Uuid,
        decision: ModerationDecision,
    ) -> AppResult<Submission>;

    /// Toggle the featured pin. Only legal while the submission is approved.
    async fn toggle_pin(&self, caller: &Caller, submission_id: Uuid) -> AppResult<Submission>;

    /// Permanently delete a submission, from any state.
    async fn delete_submission(&self, caller: &Caller, submission_id: Uuid) -> AppResult<()>;

    /// Upload the global PDF for (year, month), upserting the issue row
    /// and auto-publishing it.
    async fn upload_global_issue(
        &self,
        caller: &Caller,
        file: UploadFile,
        meta: GlobalIssueMeta,
    ) -> AppResult<Issue>;

    /// Upload one department's PDF for an issue, upserting the
    /// (issue, department) row and publishing it.
    async fn upload_department_issue(
        &self,
        caller: &Caller,
        file: UploadFile,
        meta: DepartmentIssueMeta,
    ) -> AppResult<DepartmentIssue>;

    /// Publish an issue. Idempotent: re-publishing refreshes the timestamp.
    async fn publish_issue(&self, caller: &Caller, issue_id: Uuid) -> AppResult<Issue>;

    /// Unpublish an issue. Unpublishing a draft is a no-op success.
    async fn unpublish_issue(&self, caller: &Caller, issue_id: Uuid) -> AppResult<Issue>;

    /// Flip a newsletter's publication flag. Same gate as issues.
    async fn set_newsletter_published(
        &self,
        caller: &Caller,
        newsletter_id: Uuid,
        published: bool,
    ) -> AppResult<Newsletter>;
}

/// Concrete implementation of `ModerationService`.
pub struct ModerationEngine {
    submissions: Arc<dyn SubmissionRepository>,
    issues: Arc<dyn IssueRepository>,
    department_issues: Arc<dyn DepartmentIssueRepository>,
    newsletters: Arc<dyn NewsletterRepository>,
    profiles: Arc<dyn ProfileRepository>,
    departments: Arc<dyn DepartmentRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl ModerationEngine {
    pub fn new(
        submissions: Arc<dyn SubmissionRepository>,
        issues: Arc<dyn IssueRepository>,
        department_issues: Arc<dyn DepartmentIssueRepository>,
        newsletters: Arc<dyn NewsletterRepository>,
        profiles: Arc<dyn ProfileRepository>,
        departments: Arc<dyn DepartmentRepository>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            submissions,
            issues,
            department_issues,
            newsletters,
            profiles,
            departments,
            storage,
        }
    }

    /// Moderation gate: admin/editor/president anywhere, contributor only
    /// for submissions naming their own department.
    async fn authorize_moderator(&self, caller: &Caller, submission: &Submission) -> AppResult<()> {
        if caller.has_role(&MODERATOR_ROLES) {
            return Ok(());
        }

        if caller.role == Some(Role::Contributor) {
            if let Some(profile) = self.profiles.find_by_user(caller.user_id).await? {
                if let Some(department_id) = profile.department_id {
                    if let Some(department) = self.departments.find_by_id(department_id).await? {
                        if department.name.eq_ignore_ascii_case(&submission.department) {
                            return Ok(());
                        }
                    }
                }
            }
        }

        Err(AppError::PermissionDenied)
    }

    fn validate_file(file: &UploadFile) -> AppResult<String> {
        if file.bytes.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if file.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::validation("Uploaded file exceeds the size limit"));
        }

        let extension = file.extension.to_ascii_lowercase();
        if extension.is_empty()
            || extension.len() > 8
            || !extension.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::validation("Invalid file extension"));
        }

        Ok(extension)
    }

    /// Attach the stored object URL to a failed record write so a retry
    /// can skip re-uploading. The object itself is left as an orphan; the
    /// store exposes no transaction spanning both systems.
    fn with_object_context(err: AppError, url: &str) -> AppError {
        match err {
            AppError::Unavailable(msg) => {
                AppError::Unavailable(format!("{} (uploaded file kept at {})", msg, url))
            }
            AppError::Conflict(msg) => {
                AppError::Conflict(format!("{} (uploaded file kept at {})", msg, url))
            }
            other => other,
        }
    }
}

#[async_trait]
impl ModerationService for ModerationEngine {
    async fn submit_content(&self, payload: NewSubmission) -> AppResult<Submission> {
        payload
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let submission = self.submissions.create(payload).await?;

        tracing::info!(submission = %submission.id, "Submission received");

        Ok(submission)
    }

    async fn upload_submission_media(&self, file: UploadFile) -> AppResult<String> {
        let extension = Self::validate_file(&file)?;
        let path = format!(
            "{}/{}.{}",
            STORAGE_PREFIX_SUBMISSIONS,
            Uuid::new_v4(),
            extension
        );

        self.storage.put(&path, file.bytes).await
    }

    async fn list_submissions(
        &self,
        caller: &Caller,
        status: Option<SubmissionStatus>,
    ) -> AppResult<Vec<Submission>> {
        if !caller.has_role(&MODERATOR_ROLES) && caller.role != Some(Role::Contributor) {
            return Err(AppError::PermissionDenied);
        }

        self.submissions
            .list(SubmissionFilter {
                status,
                department: None,
                category: None,
            })
            .await
    }

    async fn moderate(
        &self,
        caller: &Caller,
        submission_id: Uuid,
        decision: ModerationDecision,
    ) -> AppResult<Submission> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.authorize_moderator(caller, &submission).await?;

        let target = decision.as_status();

        // Only forward corrections: an approved submission cannot be
        // demoted; re-review of a rejected one is allowed.
        if submission.status == SubmissionStatus::Approved
            && target == SubmissionStatus::Rejected
        {
            return Err(AppError::invalid_transition(
                "An approved submission cannot be rejected",
            ));
        }

        if submission.status == target {
            return Ok(submission);
        }

        let updated = self
            .submissions
            .update_status(submission_id, target, caller.user_id)
            .await?;

        tracing::info!(
            submission = %submission_id,
            moderator = %caller.user_id,
            from = %submission.status,
            to = %target,
            "Submission moderated"
        );

        Ok(updated)
    }

    async fn toggle_pin(&self, caller: &Caller, submission_id: Uuid) -> AppResult<Submission> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.authorize_moderator(caller, &submission).await?;

        if !submission.can_pin() {
            return Err(AppError::invalid_transition(
                "Only approved submissions can be pinned",
            ));
        }

        let updated = self
            .submissions
            .set_pinned(submission_id, !submission.pinned)
            .await?;

        tracing::info!(
            submission = %submission_id,
            pinned = updated.pinned,
            "Submission pin toggled"
        );

        Ok(updated)
    }

    async fn delete_submission(&self, caller: &Caller, submission_id: Uuid) -> AppResult<()> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.authorize_moderator(caller, &submission).await?;

        self.submissions.delete(submission_id).await?;

        tracing::info!(
            submission = %submission_id,
            moderator = %caller.user_id,
            "Submission deleted"
        );

        Ok(())
    }

    async fn upload_global_issue(
        &self,
        caller: &Caller,
        file: UploadFile,
        meta: GlobalIssueMeta,
    ) -> AppResult<Issue> {
        // Fail fast: no storage or repository write for an unauthorized caller
        if !caller.has_role(&PUBLISHER_ROLES) {
            return Err(AppError::PermissionDenied);
        }

        if !(1..=12).contains(&meta.month) {
            return Err(AppError::validation("Month must be between 1 and 12"));
        }
        if meta.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        let extension = Self::validate_file(&file)?;

        let path = format!(
            "{}/{}-{:02}-newsletter.{}",
            STORAGE_PREFIX_GLOBAL, meta.year, meta.month, extension
        );
        let url = self.storage.put(&path, file.bytes).await?;

        // Record write only after the object is durably stored.
        let issue = self
            .issues
            .upsert_by_period(UpsertIssue {
                year: meta.year,
                month: meta.month,
                title: meta.title,
                global_pdf_url: Some(url.clone()),
                published_at: Some(Utc::now()),
                created_by: Some(caller.user_id),
            })
            .await
            .map_err(|e| Self::with_object_context(e, &url))?;

        tracing::info!(
            issue = %issue.id,
            year = issue.year,
            month = issue.month,
            uploader = %caller.user_id,
            "Global issue uploaded and published"
        );

        Ok(issue)
    }

    async fn upload_department_issue(
        &self,
        caller: &Caller,
        file: UploadFile,
        meta: DepartmentIssueMeta,
    ) -> AppResult<DepartmentIssue> {
        // Publishers upload anywhere; contributors only to their own department
        let authorized = if caller.has_role(&PUBLISHER_ROLES) {
            true
        } else if caller.role == Some(Role::Contributor) {
            let profile = self.profiles.find_by_user(caller.user_id).await?;
            profile
                .and_then(|p| p.department_id)
                .map(|d| d == meta.department_id)
                .unwrap_or(false)
        } else {
            false
        };

        if !authorized {
            return Err(AppError::PermissionDenied);
        }

        let extension = Self::validate_file(&file)?;

        // Referenced rows must exist before anything is written
        if self.issues.find_by_id(meta.issue_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        if self
            .departments
            .find_by_id(meta.department_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound);
        }

        let path = format!(
            "{}/{}/{}.{}",
            STORAGE_PREFIX_DEPARTMENT, meta.department_id, meta.issue_id, extension
        );
        let url = self.storage.put(&path, file.bytes).await?;

        let department_issue = self
            .department_issues
            .upsert(UpsertDepartmentIssue {
                issue_id: meta.issue_id,
                department_id: meta.department_id,
                summary: meta.summary,
                pdf_url: Some(url.clone()),
                published_at: Some(Utc::now()),
                created_by: Some(caller.user_id),
            })
            .await
            .map_err(|e| Self::with_object_context(e, &url))?;

        tracing::info!(
            issue = %meta.issue_id,
            department = %meta.department_id,
            uploader = %caller.user_id,
            "Department issue uploaded and published"
        );

        Ok(department_issue)
    }

    async fn publish_issue(&self, caller: &Caller, issue_id: Uuid) -> AppResult<Issue> {
        if !caller.has_role(&PUBLISHER_ROLES) {
            return Err(AppError::PermissionDenied);
        }

        let issue = self
            .issues
            .set_published_at(issue_id, Some(Utc::now()))
            .await?;

        tracing::info!(issue = %issue_id, publisher = %caller.user_id, "Issue published");

        Ok(issue)
    }

    async fn unpublish_issue(&self, caller: &Caller, issue_id: Uuid) -> AppResult<Issue> {
        if !caller.has_role(&PUBLISHER_ROLES) {
            return Err(AppError::PermissionDenied);
        }

        let issue = self
            .issues
            .find_by_id(issue_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Already a draft: nothing to clear
        if !issue.is_published() {
            return Ok(issue);
        }

        let issue = self.issues.set_published_at(issue_id, None).await?;

        tracing::info!(issue = %issue_id, publisher = %caller.user_id, "Issue unpublished");

        Ok(issue)
    }

    async fn set_newsletter_published(
        &self,
        caller: &Caller,
        newsletter_id: Uuid,
        published: bool,
    ) -> AppResult<Newsletter> {
        if !caller.has_role(&PUBLISHER_ROLES) {
            return Err(AppError::PermissionDenied);
        }

        let newsletter = self.newsletters.set_published(newsletter_id, published).await?;

        tracing::info!(
            newsletter = %newsletter_id,
            published,
            "Newsletter publication changed"
        );

        Ok(newsletter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Profile;
    use crate::infra::repositories::{
        MockDepartmentIssueRepository, MockDepartmentRepository, MockIssueRepository,
        MockNewsletterRepository, MockProfileRepository, MockSubmissionRepository,
    };
    use crate::infra::storage::MockObjectStorage;

    struct Mocks {
        submissions: MockSubmissionRepository,
        issues: MockIssueRepository,
        department_issues: MockDepartmentIssueRepository,
        newsletters: MockNewsletterRepository,
        profiles: MockProfileRepository,
        departments: MockDepartmentRepository,
        storage: MockObjectStorage,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                submissions: MockSubmissionRepository::new(),
                issues: MockIssueRepository::new(),
                department_issues: MockDepartmentIssueRepository::new(),
                newsletters: MockNewsletterRepository::new(),
                profiles: MockProfileRepository::new(),
                departments: MockDepartmentRepository::new(),
                storage: MockObjectStorage::new(),
            }
        }

        fn into_engine(self) -> ModerationEngine {
            ModerationEngine::new(
                Arc::new(self.submissions),
                Arc::new(self.issues),
                Arc::new(self.department_issues),
                Arc::new(self.newsletters),
                Arc::new(self.profiles),
                Arc::new(self.departments),
                Arc::new(self.storage),
            )
        }
    }

    fn submission(id: Uuid, status: SubmissionStatus, pinned: bool) -> Submission {
        Submission {
            id,
            title: "Robotics demo".to_string(),
            summary: "Line follower".to_string(),
            category: "Project".to_string(),
            department: "Computer Engineering".to_string(),
            semester: Some(5),
            media_url: None,
            external_link: None,
            submitter_name: "A. Student".to_string(),
            submitter_email: None,
            status,
            pinned,
            moderated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn editor() -> Caller {
        Caller::new(Uuid::new_v4(), Some(Role::Editor))
    }

    #[tokio::test]
    async fn pending_submission_can_be_approved() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks
            .submissions
            .expect_find_by_id()
            .returning(move |id| Ok(Some(submission(id, SubmissionStatus::Pending, false))));
        mocks
            .submissions
            .expect_update_status()
            .withf(|_, status, _| *status == SubmissionStatus::Approved)
            .returning(|id, status, _| Ok(submission(id, status, false)));

        let engine = mocks.into_engine();
        let result = engine
            .moderate(&editor(), id, ModerationDecision::Approved)
            .await
            .unwrap();

        assert_eq!(result.status, SubmissionStatus::Approved);
    }

    #[tokio::test]
    async fn rejected_submission_can_be_re_reviewed() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks
            .submissions
            .expect_find_by_id()
            .returning(move |id| Ok(Some(submission(id, SubmissionStatus::Rejected, false))));
        mocks
            .submissions
            .expect_update_status()
            .returning(|id, status, _| Ok(submission(id, status, false)));

        let engine = mocks.into_engine();
        let result = engine
            .moderate(&editor(), id, ModerationDecision::Approved)
            .await
            .unwrap();

        assert_eq!(result.status, SubmissionStatus::Approved);
    }

    #[tokio::test]
    async fn approved_submission_cannot_be_rejected() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks
            .submissions
            .expect_find_by_id()
            .returning(move |id| Ok(Some(submission(id, SubmissionStatus::Approved, false))));
        mocks.submissions.expect_update_status().never();

        let engine = mocks.into_engine();
        let result = engine
            .moderate(&editor(), id, ModerationDecision::Rejected)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidTransition(_)
        ));
    }

    #[tokio::test]
    async fn viewer_cannot_moderate() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks
            .submissions
            .expect_find_by_id()
            .returning(move |id| Ok(Some(submission(id, SubmissionStatus::Pending, false))));
        mocks.submissions.expect_update_status().never();

        let engine = mocks.into_engine();
        let caller = Caller::new(Uuid::new_v4(), Some(Role::Viewer));
        let result = engine
            .moderate(&caller, id, ModerationDecision::Approved)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn contributor_moderates_only_matching_department() {
        let id = Uuid::new_v4();
        let contributor = Caller::new(Uuid::new_v4(), Some(Role::Contributor));
        let department_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks
            .submissions
            .expect_find_by_id()
            .returning(move |id| Ok(Some(submission(id, SubmissionStatus::Pending, false))));
        mocks.profiles.expect_find_by_user().returning(move |user_id| {
            Ok(Some(Profile {
                id: Uuid::new_v4(),
                user_id,
                full_name: None,
                phone: None,
                department_id: Some(department_id),
                semester: None,
                avatar_url: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        mocks.departments.expect_find_by_id().returning(move |id| {
            Ok(Some(crate::domain::Department {
                id,
                name: "Computer Engineering".to_string(),
                short_name: "CE".to_string(),
                slug: "computer-engineering".to_string(),
                category: crate::domain::DepartmentCategory::Engineering,
                description: None,
                created_at: Utc::now(),
            }))
        });
        mocks
            .submissions
            .expect_update_status()
            .returning(|id, status, _| Ok(submission(id, status, false)));

        let engine = mocks.into_engine();
        let result = engine
            .moderate(&contributor, id, ModerationDecision::Approved)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn pin_fails_on_pending_submission() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks
            .submissions
            .expect_find_by_id()
            .returning(move |id| Ok(Some(submission(id, SubmissionStatus::Pending, false))));
        mocks.submissions.expect_set_pinned().never();

        let engine = mocks.into_engine();
        let result = engine.toggle_pin(&editor(), id).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidTransition(_)
        ));
    }

    #[tokio::test]
    async fn pin_toggles_on_approved_submission() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks
            .submissions
            .expect_find_by_id()
            .returning(move |id| Ok(Some(submission(id, SubmissionStatus::Approved, false))));
        mocks
            .submissions
            .expect_set_pinned()
            .withf(|_, pinned| *pinned)
            .returning(|id, pinned| {
                let mut s = submission(id, SubmissionStatus::Approved, false);
                s.pinned = pinned;
                Ok(s)
            });

        let engine = mocks.into_engine();
        let result = engine.toggle_pin(&editor(), id).await.unwrap();

        assert!(result.pinned);
    }

    #[tokio::test]
    async fn unauthorized_upload_never_touches_storage() {
        let mut mocks = Mocks::new();
        mocks.storage.expect_put().never();
        mocks.issues.expect_upsert_by_period().never();

        let engine = mocks.into_engine();
        let result = engine
            .upload_global_issue(
                &editor(), // editors moderate but do not publish
                UploadFile {
                    bytes: vec![1],
                    extension: "pdf".to_string(),
                },
                GlobalIssueMeta {
                    year: 2025,
                    month: 6,
                    title: "June issue".to_string(),
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn contributor_uploads_only_to_own_department() {
        let own_department = Uuid::new_v4();
        let other_department = Uuid::new_v4();
        let contributor = Caller::new(Uuid::new_v4(), Some(Role::Contributor));

        let mut mocks = Mocks::new();
        mocks.profiles.expect_find_by_user().returning(move |user_id| {
            Ok(Some(Profile {
                id: Uuid::new_v4(),
                user_id,
                full_name: None,
                phone: None,
                department_id: Some(own_department),
                semester: None,
                avatar_url: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        mocks.storage.expect_put().never();

        let engine = mocks.into_engine();
        let result = engine
            .upload_department_issue(
                &contributor,
                UploadFile {
                    bytes: vec![1],
                    extension: "pdf".to_string(),
                },
                DepartmentIssueMeta {
                    issue_id: Uuid::new_v4(),
                    department_id: other_department,
                    summary: None,
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn unpublish_draft_is_noop_success() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks.issues.expect_find_by_id().returning(move |id| {
            Ok(Some(Issue {
                id,
                year: 2025,
                month: 5,
                title: "May issue".to_string(),
                global_pdf_url: None,
                published_at: None,
                created_by: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        mocks.issues.expect_set_published_at().never();

        let engine = mocks.into_engine();
        let caller = Caller::new(Uuid::new_v4(), Some(Role::President));
        let result = engine.unpublish_issue(&caller, id).await.unwrap();

        assert!(!result.is_published());
    }
}

