//! Submission repository.
//!
//! Creation always writes `pending`/unpinned regardless of caller; the
//! status, pinned, and moderated_by columns are only touched through the
//! explicit moderation methods below.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::submission::{self, ActiveModel, Entity as SubmissionEntity};
use crate::domain::{NewSubmission, Submission, SubmissionStatus};
use crate::errors::{AppError, AppResult};

/// Filters for submission listings. All fields are optional and combined
/// with AND; ordering is always newest first.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub status: Option<SubmissionStatus>,
    pub department: Option<String>,
    pub category: Option<String>,
}

/// Submission repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert a new submission in the initial pending state.
    async fn create(&self, payload: NewSubmission) -> AppResult<Submission>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>>;

    async fn list(&self, filter: SubmissionFilter) -> AppResult<Vec<Submission>>;

    /// Most recent submissions in any state, for the activity feed.
    async fn latest(&self, limit: u64) -> AppResult<Vec<Submission>>;

    /// Approved and pinned submissions, newest first.
    async fn spotlight(&self, limit: u64) -> AppResult<Vec<Submission>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
        moderated_by: Uuid,
    ) -> AppResult<Submission>;

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> AppResult<Submission>;

    /// Remove the row permanently. No tombstone is kept.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count_with_status(&self, status: SubmissionStatus) -> AppResult<u64>;

    async fn count_with_status_since(
        &self,
        status: SubmissionStatus,
        cutoff: DateTime<Utc>,
    ) -> AppResult<u64>;
}

/// SeaORM-backed implementation of `SubmissionRepository`.
pub struct SubmissionStore {
    db: DatabaseConnection,
}

impl SubmissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubmissionRepository for SubmissionStore {
    async fn create(&self, payload: NewSubmission) -> AppResult<Submission> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(payload.title),
            summary: Set(payload.summary),
            category: Set(payload.category),
            department: Set(payload.department),
            semester: Set(payload.semester),
            media_url: Set(payload.media_url),
            external_link: Set(payload.external_link),
            submitter_name: Set(payload.submitter_name),
            submitter_email: Set(payload.submitter_email),
            status: Set(SubmissionStatus::Pending.as_str().to_string()),
            pinned: Set(false),
            moderated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Submission::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>> {
        let result = SubmissionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Submission::from))
    }

    async fn list(&self, filter: SubmissionFilter) -> AppResult<Vec<Submission>> {
        let mut query = SubmissionEntity::find();

        if let Some(status) = filter.status {
            query = query.filter(submission::Column::Status.eq(status.as_str()));
        }
        if let Some(department) = filter.department {
            query = query.filter(submission::Column::Department.eq(department));
        }
        if let Some(category) = filter.category {
            query = query.filter(submission::Column::Category.eq(category));
        }

        let models = query
            .order_by_desc(submission::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Submission::from).collect())
    }

    async fn latest(&self, limit: u64) -> AppResult<Vec<Submission>> {
        let models = SubmissionEntity::find()
            .order_by_desc(submission::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Submission::from).collect())
    }

    async fn spotlight(&self, limit: u64) -> AppResult<Vec<Submission>> {
        let models = SubmissionEntity::find()
            .filter(submission::Column::Status.eq(SubmissionStatus::Approved.as_str()))
            .filter(submission::Column::Pinned.eq(true))
            .order_by_desc(submission::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Submission::from).collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
        moderated_by: Uuid,
    ) -> AppResult<Submission> {
        let existing = SubmissionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.moderated_by = Set(Some(moderated_by));
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Submission::from(model))
    }

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> AppResult<Submission> {
        let existing = SubmissionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.pinned = Set(pinned);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Submission::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = SubmissionEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count_with_status(&self, status: SubmissionStatus) -> AppResult<u64> {
        SubmissionEntity::find()
            .filter(submission::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count_with_status_since(
        &self,
        status: SubmissionStatus,
        cutoff: DateTime<Utc>,
    ) -> AppResult<u64> {
        SubmissionEntity::find()
            .filter(submission::Column::Status.eq(status.as_str()))
            .filter(submission::Column::CreatedAt.gte(cutoff))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
