//! Issue and department-issue repositories.
//!
//! Both upserts are keyed on their natural key — (year, month) for issues,
//! (issue_id, department_id) for department issues — and are executed as a
//! single conditional insert, so concurrent uploads for the same key cannot
//! race into duplicate rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::department_issue::{
    self, ActiveModel as DepartmentIssueActiveModel, Entity as DepartmentIssueEntity,
};
use super::entities::issue::{self, ActiveModel as IssueActiveModel, Entity as IssueEntity};
use crate::domain::{DepartmentIssue, Issue};
use crate::errors::{AppError, AppResult};

/// Upsert payload for a global issue, keyed on (year, month).
#[derive(Debug, Clone)]
pub struct UpsertIssue {
    pub year: i32,
    pub month: i16,
    pub title: String,
    pub global_pdf_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
}

/// Upsert payload for a department issue, keyed on (issue_id, department_id).
#[derive(Debug, Clone)]
pub struct UpsertDepartmentIssue {
    pub issue_id: Uuid,
    pub department_id: Uuid,
    pub summary: Option<String>,
    pub pdf_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
}

/// Issue repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// All issues, newest calendar period first.
    async fn list(&self) -> AppResult<Vec<Issue>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Issue>>;

    /// Most recent published issue by (year, month), if any.
    async fn latest_published(&self) -> AppResult<Option<Issue>>;

    /// Insert or overwrite the issue for the given (year, month).
    /// The second write for the same period wins; no duplicate is created.
    async fn upsert_by_period(&self, payload: UpsertIssue) -> AppResult<Issue>;

    /// Set or clear `published_at`. Setting it on an already-published
    /// issue refreshes the timestamp; clearing a draft is a no-op success.
    async fn set_published_at(
        &self,
        id: Uuid,
        published_at: Option<DateTime<Utc>>,
    ) -> AppResult<Issue>;
}

/// Department issue repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentIssueRepository: Send + Sync {
    /// Contributions attached to one issue, newest first.
    async fn list_for_issue(&self, issue_id: Uuid) -> AppResult<Vec<DepartmentIssue>>;

    async fn list_for_department(&self, department_id: Uuid) -> AppResult<Vec<DepartmentIssue>>;

    /// Insert or overwrite the row for (issue_id, department_id).
    async fn upsert(&self, payload: UpsertDepartmentIssue) -> AppResult<DepartmentIssue>;
}

/// SeaORM-backed implementation of `IssueRepository`.
pub struct IssueStore {
    db: DatabaseConnection,
}

impl IssueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IssueRepository for IssueStore {
    async fn list(&self) -> AppResult<Vec<Issue>> {
        let models = IssueEntity::find()
            .order_by_desc(issue::Column::Year)
            .order_by_desc(issue::Column::Month)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Issue::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Issue>> {
        let result = IssueEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Issue::from))
    }

    async fn latest_published(&self) -> AppResult<Option<Issue>> {
        let result = IssueEntity::find()
            .filter(issue::Column::PublishedAt.is_not_null())
            .order_by_desc(issue::Column::Year)
            .order_by_desc(issue::Column::Month)
            .limit(1)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Issue::from))
    }

    async fn upsert_by_period(&self, payload: UpsertIssue) -> AppResult<Issue> {
        let now = Utc::now();
        let active_model = IssueActiveModel {
            id: Set(Uuid::new_v4()),
            year: Set(payload.year),
            month: Set(payload.month),
            title: Set(payload.title),
            global_pdf_url: Set(payload.global_pdf_url),
            published_at: Set(payload.published_at),
            created_by: Set(payload.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = IssueEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([issue::Column::Year, issue::Column::Month])
                    .update_columns([
                        issue::Column::Title,
                        issue::Column::GlobalPdfUrl,
                        issue::Column::PublishedAt,
                        issue::Column::CreatedBy,
                        issue::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Issue::from(model))
    }

    async fn set_published_at(
        &self,
        id: Uuid,
        published_at: Option<DateTime<Utc>>,
    ) -> AppResult<Issue> {
        let existing = IssueEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: IssueActiveModel = existing.into();
        active.published_at = Set(published_at);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Issue::from(model))
    }
}

/// SeaORM-backed implementation of `DepartmentIssueRepository`.
pub struct DepartmentIssueStore {
    db: DatabaseConnection,
}

impl DepartmentIssueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentIssueRepository for DepartmentIssueStore {
    async fn list_for_issue(&self, issue_id: Uuid) -> AppResult<Vec<DepartmentIssue>> {
        let models = DepartmentIssueEntity::find()
            .filter(department_issue::Column::IssueId.eq(issue_id))
            .order_by_desc(department_issue::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(DepartmentIssue::from).collect())
    }

    async fn list_for_department(&self, department_id: Uuid) -> AppResult<Vec<DepartmentIssue>> {
        let models = DepartmentIssueEntity::find()
            .filter(department_issue::Column::DepartmentId.eq(department_id))
            .order_by_desc(department_issue::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(DepartmentIssue::from).collect())
    }

    async fn upsert(&self, payload: UpsertDepartmentIssue) -> AppResult<DepartmentIssue> {
        let now = Utc::now();
        let active_model = DepartmentIssueActiveModel {
            id: Set(Uuid::new_v4()),
            issue_id: Set(payload.issue_id),
            department_id: Set(payload.department_id),
            summary: Set(payload.summary),
            pdf_url: Set(payload.pdf_url),
            published_at: Set(payload.published_at),
            created_by: Set(payload.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = DepartmentIssueEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    department_issue::Column::IssueId,
                    department_issue::Column::DepartmentId,
                ])
                .update_columns([
                    department_issue::Column::Summary,
                    department_issue::Column::PdfUrl,
                    department_issue::Column::PublishedAt,
                    department_issue::Column::CreatedBy,
                    department_issue::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(DepartmentIssue::from(model))
    }
}
