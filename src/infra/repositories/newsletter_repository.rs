//! Newsletter archive repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::newsletter::{self, ActiveModel, Entity as NewsletterEntity};
use crate::domain::Newsletter;
use crate::errors::{AppError, AppResult};

/// Newsletter repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    /// Published newsletters, newest period first.
    async fn list_published(&self) -> AppResult<Vec<Newsletter>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Newsletter>>;

    /// Published newsletters created on or after `cutoff`, newest first.
    /// Feeds the trending ranking window.
    async fn published_since(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Newsletter>>;

    /// Most recently created published newsletters, for the activity feed.
    async fn latest_published(&self, limit: u64) -> AppResult<Vec<Newsletter>>;

    async fn count_published(&self) -> AppResult<u64>;

    /// Flip the publication flag. Same admin/president gate as issues,
    /// enforced by the workflow engine.
    async fn set_published(&self, id: Uuid, is_published: bool) -> AppResult<Newsletter>;
}

/// SeaORM-backed implementation of `NewsletterRepository`.
pub struct NewsletterStore {
    db: DatabaseConnection,
}

impl NewsletterStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NewsletterRepository for NewsletterStore {
    async fn list_published(&self) -> AppResult<Vec<Newsletter>> {
        let models = NewsletterEntity::find()
            .filter(newsletter::Column::IsPublished.eq(true))
            .order_by_desc(newsletter::Column::Year)
            .order_by_desc(newsletter::Column::Month)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Newsletter::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Newsletter>> {
        let result = NewsletterEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Newsletter::from))
    }

    async fn published_since(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Newsletter>> {
        let models = NewsletterEntity::find()
            .filter(newsletter::Column::IsPublished.eq(true))
            .filter(newsletter::Column::CreatedAt.gte(cutoff))
            .order_by_desc(newsletter::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Newsletter::from).collect())
    }

    async fn latest_published(&self, limit: u64) -> AppResult<Vec<Newsletter>> {
        let models = NewsletterEntity::find()
            .filter(newsletter::Column::IsPublished.eq(true))
            .order_by_desc(newsletter::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Newsletter::from).collect())
    }

    async fn count_published(&self) -> AppResult<u64> {
        NewsletterEntity::find()
            .filter(newsletter::Column::IsPublished.eq(true))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn set_published(&self, id: Uuid, is_published: bool) -> AppResult<Newsletter> {
        let existing = NewsletterEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.is_published = Set(is_published);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Newsletter::from(model))
    }
}
