//! Notice board repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::entities::notice::{self, Entity as NoticeEntity};
use crate::domain::Notice;
use crate::errors::{AppError, AppResult};

/// Notice board repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    /// Visible notices at `now`: published in the past and not expired.
    /// Pinned entries sort first, then newest publication.
    async fn list_active(&self, now: DateTime<Utc>, limit: Option<u64>) -> AppResult<Vec<Notice>>;
}

/// SeaORM-backed implementation of `NoticeRepository`.
pub struct NoticeStore {
    db: DatabaseConnection,
}

impl NoticeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoticeRepository for NoticeStore {
    async fn list_active(&self, now: DateTime<Utc>, limit: Option<u64>) -> AppResult<Vec<Notice>> {
        let mut query = NoticeEntity::find()
            .filter(notice::Column::PublishedAt.lte(now))
            .filter(
                Condition::any()
                    .add(notice::Column::ExpiresAt.is_null())
                    .add(notice::Column::ExpiresAt.gt(now)),
            )
            .order_by_desc(notice::Column::Pinned)
            .order_by_desc(notice::Column::PublishedAt);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(Notice::from).collect())
    }
}
