//! Reaction and feedback repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::feedback::{self, ActiveModel as FeedbackActiveModel, Entity as FeedbackEntity};
use super::entities::reaction::{self, ActiveModel as ReactionActiveModel, Entity as ReactionEntity};
use crate::domain::{EntityKind, Feedback, Reaction, ReactionCounts, ReactionKind};
use crate::errors::{AppError, AppResult};

/// Reaction repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Toggle a user's reaction on an entity.
    ///
    /// Repeating the current reaction removes it (returns None); anything
    /// else inserts or replaces via a single conditional upsert keyed on
    /// (user_id, entity_type, entity_id), so two racing callers converge
    /// on one row, last writer wins.
    async fn toggle(
        &self,
        user_id: Uuid,
        entity_type: EntityKind,
        entity_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<Option<Reaction>>;

    async fn find_for_user(
        &self,
        user_id: Uuid,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<Option<Reaction>>;

    async fn counts_for(
        &self,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<ReactionCounts>;

    /// Like tallies for a batch of entities of one kind. Entities with no
    /// likes are absent from the map.
    async fn like_counts(
        &self,
        entity_type: EntityKind,
        entity_ids: Vec<Uuid>,
    ) -> AppResult<HashMap<Uuid, u64>>;
}

/// Feedback repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create(
        &self,
        user_id: Option<Uuid>,
        rating: i16,
        review: Option<String>,
    ) -> AppResult<Feedback>;

    async fn latest(&self, limit: u64) -> AppResult<Vec<Feedback>>;

    /// All ratings, for the mean computed by the stats query.
    async fn ratings(&self) -> AppResult<Vec<i16>>;
}

/// SeaORM-backed implementation of `ReactionRepository`.
pub struct ReactionStore {
    db: DatabaseConnection,
}

impl ReactionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(FromQueryResult)]
struct LikeCountRow {
    entity_id: Uuid,
    count: i64,
}

#[async_trait]
impl ReactionRepository for ReactionStore {
    async fn toggle(
        &self,
        user_id: Uuid,
        entity_type: EntityKind,
        entity_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<Option<Reaction>> {
        // Toggle-off: one conditional delete matching the same reaction.
        let deleted = ReactionEntity::delete_many()
            .filter(reaction::Column::UserId.eq(user_id))
            .filter(reaction::Column::EntityType.eq(entity_type.as_str()))
            .filter(reaction::Column::EntityId.eq(entity_id))
            .filter(reaction::Column::Reaction.eq(kind.as_str()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if deleted.rows_affected > 0 {
            return Ok(None);
        }

        // Insert or replace: single upsert on the per-user unique key.
        let now = Utc::now();
        let active_model = ReactionActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            entity_type: Set(entity_type.as_str().to_string()),
            entity_id: Set(entity_id),
            reaction: Set(kind.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = ReactionEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    reaction::Column::UserId,
                    reaction::Column::EntityType,
                    reaction::Column::EntityId,
                ])
                .update_columns([reaction::Column::Reaction, reaction::Column::UpdatedAt])
                .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Some(Reaction::from(model)))
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<Option<Reaction>> {
        let result = ReactionEntity::find()
            .filter(reaction::Column::UserId.eq(user_id))
            .filter(reaction::Column::EntityType.eq(entity_type.as_str()))
            .filter(reaction::Column::EntityId.eq(entity_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Reaction::from))
    }

    async fn counts_for(
        &self,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<ReactionCounts> {
        let likes = ReactionEntity::find()
            .filter(reaction::Column::EntityType.eq(entity_type.as_str()))
            .filter(reaction::Column::EntityId.eq(entity_id))
            .filter(reaction::Column::Reaction.eq(ReactionKind::Like.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        let dislikes = ReactionEntity::find()
            .filter(reaction::Column::EntityType.eq(entity_type.as_str()))
            .filter(reaction::Column::EntityId.eq(entity_id))
            .filter(reaction::Column::Reaction.eq(ReactionKind::Dislike.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ReactionCounts { likes, dislikes })
    }

    async fn like_counts(
        &self,
        entity_type: EntityKind,
        entity_ids: Vec<Uuid>,
    ) -> AppResult<HashMap<Uuid, u64>> {
        if entity_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = ReactionEntity::find()
            .select_only()
            .column(reaction::Column::EntityId)
            .column_as(reaction::Column::Id.count(), "count")
            .filter(reaction::Column::EntityType.eq(entity_type.as_str()))
            .filter(reaction::Column::EntityId.is_in(entity_ids))
            .filter(reaction::Column::Reaction.eq(ReactionKind::Like.as_str()))
            .group_by(reaction::Column::EntityId)
            .into_model::<LikeCountRow>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|r| (r.entity_id, r.count.max(0) as u64))
            .collect())
    }
}

/// SeaORM-backed implementation of `FeedbackRepository`.
pub struct FeedbackStore {
    db: DatabaseConnection,
}

impl FeedbackStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepository for FeedbackStore {
    async fn create(
        &self,
        user_id: Option<Uuid>,
        rating: i16,
        review: Option<String>,
    ) -> AppResult<Feedback> {
        let active_model = FeedbackActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            rating: Set(rating),
            review: Set(review),
            created_at: Set(Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Feedback::from(model))
    }

    async fn latest(&self, limit: u64) -> AppResult<Vec<Feedback>> {
        let models = FeedbackEntity::find()
            .order_by_desc(feedback::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Feedback::from).collect())
    }

    async fn ratings(&self) -> AppResult<Vec<i16>> {
        let models = FeedbackEntity::find()
            .select_only()
            .column(feedback::Column::Rating)
            .into_tuple::<i16>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models)
    }
}
