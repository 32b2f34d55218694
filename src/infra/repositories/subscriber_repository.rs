//! Subscriber repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::subscriber::{self, ActiveModel, Entity as SubscriberEntity};
use crate::domain::{SubscribeRequest, Subscriber};
use crate::errors::{AppError, AppResult};

/// Subscriber repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>>;

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Subscriber>>;

    /// Create an unconfirmed subscriber holding `confirm_token`.
    async fn create(&self, request: SubscribeRequest, confirm_token: String)
        -> AppResult<Subscriber>;

    /// Overwrite an unconfirmed subscriber's details and rotate its token,
    /// invalidating any previously issued link.
    async fn refresh(
        &self,
        id: Uuid,
        request: SubscribeRequest,
        confirm_token: String,
    ) -> AppResult<Subscriber>;

    /// Mark confirmed and clear the single-use token.
    async fn confirm(&self, id: Uuid) -> AppResult<Subscriber>;
}

/// SeaORM-backed implementation of `SubscriberRepository`.
pub struct SubscriberStore {
    db: DatabaseConnection,
}

impl SubscriberStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriberRepository for SubscriberStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>> {
        let result = SubscriberEntity::find()
            .filter(subscriber::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Subscriber::from))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Subscriber>> {
        let result = SubscriberEntity::find()
            .filter(subscriber::Column::ConfirmToken.eq(token))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Subscriber::from))
    }

    async fn create(
        &self,
        request: SubscribeRequest,
        confirm_token: String,
    ) -> AppResult<Subscriber> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(request.email),
            name: Set(request.name),
            phone: Set(request.phone),
            department: Set(request.department),
            semester: Set(request.semester),
            confirmed: Set(false),
            confirm_token: Set(Some(confirm_token)),
            created_at: Set(Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Subscriber::from(model))
    }

    async fn refresh(
        &self,
        id: Uuid,
        request: SubscribeRequest,
        confirm_token: String,
    ) -> AppResult<Subscriber> {
        let existing = SubscriberEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(request.name);
        active.phone = Set(request.phone);
        active.department = Set(request.department);
        active.semester = Set(request.semester);
        active.confirm_token = Set(Some(confirm_token));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Subscriber::from(model))
    }

    async fn confirm(&self, id: Uuid) -> AppResult<Subscriber> {
        let existing = SubscriberEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.confirmed = Set(true);
        active.confirm_token = Set(None);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Subscriber::from(model))
    }
}
