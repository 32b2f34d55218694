//! Profile repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::profile::{self, ActiveModel, Entity as ProfileEntity};
use crate::domain::{Profile, UpdateProfile};
use crate::errors::{AppError, AppResult};

/// Profile repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Create the profile row attached on first sign-in.
    async fn create(&self, user_id: Uuid, full_name: Option<String>) -> AppResult<Profile>;

    /// Apply a partial update; absent fields are left unchanged.
    async fn update(&self, user_id: Uuid, changes: UpdateProfile) -> AppResult<Profile>;
}

/// SeaORM-backed implementation of `ProfileRepository`.
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Profile::from))
    }

    async fn create(&self, user_id: Uuid, full_name: Option<String>) -> AppResult<Profile> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            full_name: Set(full_name),
            phone: Set(None),
            department_id: Set(None),
            semester: Set(None),
            avatar_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Profile::from(model))
    }

    async fn update(&self, user_id: Uuid, changes: UpdateProfile) -> AppResult<Profile> {
        let existing = ProfileEntity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(full_name) = changes.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(department_id) = changes.department_id {
            active.department_id = Set(Some(department_id));
        }
        if let Some(semester) = changes.semester {
            active.semester = Set(Some(semester));
        }
        if let Some(avatar_url) = changes.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Profile::from(model))
    }
}
