//! Role assignment repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::user_role::{self, ActiveModel, Entity as UserRoleEntity};
use crate::domain::Role;
use crate::errors::{AppError, AppResult};

/// Role assignment repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Effective role for a user: the most recently created role row, or
    /// None if the user holds no (parseable) role.
    async fn latest_for_user(&self, user_id: Uuid) -> AppResult<Option<Role>>;

    /// Append a role row for a user. Older rows are kept; resolution
    /// always picks the newest.
    async fn assign(&self, user_id: Uuid, role: Role) -> AppResult<()>;
}

/// SeaORM-backed implementation of `RoleRepository`.
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn latest_for_user(&self, user_id: Uuid) -> AppResult<Option<Role>> {
        let row = UserRoleEntity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_desc(user_role::Column::CreatedAt)
            .limit(1)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.and_then(|r| Role::parse(&r.role)))
    }

    async fn assign(&self, user_id: Uuid, role: Role) -> AppResult<()> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role: Set(role.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}
