//! Department repository. Reference data: read-only at this layer.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::entities::department::{self, Entity as DepartmentEntity};
use crate::domain::Department;
use crate::errors::{AppError, AppResult};

/// Department repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Department>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Department>>;
}

/// SeaORM-backed implementation of `DepartmentRepository`.
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn list(&self) -> AppResult<Vec<Department>> {
        let models = DepartmentEntity::find()
            .order_by_asc(department::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Department::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        let result = DepartmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Department::from))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Department>> {
        let result = DepartmentEntity::find()
            .filter(department::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Department::from))
    }
}
