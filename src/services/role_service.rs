//! Identity and role resolution.
//!
//! A user may hold several role rows; the effective role is the most
//! recently created one. `has_role` is a plain membership test against an
//! explicit allowed set — roles are tags, never compared by rank.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Caller, Role};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::RoleRepository;

/// Role service trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleService: Send + Sync {
    /// Effective role for a user, or None if no role is assigned.
    async fn resolve_role(&self, user_id: Uuid) -> AppResult<Option<Role>>;

    /// True iff the resolved role is a member of `allowed`.
    async fn has_role(&self, user_id: Uuid, allowed: Vec<Role>) -> AppResult<bool>;

    /// Build the caller identity passed to command operations.
    async fn caller_for(&self, user_id: Uuid) -> AppResult<Caller>;

    /// Append a role assignment. Admin only; the new row immediately
    /// becomes the user's effective role.
    async fn assign_role(&self, caller: &Caller, user_id: Uuid, role: Role) -> AppResult<()>;
}

/// Concrete implementation of `RoleService`.
pub struct RoleResolver {
    roles: Arc<dyn RoleRepository>,
}

impl RoleResolver {
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }
}

#[async_trait]
impl RoleService for RoleResolver {
    async fn resolve_role(&self, user_id: Uuid) -> AppResult<Option<Role>> {
        self.roles.latest_for_user(user_id).await
    }

    async fn has_role(&self, user_id: Uuid, allowed: Vec<Role>) -> AppResult<bool> {
        let role = self.roles.latest_for_user(user_id).await?;
        Ok(role.map(|r| allowed.contains(&r)).unwrap_or(false))
    }

    async fn caller_for(&self, user_id: Uuid) -> AppResult<Caller> {
        let role = self.roles.latest_for_user(user_id).await?;
        Ok(Caller::new(user_id, role))
    }

    async fn assign_role(&self, caller: &Caller, user_id: Uuid, role: Role) -> AppResult<()> {
        if !caller.is_admin() {
            return Err(AppError::PermissionDenied);
        }

        self.roles.assign(user_id, role).await?;

        tracing::info!(
            assigned_by = %caller.user_id,
            user = %user_id,
            role = %role,
            "Role assigned"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockRoleRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn resolves_latest_role() {
        let user_id = Uuid::new_v4();
        let mut repo = MockRoleRepository::new();
        repo.expect_latest_for_user()
            .with(eq(user_id))
            .returning(|_| Ok(Some(Role::Editor)));

        let service = RoleResolver::new(Arc::new(repo));
        assert_eq!(service.resolve_role(user_id).await.unwrap(), Some(Role::Editor));
    }

    #[tokio::test]
    async fn has_role_is_set_membership() {
        let user_id = Uuid::new_v4();
        let mut repo = MockRoleRepository::new();
        repo.expect_latest_for_user()
            .returning(|_| Ok(Some(Role::Contributor)));

        let service = RoleResolver::new(Arc::new(repo));
        assert!(service
            .has_role(user_id, vec![Role::Admin, Role::Contributor])
            .await
            .unwrap());
        assert!(!service
            .has_role(user_id, vec![Role::Admin, Role::President])
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn has_role_is_false_without_assignment() {
        let mut repo = MockRoleRepository::new();
        repo.expect_latest_for_user().returning(|_| Ok(None));

        let service = RoleResolver::new(Arc::new(repo));
        assert!(!service
            .has_role(Uuid::new_v4(), vec![Role::Viewer])
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn assign_requires_admin() {
        let mut repo = MockRoleRepository::new();
        repo.expect_assign().never();

        let service = RoleResolver::new(Arc::new(repo));
        let caller = Caller::new(Uuid::new_v4(), Some(Role::Editor));

        let result = service
            .assign_role(&caller, Uuid::new_v4(), Role::Contributor)
            .await;
        assert!(matches!(result.unwrap_err(), AppError::PermissionDenied));
    }
}
