//! Profile service.
//!
//! A profile is owned by its user; admins may read and edit any profile.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Caller, Profile, UpdateProfile};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::ProfileRepository;

/// Profile service trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// The caller's own profile.
    async fn my_profile(&self, caller: &Caller) -> AppResult<Profile>;

    /// A profile by user id; caller must be the owner or an admin.
    async fn get_profile(&self, caller: &Caller, user_id: Uuid) -> AppResult<Profile>;

    /// Update a profile; caller must be the owner or an admin.
    async fn update_profile(
        &self,
        caller: &Caller,
        user_id: Uuid,
        changes: UpdateProfile,
    ) -> AppResult<Profile>;
}

/// Concrete implementation of `ProfileService`.
pub struct ProfileManager {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileManager {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    fn authorize(caller: &Caller, user_id: Uuid) -> AppResult<()> {
        if caller.user_id == user_id || caller.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

#[async_trait]
impl ProfileService for ProfileManager {
    async fn my_profile(&self, caller: &Caller) -> AppResult<Profile> {
        self.profiles
            .find_by_user(caller.user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn get_profile(&self, caller: &Caller, user_id: Uuid) -> AppResult<Profile> {
        Self::authorize(caller, user_id)?;

        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_profile(
        &self,
        caller: &Caller,
        user_id: Uuid,
        changes: UpdateProfile,
    ) -> AppResult<Profile> {
        Self::authorize(caller, user_id)?;

        self.profiles.update(user_id, changes).await
    }
}
