//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database, ObjectStorage};
use crate::jobs::Mailer;
use crate::services::{
    AuthService, EngagementService, ModerationService, ProfileService, QueryService, RoleService,
    ServiceContainer, Services, SubscriptionService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub role_service: Arc<dyn RoleService>,
    pub profile_service: Arc<dyn ProfileService>,
    pub moderation_service: Arc<dyn ModerationService>,
    pub query_service: Arc<dyn QueryService>,
    pub engagement_service: Arc<dyn EngagementService>,
    pub subscription_service: Arc<dyn SubscriptionService>,
    /// Redis cache (rate limiting, health)
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from infrastructure and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: Config,
        storage: Arc<dyn ObjectStorage>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let container = Services::from_connection(
            database.get_connection(),
            config,
            storage,
            mailer,
        );

        Self {
            auth_service: container.auth(),
            role_service: container.roles(),
            profile_service: container.profiles(),
            moderation_service: container.moderation(),
            query_service: container.queries(),
            engagement_service: container.engagement(),
            subscription_service: container.subscriptions(),
            cache,
            database,
        }
    }
}
