//! Application services - use cases and business logic
//!
//! Services orchestrate domain operations through repository traits.
//! Every command takes an explicit `Caller` instead of reading ambient
//! session state, so authorization decisions are deterministic and
//! testable.

mod auth_service;
mod container;
mod engagement_service;
mod moderation_service;
mod profile_service;
mod query_service;
mod role_service;
mod subscription_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::{parallel, ServiceContainer, Services};
pub use engagement_service::{EngagementManager, EngagementService};
pub use moderation_service::{
    DepartmentIssueMeta, GlobalIssueMeta, ModerationEngine, ModerationService, UploadFile,
};
pub use profile_service::{ProfileManager, ProfileService};
pub use query_service::{QueryEngine, QueryService, Stats};
pub use role_service::{RoleResolver, RoleService};
pub use subscription_service::{ConfirmOutcome, SubscriptionGateway, SubscriptionService};

#[cfg(test)]
pub use engagement_service::MockEngagementService;
#[cfg(test)]
pub use moderation_service::MockModerationService;
#[cfg(test)]
pub use profile_service::MockProfileService;
#[cfg(test)]
pub use query_service::MockQueryService;
#[cfg(test)]
pub use role_service::MockRoleService;
#[cfg(test)]
pub use subscription_service::MockSubscriptionService;
