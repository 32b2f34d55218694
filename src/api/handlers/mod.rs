//! HTTP request handlers.

pub mod auth_handler;
pub mod dashboard_handler;
pub mod department_handler;
pub mod engagement_handler;
pub mod issue_handler;
pub mod newsletter_handler;
pub mod notice_handler;
pub mod profile_handler;
pub mod submission_handler;
pub mod subscription_handler;

pub use auth_handler::auth_routes;
pub use dashboard_handler::dashboard_routes;
pub use department_handler::department_routes;
pub use engagement_handler::{feedback_routes, reaction_count_routes, reaction_routes};
pub use issue_handler::{issue_admin_routes, issue_routes};
pub use newsletter_handler::{newsletter_admin_routes, newsletter_routes};
pub use notice_handler::notice_routes;
pub use profile_handler::profile_routes;
pub use submission_handler::{submission_admin_routes, submission_routes};
pub use subscription_handler::subscription_routes;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Caller;
use crate::errors::AppResult;

/// Resolve the authenticated user into the caller identity commands take.
/// The role comes from the store on every request, never from the token.
pub(crate) async fn resolve_caller(state: &AppState, user: &CurrentUser) -> AppResult<Caller> {
    state.role_service.caller_for(user.id).await
}
