//! API middleware.

mod auth;
mod rate_limit;

pub use auth::{auth_middleware, optional_auth_middleware, CurrentUser};
pub use rate_limit::{rate_limit_form_middleware, rate_limit_middleware};
