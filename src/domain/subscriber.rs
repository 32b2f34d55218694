//! Newsletter subscribers and the double-opt-in flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Mailing-list subscriber.
///
/// `confirm_token` is single-use: issued on subscribe, rotated when an
/// unconfirmed subscriber re-subscribes (invalidating the previous link),
/// cleared on confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub department: String,
    pub semester: Option<i16>,
    pub confirmed: bool,
    #[serde(skip_serializing)]
    pub confirm_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Subscription form payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, max = 120, message = "Department is required"))]
    pub department: String,
    #[validate(range(min = 1, max = 8, message = "Semester must be between 1 and 8"))]
    pub semester: Option<i16>,
}
