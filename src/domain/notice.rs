//! Notice board entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Announcement shown on the notice board.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub link_url: Option<String>,
    pub pinned: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notice {
    /// Visibility predicate: published in the past and not yet expired.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        match self.published_at {
            Some(published) if published <= now => {
                self.expires_at.map(|exp| exp > now).unwrap_or(true)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn notice(published: Option<i64>, expires: Option<i64>) -> Notice {
        // offsets in hours relative to now; negative = past
        let now = Utc::now();
        Notice {
            id: Uuid::new_v4(),
            title: "Tech fest registrations open".to_string(),
            body: "Register by Friday".to_string(),
            link_url: None,
            pinned: false,
            published_at: published.map(|h| now + Duration::hours(h)),
            expires_at: expires.map(|h| now + Duration::hours(h)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn visible_when_published_and_unexpired() {
        assert!(notice(Some(-1), None).is_visible_at(Utc::now()));
        assert!(notice(Some(-1), Some(1)).is_visible_at(Utc::now()));
    }

    #[test]
    fn hidden_when_unpublished_or_future() {
        assert!(!notice(None, None).is_visible_at(Utc::now()));
        assert!(!notice(Some(1), None).is_visible_at(Utc::now()));
    }

    #[test]
    fn hidden_once_expired() {
        assert!(!notice(Some(-2), Some(-1)).is_visible_at(Utc::now()));
    }
}
