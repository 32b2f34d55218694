//! Recent-activity feed items.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::submission::SubmissionStatus;

/// Source of an activity feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Submission,
    Newsletter,
    Feedback,
}

/// One entry in the heterogeneous activity feed: submissions, published
/// newsletters, and feedback mapped onto a common shape and merged by
/// timestamp.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityItem {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubmissionStatus>,
}

/// Merge bounded candidate sets from each source into one feed:
/// newest first, truncated to `limit`.
pub fn merge_recent(mut items: Vec<ActivityItem>, limit: usize) -> Vec<ActivityItem> {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item(kind: ActivityKind, hours_ago: i64) -> ActivityItem {
        ActivityItem {
            id: Uuid::new_v4(),
            kind,
            title: format!("{:?}", kind),
            timestamp: Utc::now() - Duration::hours(hours_ago),
            status: None,
        }
    }

    #[test]
    fn merge_sorts_newest_first_across_sources() {
        let feed = merge_recent(
            vec![
                item(ActivityKind::Submission, 5),
                item(ActivityKind::Feedback, 1),
                item(ActivityKind::Newsletter, 3),
            ],
            5,
        );
        assert_eq!(feed[0].kind, ActivityKind::Feedback);
        assert_eq!(feed[1].kind, ActivityKind::Newsletter);
        assert_eq!(feed[2].kind, ActivityKind::Submission);
    }

    #[test]
    fn merge_truncates_to_limit() {
        let items = (0..8).map(|h| item(ActivityKind::Submission, h)).collect();
        assert_eq!(merge_recent(items, 5).len(), 5);
    }

    #[test]
    fn merge_of_empty_sources_is_empty() {
        assert!(merge_recent(Vec::new(), 5).is_empty());
    }
}
