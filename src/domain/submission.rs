//! Student showcase submissions and their moderation state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Moderation state of a submission.
///
/// Every submission starts `Pending` and moves only through an explicit
/// moderator call: `Pending -> Approved | Rejected`, and
/// `Rejected -> Approved` on re-review. `Approved -> Rejected` is not a
/// legal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A moderator's verdict on a pending or rejected submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModerationDecision {
    Approved,
    Rejected,
}

impl ModerationDecision {
    pub fn as_status(&self) -> SubmissionStatus {
        match self {
            Self::Approved => SubmissionStatus::Approved,
            Self::Rejected => SubmissionStatus::Rejected,
        }
    }
}

/// Student-authored showcase item.
///
/// The row is owned by its submitter, but `status`, `pinned`, and
/// `moderated_by` are owned by the moderation workflow.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    /// Free-form: Achievement, Talent, Project, ...
    pub category: String,
    /// Free-text department name as entered on the form
    pub department: String,
    pub semester: Option<i16>,
    pub media_url: Option<String>,
    pub external_link: Option<String>,
    pub submitter_name: String,
    pub submitter_email: Option<String>,
    pub status: SubmissionStatus,
    pub pinned: bool,
    pub moderated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// Whether the pin toggle is currently legal.
    pub fn can_pin(&self) -> bool {
        self.status == SubmissionStatus::Approved
    }
}

/// Submission form payload. Open to any visitor; status is forced to
/// pending at creation regardless of caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewSubmission {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 4000, message = "Summary is required"))]
    pub summary: String,
    #[validate(length(min = 1, max = 60, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, max = 120, message = "Department is required"))]
    pub department: String,
    #[validate(range(min = 1, max = 8, message = "Semester must be between 1 and 8"))]
    pub semester: Option<i16>,
    #[validate(url(message = "Media URL must be a valid URL"))]
    pub media_url: Option<String>,
    #[validate(url(message = "External link must be a valid URL"))]
    pub external_link: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Submitter name is required"))]
    pub submitter_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub submitter_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(status: SubmissionStatus) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            title: "Line-following robot".to_string(),
            summary: "Built for the tech fest".to_string(),
            category: "Project".to_string(),
            department: "Computer Engineering".to_string(),
            semester: Some(5),
            media_url: None,
            external_link: None,
            submitter_name: "A. Student".to_string(),
            submitter_email: None,
            status,
            pinned: false,
            moderated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn pin_is_only_legal_on_approved() {
        assert!(submission(SubmissionStatus::Approved).can_pin());
        assert!(!submission(SubmissionStatus::Pending).can_pin());
        assert!(!submission(SubmissionStatus::Rejected).can_pin());
    }

    #[test]
    fn status_parse_round_trips() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
        ] {
            assert_eq!(SubmissionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SubmissionStatus::parse("archived"), None);
    }
}
