//! Reactions and feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Kind of entity a reaction attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Newsletter,
    Issue,
    DepartmentIssue,
    Submission,
}

impl EntityKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "newsletter" => Some(Self::Newsletter),
            "issue" => Some(Self::Issue),
            "department_issue" => Some(Self::DepartmentIssue),
            "submission" => Some(Self::Submission),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newsletter => "newsletter",
            Self::Issue => "issue",
            Self::DepartmentIssue => "department_issue",
            Self::Submission => "submission",
        }
    }
}

/// Like or dislike. A user holds at most one reaction per entity;
/// repeating the same reaction removes it, a different one replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "dislike" => Some(Self::Dislike),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// A single user's reaction to an entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
    pub reaction: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated reaction tallies for one entity.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
pub struct ReactionCounts {
    pub likes: u64,
    pub dislikes: u64,
}

/// Reader feedback, 1-5 stars with an optional short review.
/// Anonymous feedback is allowed (`user_id` is null).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub rating: i16,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Feedback form payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewFeedback {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(max = 2000, message = "Review is too long"))]
    pub review: Option<String>,
}
