//! Global issues and per-department contributions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A dated global newsletter release aggregating all departments for one
/// month. `(year, month)` is the natural key: a second upload for the same
/// period overwrites rather than duplicating. A null `published_at` means
/// draft.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Issue {
    pub id: Uuid,
    pub year: i32,
    /// Calendar month, 1-12
    pub month: i16,
    pub title: String,
    pub global_pdf_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Ordering key for "most recent calendar issue".
    pub fn period(&self) -> (i32, i16) {
        (self.year, self.month)
    }
}

/// One department's contribution attached to a given issue.
/// At most one row per `(issue_id, department_id)`, enforced by upsert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentIssue {
    pub id: Uuid,
    pub issue_id: Uuid,
    pub department_id: Uuid,
    pub summary: Option<String>,
    pub pdf_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
