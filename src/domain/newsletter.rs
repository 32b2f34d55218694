//! Newsletter archive entity behind the public archive and trending ranking.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Archived newsletter document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Newsletter {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub year: i32,
    pub month: i16,
    pub issue_date: NaiveDate,
    pub pdf_url: Option<String>,
    pub is_published: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Newsletter joined with its like count, as served by the trending query.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankedNewsletter {
    #[serde(flatten)]
    pub newsletter: Newsletter,
    pub like_count: u64,
}
