//! Department reference data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Department category grouping used on the departments page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentCategory {
    Engineering,
    Technology,
    Science,
    Administrative,
}

impl DepartmentCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "engineering" => Some(Self::Engineering),
            "technology" => Some(Self::Technology),
            "science" => Some(Self::Science),
            "administrative" => Some(Self::Administrative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "engineering",
            Self::Technology => "technology",
            Self::Science => "science",
            Self::Administrative => "administrative",
        }
    }
}

/// Static reference data seeded by migration; immutable in normal operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub short_name: String,
    /// URL-safe unique identifier, e.g. "computer-engineering"
    pub slug: String,
    pub category: DepartmentCategory,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
