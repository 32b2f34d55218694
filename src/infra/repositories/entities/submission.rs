//! SeaORM entity for the `submissions` table.

use sea_orm::entity::prelude::*;

use crate::domain::SubmissionStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub department: String,
    pub semester: Option<i16>,
    pub media_url: Option<String>,
    pub external_link: Option<String>,
    pub submitter_name: String,
    pub submitter_email: Option<String>,
    pub status: String,
    pub pinned: bool,
    pub moderated_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Submission {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            summary: m.summary,
            category: m.category,
            department: m.department,
            semester: m.semester,
            media_url: m.media_url,
            external_link: m.external_link,
            submitter_name: m.submitter_name,
            submitter_email: m.submitter_email,
            status: SubmissionStatus::parse(&m.status).unwrap_or(SubmissionStatus::Pending),
            pinned: m.pinned,
            moderated_by: m.moderated_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
