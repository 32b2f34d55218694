//! SeaORM entity for the `issues` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub year: i32,
    pub month: i16,
    pub title: String,
    pub global_pdf_url: Option<String>,
    pub published_at: Option<DateTimeUtc>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::department_issue::Entity")]
    DepartmentIssue,
}

impl Related<super::department_issue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepartmentIssue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Issue {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            year: m.year,
            month: m.month,
            title: m.title,
            global_pdf_url: m.global_pdf_url,
            published_at: m.published_at,
            created_by: m.created_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
