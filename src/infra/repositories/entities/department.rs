//! SeaORM entity for the `departments` table.

use sea_orm::entity::prelude::*;

use crate::domain::DepartmentCategory;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub short_name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Department {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            short_name: m.short_name,
            slug: m.slug,
            // Seeded reference data; an unknown category would be a migration bug
            category: DepartmentCategory::parse(&m.category)
                .unwrap_or(DepartmentCategory::Administrative),
            description: m.description,
            created_at: m.created_at,
        }
    }
}
