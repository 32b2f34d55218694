//! SeaORM entity for the `feedback` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub rating: i16,
    pub review: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Feedback {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            rating: m.rating,
            review: m.review,
            created_at: m.created_at,
        }
    }
}
