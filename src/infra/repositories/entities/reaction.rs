//! SeaORM entity for the `reactions` table.
//!
//! Unique key on (user_id, entity_type, entity_id): a user holds at most
//! one reaction per entity.

use sea_orm::entity::prelude::*;

use crate::domain::{EntityKind, ReactionKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub reaction: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Reaction {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            entity_type: EntityKind::parse(&m.entity_type).unwrap_or(EntityKind::Newsletter),
            entity_id: m.entity_id,
            reaction: ReactionKind::parse(&m.reaction).unwrap_or(ReactionKind::Like),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
