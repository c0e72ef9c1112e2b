//! Discovery entity: a single scientific finding attributed to one scientist.
//!
//! `scientist_id` is checked against an existing scientist in the service
//! layer; the schema carries no foreign key so deleting a scientist neither
//! cascades to nor blocks on its discoveries.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discovery")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub scientist_id: i32,
    pub field: Option<String>,
    pub year: Option<i32>,
    pub short_description: Option<String>,

    /// URL path of the illustration image.
    pub image: Option<String>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scientist::Entity",
        from = "Column::ScientistId",
        to = "super::scientist::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Scientist,
    #[sea_orm(has_one = "super::discovery_story::Entity")]
    DiscoveryStory,
}

impl Related<super::scientist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scientist.def()
    }
}

impl Related<super::discovery_story::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiscoveryStory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
