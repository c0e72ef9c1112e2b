//! Discovery story entity: the extended narrative for one discovery.
//!
//! `discovery_id` carries a unique index, which is what enforces the
//! one-story-per-discovery rule at the schema level. `scientist_id` and
//! `image` are denormalized from the parent discovery at creation time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discovery_story")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub discovery_id: i32,

    /// Copied from the parent discovery at creation.
    pub scientist_id: i32,

    /// Copied from the parent discovery at creation.
    pub image: Option<String>,

    /// JSON array of `{section, text}` objects.
    #[sea_orm(column_type = "Json", nullable)]
    pub content: Option<Json>,

    #[sea_orm(column_type = "Json", nullable)]
    pub impact: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub references: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub timeline: Option<Json>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::discovery::Entity",
        from = "Column::DiscoveryId",
        to = "super::discovery::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Discovery,
    #[sea_orm(
        belongs_to = "super::scientist::Entity",
        from = "Column::ScientistId",
        to = "super::scientist::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Scientist,
}

impl Related<super::discovery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discovery.def()
    }
}

impl Related<super::scientist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scientist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
