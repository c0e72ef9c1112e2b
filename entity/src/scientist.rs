//! Scientist profile entity.
//!
//! Free-form biographical lists (story, impact, quotes, fun facts) are stored
//! as JSON arrays of strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scientist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub field: Option<String>,

    /// URL path of the portrait image.
    pub image: Option<String>,

    pub tagline: Option<String>,
    pub era: Option<String>,
    pub nationality: Option<String>,
    pub born: Option<String>,
    pub died: Option<String>,
    pub bio: Option<String>,

    #[sea_orm(column_type = "Json", nullable)]
    pub story: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub impact: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub quotes: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub fun_facts: Option<Json>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::discovery::Entity")]
    Discovery,
}

impl Related<super::discovery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discovery.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
