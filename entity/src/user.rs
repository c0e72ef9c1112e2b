//! User account entity.
//!
//! The password hash is write-only: it is skipped during serialization so a
//! model can never leak credentials through a JSON response.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Lowercased, trimmed at the service boundary.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 hash, never the plain password.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// URL path of the avatar image.
    pub avatar: String,

    /// "admin" or "user".
    pub role: String,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
