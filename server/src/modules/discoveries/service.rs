//! Discovery service layer.
//!
//! Creation checks the referenced scientist here in the service, since the
//! schema deliberately carries no foreign key on `scientist_id`.

use chrono::Utc;
use entity::{discovery, scientist};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Validation(String),

    #[error("Discovery not found")]
    NotFound,

    #[error("Scientist not found")]
    ScientistNotFound,
}

/// Create/update payload. Also assembled field-by-field from multipart forms.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryInput {
    pub title: Option<String>,
    pub scientist_id: Option<i32>,
    pub field: Option<String>,
    pub year: Option<i32>,
    pub short_description: Option<String>,
    pub image: Option<String>,
}

pub struct DiscoveryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiscoveryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All discoveries, newest year first, each with its scientist (if any).
    pub async fn list_all(
        &self,
    ) -> Result<Vec<(discovery::Model, Option<scientist::Model>)>, ServiceError> {
        Ok(discovery::Entity::find()
            .find_also_related(scientist::Entity)
            .order_by_desc(discovery::Column::Year)
            .all(self.db)
            .await?)
    }

    pub async fn list_by_scientist(
        &self,
        scientist_id: i32,
    ) -> Result<Vec<discovery::Model>, ServiceError> {
        Ok(discovery::Entity::find()
            .filter(discovery::Column::ScientistId.eq(scientist_id))
            .order_by_desc(discovery::Column::Year)
            .all(self.db)
            .await?)
    }

    pub async fn get(
        &self,
        id: i32,
    ) -> Result<(discovery::Model, Option<scientist::Model>), ServiceError> {
        discovery::Entity::find_by_id(id)
            .find_also_related(scientist::Entity)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Create a discovery. The scientist must exist; nothing is written
    /// otherwise.
    pub async fn create(&self, input: DiscoveryInput) -> Result<discovery::Model, ServiceError> {
        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::Validation("Title is required".to_string()))?
            .to_string();

        let scientist_id = input
            .scientist_id
            .ok_or_else(|| ServiceError::Validation("scientistId is required".to_string()))?;

        scientist::Entity::find_by_id(scientist_id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::ScientistNotFound)?;

        let now = Utc::now();
        let created = discovery::ActiveModel {
            title: Set(title),
            scientist_id: Set(scientist_id),
            field: Set(input.field),
            year: Set(input.year),
            short_description: Set(input.short_description),
            image: Set(input.image),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(discovery_id = created.id, title = %created.title, "Discovery created");
        Ok(created)
    }

    /// Partial update: only supplied fields are overwritten. A supplied
    /// `scientist_id` is re-checked against an existing scientist.
    pub async fn update(
        &self,
        id: i32,
        input: DiscoveryInput,
    ) -> Result<discovery::Model, ServiceError> {
        let found = discovery::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let mut active: discovery::ActiveModel = found.into();
        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(ServiceError::Validation("Title is required".to_string()));
            }
            active.title = Set(title);
        }
        if let Some(scientist_id) = input.scientist_id {
            scientist::Entity::find_by_id(scientist_id)
                .one(self.db)
                .await?
                .ok_or(ServiceError::ScientistNotFound)?;
            active.scientist_id = Set(scientist_id);
        }
        if let Some(field) = input.field {
            active.field = Set(Some(field));
        }
        if let Some(year) = input.year {
            active.year = Set(Some(year));
        }
        if let Some(short_description) = input.short_description {
            active.short_description = Set(Some(short_description));
        }
        if let Some(image) = input.image {
            active.image = Set(Some(image));
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let found = discovery::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        discovery::Entity::delete_by_id(found.id).exec(self.db).await?;
        info!(discovery_id = id, "Discovery deleted");
        Ok(())
    }
}
