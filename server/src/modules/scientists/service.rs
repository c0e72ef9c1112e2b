//! Scientist service layer.

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

    #[error("Scientist not found")]
    NotFound,
}

/// Create/update payload. Also assembled field-by-field from multipart forms.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScientistInput {
    pub name: Option<String>,
    pub field: Option<String>,
    pub image: Option<String>,
    pub tagline: Option<String>,
    pub era: Option<String>,
    pub nationality: Option<String>,
    pub born: Option<String>,
    pub died: Option<String>,
    pub bio: Option<String>,
    pub story: Option<Vec<String>>,
    pub impact: Option<Vec<String>>,
    pub quotes: Option<Vec<String>>,
    pub fun_facts: Option<Vec<String>>,
}

pub struct ScientistService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScientistService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All scientists, alphabetical by name.
    pub async fn list_all(&self) -> Result<Vec<scientist::Model>, ServiceError> {
        Ok(scientist::Entity::find()
            .order_by_asc(scientist::Column::Name)
            .all(self.db)
            .await?)
    }

    /// One scientist plus their discoveries, newest year first.
    pub async fn get_with_discoveries(
        &self,
        id: i32,
    ) -> Result<(scientist::Model, Vec<discovery::Model>), ServiceError> {
        let found = scientist::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let discoveries = discovery::Entity::find()
            .filter(discovery::Column::ScientistId.eq(id))
            .order_by_desc(discovery::Column::Year)
            .all(self.db)
            .await?;

        Ok((found, discoveries))
    }

    pub async fn create(&self, input: ScientistInput) -> Result<scientist::Model, ServiceError> {
        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ServiceError::Validation("Name is required".to_string()))?
            .to_string();

        let now = Utc::now();
        let created = scientist::ActiveModel {
            name: Set(name),
            field: Set(input.field),
            image: Set(input.image),
            tagline: Set(input.tagline),
            era: Set(input.era),
            nationality: Set(input.nationality),
            born: Set(input.born),
            died: Set(input.died),
            bio: Set(input.bio),
            story: Set(input.story.map(|v| serde_json::json!(v))),
            impact: Set(input.impact.map(|v| serde_json::json!(v))),
            quotes: Set(input.quotes.map(|v| serde_json::json!(v))),
            fun_facts: Set(input.fun_facts.map(|v| serde_json::json!(v))),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(scientist_id = created.id, name = %created.name, "Scientist created");
        Ok(created)
    }

    /// Partial update: only supplied fields are overwritten.
    pub async fn update(
        &self,
        id: i32,
        input: ScientistInput,
    ) -> Result<scientist::Model, ServiceError> {
        let found = scientist::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let mut active: scientist::ActiveModel = found.into();
        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ServiceError::Validation("Name is required".to_string()));
            }
            active.name = Set(name);
        }
        if let Some(field) = input.field {
            active.field = Set(Some(field));
        }
        if let Some(image) = input.image {
            active.image = Set(Some(image));
        }
        if let Some(tagline) = input.tagline {
            active.tagline = Set(Some(tagline));
        }
        if let Some(era) = input.era {
            active.era = Set(Some(era));
        }
        if let Some(nationality) = input.nationality {
            active.nationality = Set(Some(nationality));
        }
        if let Some(born) = input.born {
            active.born = Set(Some(born));
        }
        if let Some(died) = input.died {
            active.died = Set(Some(died));
        }
        if let Some(bio) = input.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(story) = input.story {
            active.story = Set(Some(serde_json::json!(story)));
        }
        if let Some(impact) = input.impact {
            active.impact = Set(Some(serde_json::json!(impact)));
        }
        if let Some(quotes) = input.quotes {
            active.quotes = Set(Some(serde_json::json!(quotes)));
        }
        if let Some(fun_facts) = input.fun_facts {
            active.fun_facts = Set(Some(serde_json::json!(fun_facts)));
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    /// Delete by id. Dependent discoveries are left untouched.
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let found = scientist::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        scientist::Entity::delete_by_id(found.id).exec(self.db).await?;
        info!(scientist_id = id, "Scientist deleted");
        Ok(())
    }
}
