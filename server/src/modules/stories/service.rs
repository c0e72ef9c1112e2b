//! Discovery-story service layer.
//!
//! A story is the one-per-discovery narrative record. Creation denormalizes
//! `scientist_id` and `image` from the parent discovery, and content sections
//! are trimmed with empty ones dropped on every write.

use chrono::Utc;
use entity::{discovery, discovery_story, scientist};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, SqlErr,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Discovery not found")]
    DiscoveryNotFound,

    #[error("No story found for this discovery")]
    NotFound,

    #[error("Story already exists for this discovery")]
    DuplicateStory,
}

/// One narrative section of a story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentSection {
    pub section: String,
    pub text: String,
}

/// Create/update payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryInput {
    pub discovery_id: Option<i32>,
    pub content: Option<Vec<ContentSection>>,
    pub impact: Option<Vec<String>>,
    pub references: Option<Vec<String>>,
    pub timeline: Option<Vec<serde_json::Value>>,
}

/// A story with its populated discovery and scientist, when they still exist.
pub type PopulatedStory = (
    discovery_story::Model,
    Option<discovery::Model>,
    Option<scientist::Model>,
);

/// The unique index on `discovery_id` is what enforces one story per
/// discovery; a violation on write means another story already claimed it.
fn map_write_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::DuplicateStory,
        _ => ServiceError::Database(e),
    }
}

/// Trim section headings and text; drop sections left empty on either side.
pub fn clean_content(sections: Vec<ContentSection>) -> Vec<ContentSection> {
    sections
        .into_iter()
        .map(|c| ContentSection {
            section: c.section.trim().to_string(),
            text: c.text.trim().to_string(),
        })
        .filter(|c| !c.section.is_empty() && !c.text.is_empty())
        .collect()
}

pub struct StoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<PopulatedStory>, ServiceError> {
        let stories = discovery_story::Entity::find()
            .find_also_related(discovery::Entity)
            .all(self.db)
            .await?;

        let mut populated = Vec::with_capacity(stories.len());
        for (story, parent) in stories {
            let author = scientist::Entity::find_by_id(story.scientist_id)
                .one(self.db)
                .await?;
            populated.push((story, parent, author));
        }
        Ok(populated)
    }

    pub async fn get_by_discovery_id(
        &self,
        discovery_id: i32,
    ) -> Result<PopulatedStory, ServiceError> {
        let (story, parent) = discovery_story::Entity::find()
            .filter(discovery_story::Column::DiscoveryId.eq(discovery_id))
            .find_also_related(discovery::Entity)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let author = scientist::Entity::find_by_id(story.scientist_id)
            .one(self.db)
            .await?;

        Ok((story, parent, author))
    }

    /// Create the story for a discovery. Fails if the discovery is missing or
    /// already has a story; inherits the discovery's scientist and image.
    pub async fn create(&self, input: StoryInput) -> Result<PopulatedStory, ServiceError> {
        let discovery_id = input.discovery_id.ok_or(ServiceError::DiscoveryNotFound)?;

        let parent = discovery::Entity::find_by_id(discovery_id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::DiscoveryNotFound)?;

        let content = clean_content(input.content.unwrap_or_default());

        let now = Utc::now();
        let created = discovery_story::ActiveModel {
            discovery_id: Set(parent.id),
            scientist_id: Set(parent.scientist_id),
            image: Set(parent.image.clone()),
            content: Set(Some(serde_json::json!(content))),
            impact: Set(Some(serde_json::json!(input.impact.unwrap_or_default()))),
            references: Set(Some(serde_json::json!(input.references.unwrap_or_default()))),
            timeline: Set(Some(serde_json::json!(input.timeline.unwrap_or_default()))),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(self.db)
        .await
        .map_err(map_write_err)?;

        info!(story_id = created.id, discovery_id, "Discovery story created");

        let author = scientist::Entity::find_by_id(created.scientist_id)
            .one(self.db)
            .await?;
        Ok((created, Some(parent), author))
    }

    /// Update a story by its own id, re-cleaning any supplied content. A
    /// supplied `discovery_id` re-homes the story; the target must exist and
    /// must not already have one.
    pub async fn update(&self, id: i32, input: StoryInput) -> Result<PopulatedStory, ServiceError> {
        let found = discovery_story::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let mut active: discovery_story::ActiveModel = found.into();
        if let Some(discovery_id) = input.discovery_id {
            discovery::Entity::find_by_id(discovery_id)
                .one(self.db)
                .await?
                .ok_or(ServiceError::DiscoveryNotFound)?;
            active.discovery_id = Set(discovery_id);
        }
        if let Some(content) = input.content {
            active.content = Set(Some(serde_json::json!(clean_content(content))));
        }
        if let Some(impact) = input.impact {
            active.impact = Set(Some(serde_json::json!(impact)));
        }
        if let Some(references) = input.references {
            active.references = Set(Some(serde_json::json!(references)));
        }
        if let Some(timeline) = input.timeline {
            active.timeline = Set(Some(serde_json::json!(timeline)));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(self.db).await.map_err(map_write_err)?;

        let parent = discovery::Entity::find_by_id(updated.discovery_id)
            .one(self.db)
            .await?;
        let author = scientist::Entity::find_by_id(updated.scientist_id)
            .one(self.db)
            .await?;
        Ok((updated, parent, author))
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let found = discovery_story::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        discovery_story::Entity::delete_by_id(found.id)
            .exec(self.db)
            .await?;
        info!(story_id = id, "Discovery story deleted");
        Ok(())
    }
}
