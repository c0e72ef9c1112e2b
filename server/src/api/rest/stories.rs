//! Discovery-story management handlers.
//!
//! These handlers follow the thin controller pattern:
//! - Extract request parameters
//! - Validate input
//! - Delegate to StoryService
//! - Convert to HTTP response

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::api::app_state::AppState;
use crate::api::dto::ApiError;
use crate::modules::stories::{ServiceError, StoryInput, StoryService};

// ============================================================================
// Error Conversion
// ============================================================================

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::DiscoveryNotFound => ApiError::not_found("Discovery not found"),
            ServiceError::NotFound => ApiError::not_found("No story found for this discovery"),
            ServiceError::DuplicateStory => {
                ApiError::validation("Story already exists for this discovery")
            }
        }
    }
}

// ============================================================================
// Handlers (Thin Controllers)
// ============================================================================

/// GET /api/discovery-stories
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let service = StoryService::new(&state.db);
    let stories = service.list_all().await?;

    let data: Vec<Value> = stories
        .iter()
        .map(|(story, parent, author)| story_json(story, parent.as_ref(), author.as_ref()))
        .collect();

    Ok(Json(json!({"success": true, "count": data.len(), "data": data})))
}

/// GET /api/discovery-stories/by-discovery/{discovery_id}
///
/// The identifier is validated before the lookup so a malformed value is a
/// 400, not a 404.
pub async fn get_by_discovery(
    State(state): State<AppState>,
    Path(discovery_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let discovery_id = discovery_id
        .trim()
        .parse::<i32>()
        .map_err(|_| ApiError::validation("Invalid discovery id"))?;

    let service = StoryService::new(&state.db);
    let (story, parent, author) = service.get_by_discovery_id(discovery_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": story_json(&story, parent.as_ref(), author.as_ref())
    })))
}

/// POST /api/discovery-stories
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<StoryInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let service = StoryService::new(&state.db);
    let (story, parent, author) = service.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Discovery story created successfully",
            "data": story_json(&story, parent.as_ref(), author.as_ref())
        })),
    ))
}

/// PUT /api/discovery-stories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<StoryInput>,
) -> Result<Json<Value>, ApiError> {
    let service = StoryService::new(&state.db);
    let (story, parent, author) = service.update(id, payload).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Story updated successfully",
        "data": story_json(&story, parent.as_ref(), author.as_ref())
    })))
}

/// DELETE /api/discovery-stories/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let service = StoryService::new(&state.db);
    service.delete(id).await?;

    Ok(Json(json!({"success": true, "message": "Story deleted"})))
}

// ============================================================================
// Response mapping
// ============================================================================

fn story_json(
    story: &entity::discovery_story::Model,
    parent: Option<&entity::discovery::Model>,
    author: Option<&entity::scientist::Model>,
) -> Value {
    json!({
        "id": story.id,
        "discoveryId": story.discovery_id,
        "scientistId": story.scientist_id,
        "image": story.image,
        "content": story.content.clone().unwrap_or_else(|| json!([])),
        "impact": story.impact.clone().unwrap_or_else(|| json!([])),
        "references": story.references.clone().unwrap_or_else(|| json!([])),
        "timeline": story.timeline.clone().unwrap_or_else(|| json!([])),
        "discovery": parent.map(|d| json!({
            "id": d.id,
            "title": d.title,
            "field": d.field,
            "year": d.year,
            "image": d.image,
        })),
        "scientist": author.map(|s| json!({
            "id": s.id,
            "name": s.name,
            "field": s.field,
            "image": s.image,
        })),
        "createdAt": story.created_at.to_rfc3339(),
        "updatedAt": story.updated_at.to_rfc3339(),
    })
}
