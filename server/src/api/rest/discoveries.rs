//! Discovery management handlers.
//!
//! These handlers follow the thin controller pattern:
//! - Extract request parameters
//! - Validate input
//! - Delegate to DiscoveryService
//! - Convert to HTTP response

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::api::app_state::AppState;
use crate::api::dto::ApiError;
use crate::modules::discoveries::{DiscoveryInput, DiscoveryService, ServiceError};
use crate::modules::uploads::{self, UploadKind};

use super::is_multipart;

// ============================================================================
// Error Conversion
// ============================================================================

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::Validation(msg) => ApiError::validation(msg),
            ServiceError::NotFound => ApiError::not_found("Discovery not found"),
            ServiceError::ScientistNotFound => ApiError::not_found("Scientist not found"),
        }
    }
}

// ============================================================================
// Handlers (Thin Controllers)
// ============================================================================

/// GET /api/discoveries
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let service = DiscoveryService::new(&state.db);
    let discoveries = service.list_all().await?;

    let data: Vec<Value> = discoveries
        .iter()
        .map(|(d, s)| discovery_json(d, s.as_ref(), false))
        .collect();

    Ok(Json(json!({"success": true, "count": data.len(), "data": data})))
}

/// GET /api/discoveries/scientist/{scientist_id}
pub async fn list_by_scientist(
    State(state): State<AppState>,
    Path(scientist_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let service = DiscoveryService::new(&state.db);
    let discoveries = service.list_by_scientist(scientist_id).await?;

    let data: Vec<Value> = discoveries
        .iter()
        .map(|d| discovery_json(d, None, false))
        .collect();

    Ok(Json(json!({"success": true, "count": data.len(), "data": data})))
}

/// GET /api/discoveries/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let service = DiscoveryService::new(&state.db);
    let (discovery, scientist) = service.get(id).await?;

    Ok(Json(json!({
        "success": true,
        "data": discovery_json(&discovery, scientist.as_ref(), true)
    })))
}

/// POST /api/discoveries
///
/// Requires `scientistId`; accepts JSON or a multipart form with an optional
/// `image` file.
pub async fn create(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = parse_discovery_input(&state, req).await?;

    let service = DiscoveryService::new(&state.db);
    let created = service.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Discovery created successfully",
            "data": discovery_json(&created, None, false)
        })),
    ))
}

/// PUT /api/discoveries/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    req: Request,
) -> Result<Json<Value>, ApiError> {
    let input = parse_discovery_input(&state, req).await?;

    let service = DiscoveryService::new(&state.db);
    let updated = service.update(id, input).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Discovery updated",
        "data": discovery_json(&updated, None, false)
    })))
}

/// DELETE /api/discoveries/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let service = DiscoveryService::new(&state.db);
    service.delete(id).await?;

    Ok(Json(json!({"success": true, "message": "Discovery deleted"})))
}

// ============================================================================
// Body parsing & response mapping
// ============================================================================

async fn parse_discovery_input(
    state: &AppState,
    req: Request,
) -> Result<DiscoveryInput, ApiError> {
    if !is_multipart(req.headers()) {
        let Json(input) = Json::<DiscoveryInput>::from_request(req, &())
            .await
            .map_err(|e| ApiError::validation(e.to_string()))?;
        return Ok(input);
    }

    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let mut input = DiscoveryInput::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "image" {
            let filename = field.file_name().unwrap_or("image").to_string();
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(e.to_string()))?;

            let url = uploads::save_image(
                &state.uploads_dir,
                UploadKind::Discovery,
                &filename,
                content_type.as_deref(),
                &data,
            )
            .await?;
            input.image = Some(url);
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| ApiError::validation(e.to_string()))?;

        match name.as_str() {
            "title" => input.title = Some(text),
            "field" => input.field = Some(text),
            "shortDescription" => input.short_description = Some(text),
            "scientistId" => {
                input.scientist_id = Some(
                    text.trim()
                        .parse::<i32>()
                        .map_err(|_| ApiError::validation("Invalid scientistId"))?,
                );
            }
            "year" => {
                input.year = Some(
                    text.trim()
                        .parse::<i32>()
                        .map_err(|_| ApiError::validation("Invalid year"))?,
                );
            }
            _ => {}
        }
    }

    Ok(input)
}

fn discovery_json(
    d: &entity::discovery::Model,
    scientist: Option<&entity::scientist::Model>,
    with_bio: bool,
) -> Value {
    let mut value = json!({
        "id": d.id,
        "title": d.title,
        "scientistId": d.scientist_id,
        "field": d.field,
        "year": d.year,
        "shortDescription": d.short_description,
        "image": d.image,
        "createdAt": d.created_at.to_rfc3339(),
        "updatedAt": d.updated_at.to_rfc3339(),
    });

    if let Some(s) = scientist {
        let mut summary = json!({
            "id": s.id,
            "name": s.name,
            "field": s.field,
            "image": s.image,
        });
        if with_bio {
            summary["bio"] = json!(s.bio);
        }
        value["scientist"] = summary;
    }

    value
}
