//! Scientist management handlers.
//!
//! These handlers follow the thin controller pattern:
//! - Extract request parameters
//! - Validate input
//! - Delegate to ScientistService
//! - Convert to HTTP response

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::api::app_state::AppState;
use crate::api::dto::ApiError;
use crate::modules::scientists::{ScientistInput, ScientistService, ServiceError};
use crate::modules::uploads::{self, UploadKind};

use super::{is_multipart, parse_string_list};

// ============================================================================
// Error Conversion
// ============================================================================

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::Validation(msg) => ApiError::validation(msg),
            ServiceError::NotFound => ApiError::not_found("Scientist not found"),
        }
    }
}

// ============================================================================
// Handlers (Thin Controllers)
// ============================================================================

/// GET /api/scientists
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let service = ScientistService::new(&state.db);
    let scientists = service.list_all().await?;

    let data: Vec<Value> = scientists.iter().map(scientist_json).collect();
    Ok(Json(json!({"success": true, "count": data.len(), "data": data})))
}

/// GET /api/scientists/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let service = ScientistService::new(&state.db);
    let (scientist, discoveries) = service.get_with_discoveries(id).await?;

    let mut data = scientist_json(&scientist);
    data["discoveries"] = discoveries
        .iter()
        .map(|d| {
            json!({
                "id": d.id,
                "title": d.title,
                "field": d.field,
                "year": d.year,
                "shortDescription": d.short_description,
                "image": d.image,
            })
        })
        .collect();

    Ok(Json(json!({"success": true, "data": data})))
}

/// POST /api/scientists
///
/// Accepts JSON or a multipart form with an optional `image` file.
pub async fn create(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = parse_scientist_input(&state, req).await?;

    let service = ScientistService::new(&state.db);
    let created = service.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Scientist created successfully",
            "data": scientist_json(&created)
        })),
    ))
}

/// PUT /api/scientists/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    req: Request,
) -> Result<Json<Value>, ApiError> {
    let input = parse_scientist_input(&state, req).await?;

    let service = ScientistService::new(&state.db);
    let updated = service.update(id, input).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Scientist updated",
        "data": scientist_json(&updated)
    })))
}

/// DELETE /api/scientists/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let service = ScientistService::new(&state.db);
    service.delete(id).await?;

    Ok(Json(json!({"success": true, "message": "Scientist deleted"})))
}

// ============================================================================
// Body parsing & response mapping
// ============================================================================

async fn parse_scientist_input(
    state: &AppState,
    req: Request,
) -> Result<ScientistInput, ApiError> {
    if !is_multipart(req.headers()) {
        let Json(input) = Json::<ScientistInput>::from_request(req, &())
            .await
            .map_err(|e| ApiError::validation(e.to_string()))?;
        return Ok(input);
    }

    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let mut input = ScientistInput::default();
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
                UploadKind::Scientist,
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
            "name" => input.name = Some(text),
            "field" => input.field = Some(text),
            "tagline" => input.tagline = Some(text),
            "era" => input.era = Some(text),
            "nationality" => input.nationality = Some(text),
            "born" => input.born = Some(text),
            "died" => input.died = Some(text),
            "bio" => input.bio = Some(text),
            "story" => input.story = Some(parse_string_list(&text)),
            "impact" => input.impact = Some(parse_string_list(&text)),
            "quotes" => input.quotes = Some(parse_string_list(&text)),
            "funFacts" => input.fun_facts = Some(parse_string_list(&text)),
            _ => {}
        }
    }

    Ok(input)
}

fn scientist_json(m: &entity::scientist::Model) -> Value {
    json!({
        "id": m.id,
        "name": m.name,
        "field": m.field,
        "image": m.image,
        "tagline": m.tagline,
        "era": m.era,
        "nationality": m.nationality,
        "born": m.born,
        "died": m.died,
        "bio": m.bio,
        "story": m.story.clone().unwrap_or_else(|| json!([])),
        "impact": m.impact.clone().unwrap_or_else(|| json!([])),
        "quotes": m.quotes.clone().unwrap_or_else(|| json!([])),
        "funFacts": m.fun_facts.clone().unwrap_or_else(|| json!([])),
        "createdAt": m.created_at.to_rfc3339(),
        "updatedAt": m.updated_at.to_rfc3339(),
    })
}
