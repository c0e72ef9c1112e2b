//! Authentication and user-management handlers.
//!
//! These handlers follow the thin controller pattern:
//! - Extract request parameters
//! - Validate input
//! - Delegate to UserService
//! - Convert to HTTP response

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::app_state::AppState;
use crate::api::dto::{ApiError, UserResponse};
use crate::api::jwt_middleware::{AdminUser, AuthenticatedUser};
use crate::modules::auth::jwt;
use crate::modules::auth::service::{ServiceError, UserService};
use crate::modules::uploads::{self, UploadKind};

use super::is_multipart;

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminUserUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
}

// ============================================================================
// Error Conversion
// ============================================================================

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::Validation(msg) => ApiError::validation(msg),
            ServiceError::DuplicateEmail => ApiError::conflict("Email already registered"),
            ServiceError::InvalidCredentials => ApiError::unauthorized("Invalid email or password"),
            ServiceError::NotFound => ApiError::not_found("User not found"),
            ServiceError::Password(e) => ApiError::internal(e.to_string()),
        }
    }
}

// ============================================================================
// Handlers (Thin Controllers)
// ============================================================================

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let service = UserService::new(&state.db);
    let user = service
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    let token = jwt::generate_token(user.id, &user.role, state.token_expiry_hours)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "data": {"user": UserResponse::from(user), "token": token}
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = UserService::new(&state.db);
    let user = service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let token = jwt::generate_token(user.id, &user.role, state.token_expiry_hours)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {"user": UserResponse::from(user), "token": token}
    })))
}

/// GET /api/auth/me
pub async fn me(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let service = UserService::new(&state.db);
    let user = service.get(auth.user_id).await?;

    Ok(Json(json!({"success": true, "data": UserResponse::from(user)})))
}

/// PUT /api/auth/profile
///
/// Accepts JSON (`{name?, avatar?}`) or a multipart form with a `name` field
/// and an `avatar` image file.
pub async fn update_profile(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<Value>, ApiError> {
    let update = parse_profile_update(&state, req).await?;

    let service = UserService::new(&state.db);
    let user = service
        .update_profile(auth.user_id, update.name, update.avatar)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated",
        "data": UserResponse::from(user)
    })))
}

/// PUT /api/auth/change-password
pub async fn change_password(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = UserService::new(&state.db);
    service
        .change_password(auth.user_id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(json!({"success": true, "message": "Password changed"})))
}

/// GET /api/auth/users (admin)
pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let service = UserService::new(&state.db);
    let users = service.list_all().await?;

    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(json!({"success": true, "count": data.len(), "data": data})))
}

/// PUT /api/auth/users/{id} (admin)
pub async fn update_user(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AdminUserUpdate>,
) -> Result<Json<Value>, ApiError> {
    let service = UserService::new(&state.db);
    let user = service
        .update_by_admin(id, payload.name, payload.role)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "User updated",
        "data": UserResponse::from(user)
    })))
}

/// DELETE /api/auth/users/{id} (admin)
pub async fn delete_user(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let service = UserService::new(&state.db);
    service.delete(id).await?;

    Ok(Json(json!({"success": true, "message": "User deleted"})))
}

// ============================================================================
// Body parsing
// ============================================================================

async fn parse_profile_update(state: &AppState, req: Request) -> Result<ProfileUpdate, ApiError> {
    if !is_multipart(req.headers()) {
        let Json(update) = Json::<ProfileUpdate>::from_request(req, &())
            .await
            .map_err(|e| ApiError::validation(e.to_string()))?;
        return Ok(update);
    }

    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let mut update = ProfileUpdate::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => {
                update.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::validation(e.to_string()))?,
                );
            }
            "avatar" => {
                let filename = field.file_name().unwrap_or("avatar.png").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;

                let url = uploads::save_image(
                    &state.uploads_dir,
                    UploadKind::Avatar,
                    &filename,
                    content_type.as_deref(),
                    &data,
                )
                .await?;
                update.avatar = Some(url);
            }
            _ => {}
        }
    }

    Ok(update)
}
