//! Bearer-token extractors for protected routes.
//!
//! `AuthenticatedUser` rejects with 401 when the Authorization header is
//! missing or the token fails validation. `AdminUser` additionally rejects
//! with 403 when the token's role claim is not "admin".

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::modules::auth::jwt::{self, Claims};

pub struct AuthenticatedUser {
    pub user_id: i32,
    pub role: String,
    pub claims: Claims,
}

pub struct AdminUser(pub AuthenticatedUser);

pub enum AuthError {
    MissingAuthHeader,
    InvalidAuthHeaderFormat,
    InvalidToken(String),
    AdminRequired,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingAuthHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header".to_string())
            }
            AuthError::InvalidAuthHeaderFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            ),
            AuthError::InvalidToken(e) => {
                (StatusCode::UNAUTHORIZED, format!("Invalid token: {}", e))
            }
            AuthError::AdminRequired => {
                (StatusCode::FORBIDDEN, "Admin access required".to_string())
            }
        };
        (status, Json(json!({"success": false, "message": message}))).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeaderFormat)?;

        let token_data =
            jwt::validate_token(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let user_id = token_data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidToken("malformed subject".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            role: token_data.claims.role.clone(),
            claims: token_data.claims,
        })
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.role != "admin" {
            return Err(AuthError::AdminRequired);
        }
        Ok(AdminUser(user))
    }
}
