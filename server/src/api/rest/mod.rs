//! REST API router configuration.
//!
//! Route definitions, CORS, static upload serving, and server startup.
//! Handler implementations live in their respective submodules.

mod auth;
mod discoveries;
mod health;
mod scientists;
mod stories;

use axum::http::{HeaderMap, HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use crate::api::app_state::AppState;
use crate::bootstrap::config::Config;
use crate::errors::AppError;

/// Build the REST API router with all routes.
pub fn build_router(app_state: AppState, config: &Config) -> Router {
    let cors = build_cors_layer(config);

    Router::new()
        // Health
        .route("/", get(health::root))
        .route("/api/health", get(health::check))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/profile", put(auth::update_profile))
        .route("/api/auth/change-password", put(auth::change_password))
        .route("/api/auth/users", get(auth::list_users))
        .route(
            "/api/auth/users/{id}",
            put(auth::update_user).delete(auth::delete_user),
        )
        // Scientists
        .route(
            "/api/scientists",
            get(scientists::list).post(scientists::create),
        )
        .route(
            "/api/scientists/{id}",
            get(scientists::get)
                .put(scientists::update)
                .delete(scientists::delete),
        )
        // Discoveries
        .route(
            "/api/discoveries",
            get(discoveries::list).post(discoveries::create),
        )
        .route(
            "/api/discoveries/scientist/{scientist_id}",
            get(discoveries::list_by_scientist),
        )
        .route(
            "/api/discoveries/{id}",
            get(discoveries::get)
                .put(discoveries::update)
                .delete(discoveries::delete),
        )
        // Discovery stories
        .route(
            "/api/discovery-stories",
            get(stories::list).post(stories::create),
        )
        .route(
            "/api/discovery-stories/by-discovery/{discovery_id}",
            get(stories::get_by_discovery),
        )
        .route(
            "/api/discovery-stories/{id}",
            put(stories::update).delete(stories::delete),
        )
        // Uploaded images
        .nest_service("/uploads", ServeDir::new(&app_state.uploads_dir))
        .with_state(app_state)
        .layer(cors)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, ACCEPT, CONTENT_TYPE, AUTHORIZATION])
        .max_age(std::time::Duration::from_secs(3600));

    if config.cors.allow_credentials {
        cors = cors.allow_credentials(true);
    }

    cors
}

/// Start the REST server.
pub async fn start(app_state: AppState, config: &Config) -> Result<(), AppError> {
    let app = build_router(app_state, config);
    let bind_addr = format!("0.0.0.0:{}", config.server.port);

    info!("Starting REST server on {}", &bind_addr);
    info!("CORS allowed origins: {:?}", config.cors.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

impl From<crate::modules::uploads::UploadError> for crate::api::dto::ApiError {
    fn from(err: crate::modules::uploads::UploadError) -> Self {
        use crate::api::dto::ApiError;
        use crate::modules::uploads::UploadError;
        match err {
            UploadError::NotAnImage => ApiError::validation(err.to_string()),
            UploadError::Io(e) => ApiError::internal(e.to_string()),
        }
    }
}

/// True when the request carries a multipart form body.
pub(crate) fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

/// Parse a form field holding a list of strings.
///
/// Admin forms send either a JSON-encoded array or one value per line.
pub(crate) fn parse_string_list(raw: &str) -> Vec<String> {
    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return list;
    }
    raw.lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
