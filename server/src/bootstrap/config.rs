//! Environment-driven configuration.
//!
//! Every knob comes from the environment with a sensible development default,
//! except `JWT_SECRET` which must be set explicitly.

use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;
use crate::utils::env::{
    env_bool, env_duration_secs, env_i64, env_string, env_string_opt, env_u16, env_u32,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub logging_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_hours: i64,
}

#[derive(Debug, Clone)]
pub struct UploadsConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub db: DbConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub uploads: UploadsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = env_string_opt("JWT_SECRET")
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".to_string()))?;

        Ok(Self {
            server: ServerConfig {
                port: env_u16("PORT", 5000),
            },
            db: DbConfig {
                url: env_string("DATABASE_URL", "sqlite://idea_origin.db?mode=rwc"),
                max_connections: env_u32("DB_MAX_CONNECTIONS", 10),
                min_connections: env_u32("DB_MIN_CONNECTIONS", 1),
                connect_timeout: env_duration_secs("DB_CONNECT_TIMEOUT_SECS", 10),
                idle_timeout: env_duration_secs("DB_IDLE_TIMEOUT_SECS", 300),
                max_lifetime: env_duration_secs("DB_MAX_LIFETIME_SECS", 3600),
                logging_enabled: env_bool("DB_LOGGING", false),
            },
            cors: CorsConfig {
                allowed_origins: env_string("CORS_ALLOWED_ORIGINS", "http://localhost:5173")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_bool("CORS_ALLOW_CREDENTIALS", true),
            },
            auth: AuthConfig {
                jwt_secret,
                token_expiry_hours: env_i64("TOKEN_EXPIRY_HOURS", 24),
            },
            uploads: UploadsConfig {
                dir: env_string("UPLOADS_DIR", "uploads").into(),
            },
        })
    }
}

impl Default for Config {
    /// Development defaults, used by the integration test harness.
    fn default() -> Self {
        Self {
            server: ServerConfig { port: 5000 },
            db: DbConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 10,
                min_connections: 1,
                connect_timeout: Duration::from_secs(10),
                idle_timeout: Duration::from_secs(300),
                max_lifetime: Duration::from_secs(3600),
                logging_enabled: false,
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
                allow_credentials: true,
            },
            auth: AuthConfig {
                jwt_secret: "insecure-dev-secret".to_string(),
                token_expiry_hours: 24,
            },
            uploads: UploadsConfig {
                dir: std::env::temp_dir().join("idea-origin-uploads"),
            },
        }
    }
}
