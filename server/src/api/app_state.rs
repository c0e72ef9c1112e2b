//! Shared per-request state.

use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub uploads_dir: PathBuf,
    pub token_expiry_hours: i64,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            db,
            uploads_dir: config.uploads.dir.clone(),
            token_expiry_hours: config.auth.token_expiry_hours,
        }
    }
}
