//! User service layer: registration, login verification, profile and
//! admin-side user management.

use chrono::Utc;
use entity::user;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use tracing::info;

use super::password::{self, PasswordError};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error(transparent)]
    Password(#[from] PasswordError),
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new account. The stored email is trimmed and lowercased;
    /// the password is argon2-hashed before it touches the database.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<user::Model, ServiceError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        if name.len() < 2 {
            return Err(ServiceError::Validation(
                "Name must be at least 2 characters".to_string(),
            ));
        }
        if password.len() < 6 {
            return Err(ServiceError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(ServiceError::Validation("A valid email is required".to_string()));
        }

        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(&email))
            .one(self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }

        let now = Utc::now();
        let created = user::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.clone()),
            password_hash: Set(password::hash_password(password)?),
            avatar: Set("/avatar.png".to_string()),
            role: Set(ROLE_USER.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(user_id = created.id, "User registered");
        Ok(created)
    }

    /// Verify credentials, returning the account on success.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, ServiceError> {
        let email = email.trim().to_lowercase();

        let found = user::Entity::find()
            .filter(user::Column::Email.eq(&email))
            .one(self.db)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !password::verify_password(password, &found.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(found)
    }

    pub async fn get(&self, id: i32) -> Result<user::Model, ServiceError> {
        user::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn update_profile(
        &self,
        id: i32,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Result<user::Model, ServiceError> {
        let found = self.get(id).await?;

        let mut active: user::ActiveModel = found.into();
        if let Some(name) = name {
            let name = name.trim().to_string();
            if name.len() < 2 {
                return Err(ServiceError::Validation(
                    "Name must be at least 2 characters".to_string(),
                ));
            }
            active.name = Set(name);
        }
        if let Some(avatar) = avatar {
            active.avatar = Set(avatar);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    /// Overwrite the password after verifying the current one.
    pub async fn change_password(
        &self,
        id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        let found = self.get(id).await?;

        if !password::verify_password(current_password, &found.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }
        if new_password.len() < 6 {
            return Err(ServiceError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        let mut active: user::ActiveModel = found.into();
        active.password_hash = Set(password::hash_password(new_password)?);
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await?;

        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(self.db)
            .await?)
    }

    /// Admin-side update of another account's name and role.
    pub async fn update_by_admin(
        &self,
        id: i32,
        name: Option<String>,
        role: Option<String>,
    ) -> Result<user::Model, ServiceError> {
        let found = self.get(id).await?;

        let mut active: user::ActiveModel = found.into();
        if let Some(name) = name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(role) = role {
            if role != ROLE_ADMIN && role != ROLE_USER {
                return Err(ServiceError::Validation(format!("Invalid role: {role}")));
            }
            active.role = Set(role);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let found = self.get(id).await?;
        user::Entity::delete_by_id(found.id).exec(self.db).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
