//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{validate_phone_number, UpdateUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Find user by username or email
    async fn find_user(&self, username_or_email: &str) -> AppResult<User>;

    /// List all users (read-only snapshot)
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Replace a user's mutable profile fields
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService over the user store.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn find_user(&self, username_or_email: &str) -> AppResult<User> {
        self.users
            .find_by_username_or_email(username_or_email)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        // Same phone rule as registration
        validate_phone_number(&changes.phone_number)?;

        // Email stays unique across all records; a changed email must not
        // collide with another account.
        if let Some(existing) = self.users.find_by_email(&changes.email).await? {
            if existing.id != id {
                return Err(AppError::conflict("Email"));
            }
        }

        self.users.update(id, changes).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.users.delete(id).await
    }
}
