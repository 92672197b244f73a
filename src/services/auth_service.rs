//! Authentication service - Handles registration and the credential
//! lifecycle: login, password reset, logout, identity checks.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::{validate_phone_number, CreateUser, NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;
use crate::services::{TokenPair, TokenService};

/// Placeholder digest verified on the missing-user login path so lookup
/// failures and bad passwords take the same amount of work.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$cGxhY2Vob2xkZXJzYWx0$cGxhY2Vob2xkZXJoYXNoMDAwMDAwMDAwMDAwMDAw";

/// Identity derived from a verified token's subject claim.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub username: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user account
    async fn register(&self, request: CreateUser) -> AppResult<User>;

    /// Login with username or email, returning an access/refresh token pair
    async fn login(&self, username_or_email: String, password: String) -> AppResult<TokenPair>;

    /// Reset a forgotten password
    async fn forget_password(
        &self,
        username_or_email: String,
        new_password: String,
        confirm_password: String,
    ) -> AppResult<()>;

    /// Revoke the caller's token
    fn logout(&self, token: &str) -> AppResult<()>;

    /// Verify a token and return the identity it was issued for
    fn current_user(&self, token: &str) -> AppResult<CurrentUser>;
}

/// Concrete implementation of AuthService over the user store and the
/// token service.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, request: CreateUser) -> AppResult<User> {
        // Email format is validated by the handler's ValidatedJson extractor
        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username"));
        }
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        // Phone policy is uniform across registration and profile updates
        validate_phone_number(&request.phone_number)?;

        let password_hash = Password::new(&request.password)?.into_string();
        self.users
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
                name: request.name,
                age: request.age,
                gender: request.gender,
                phone_number: request.phone_number,
            })
            .await
    }

    async fn login(&self, username_or_email: String, password: String) -> AppResult<TokenPair> {
        let user_result = self.users.find_by_username_or_email(&username_or_email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid accounts.
        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (DUMMY_PASSWORD_HASH, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // A single error for both failure modes; which of the two checks
        // failed is never revealed to the caller.
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        self.tokens.issue_pair(&user_result.unwrap().username)
    }

    async fn forget_password(
        &self,
        username_or_email: String,
        new_password: String,
        confirm_password: String,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_username_or_email(&username_or_email)
            .await?
            .ok_or(AppError::NotFound)?;

        if new_password != confirm_password {
            return Err(AppError::validation(
                "New password and confirm password should be same",
            ));
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.users.set_password(user.id, password_hash).await
    }

    fn logout(&self, token: &str) -> AppResult<()> {
        // Only a currently valid token can be revoked; anything else
        // (expired, tampered, already revoked) is rejected outright.
        self.tokens.verify(token)?;
        self.tokens.revoke(token);
        Ok(())
    }

    fn current_user(&self, token: &str) -> AppResult<CurrentUser> {
        let claims = self.tokens.verify(token)?;
        Ok(CurrentUser {
            username: claims.sub,
        })
    }
}
