//! User domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::PHONE_NUMBER_LENGTH;
use crate::errors::{AppError, AppResult};

/// Phone numbers are exactly ten ASCII digits, no separators.
static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone number regex is valid"));

/// Validate a phone number against the account policy.
///
/// The same rule applies everywhere a phone number enters the system
/// (registration and profile updates).
pub fn validate_phone_number(phone: &str) -> AppResult<()> {
    if PHONE_NUMBER_RE.is_match(phone) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Phone number must be exactly {} digits",
            PHONE_NUMBER_LENGTH
        )))
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration data transfer object (carries the plaintext password)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    /// Unique login name
    #[schema(example = "alice")]
    pub username: String,
    /// User email address
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// User password (8 to 50 characters)
    #[schema(example = "Secret123", min_length = 8, max_length = 50)]
    pub password: String,
    /// User display name
    #[schema(example = "Alice Doe")]
    pub name: String,
    /// User age in years
    #[schema(example = 30)]
    pub age: i32,
    /// User gender
    #[schema(example = "female")]
    pub gender: String,
    /// Ten-digit phone number
    #[schema(example = "1234567890")]
    pub phone_number: String,
}

/// Store-level insert record. The password has already been hashed by
/// the time this exists; plaintext never reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub phone_number: String,
}

/// User update data transfer object.
///
/// Updates are a full-field replace of the mutable attributes; the
/// username and password hash are never touched through this path.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUser {
    /// New display name
    #[schema(example = "Alice D.")]
    pub name: String,
    /// New age
    #[schema(example = 31)]
    pub age: i32,
    /// New email address
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// New gender
    #[schema(example = "female")]
    pub gender: String,
    /// New ten-digit phone number
    #[schema(example = "1234567890")]
    pub phone_number: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Unique login name
    #[schema(example = "alice")]
    pub username: String,
    /// User email address
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// User display name
    #[schema(example = "Alice Doe")]
    pub name: String,
    /// User age in years
    #[schema(example = 30)]
    pub age: i32,
    /// User gender
    #[schema(example = "female")]
    pub gender: String,
    /// Ten-digit phone number
    #[schema(example = "1234567890")]
    pub phone_number: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            age: user.age,
            gender: user.gender,
            phone_number: user.phone_number,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse::from(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phone_number() {
        assert!(validate_phone_number("1234567890").is_ok());
        assert!(validate_phone_number("0000000000").is_ok());
    }

    #[test]
    fn test_phone_number_wrong_length() {
        assert!(validate_phone_number("12345").is_err());
        assert!(validate_phone_number("12345678901").is_err());
        assert!(validate_phone_number("").is_err());
    }

    #[test]
    fn test_phone_number_non_digits() {
        assert!(validate_phone_number("12345abcde").is_err());
        assert!(validate_phone_number("123-456-78").is_err());
    }

    #[test]
    fn test_user_response_has_no_password_field() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            name: "Alice".to_string(),
            age: 30,
            gender: "female".to_string(),
            phone_number: "1234567890".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password_hash: "secret-digest".to_string(),
            name: "Bob".to_string(),
            age: 40,
            gender: "male".to_string(),
            phone_number: "9876543210".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-digest"));
    }
}
