//! User service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use account_api::domain::{UpdateUser, User};
use account_api::errors::AppError;
use account_api::infra::MockUserRepository;
use account_api::services::{UserManager, UserService};

fn create_test_user(id: Uuid) -> User {
    User {
        id,
        username: "testuser".to_string(),
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        name: "Test User".to_string(),
        age: 30,
        gender: "female".to_string(),
        phone_number: "1234567890".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn update_request() -> UpdateUser {
    UpdateUser {
        name: "Updated User".to_string(),
        age: 31,
        email: "updated@example.com".to_string(),
        gender: "female".to_string(),
        phone_number: "9876543210".to_string(),
    }
}

#[tokio::test]
async fn test_get_user_success() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(user_id))
        .returning(|id| Ok(Some(create_test_user(id))));

    let service = UserManager::new(Arc::new(repo));
    let result = service.get_user(user_id).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, user_id);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = UserManager::new(Arc::new(repo));
    let result = service.get_user(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_find_user_by_username_or_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username_or_email()
        .returning(|_| Ok(Some(create_test_user(Uuid::new_v4()))));

    let service = UserManager::new(Arc::new(repo));
    let result = service.find_user("testuser").await;

    assert_eq!(result.unwrap().username, "testuser");
}

#[tokio::test]
async fn test_list_users_success() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().returning(|| {
        Ok(vec![
            create_test_user(Uuid::new_v4()),
            create_test_user(Uuid::new_v4()),
        ])
    });

    let service = UserManager::new(Arc::new(repo));
    let result = service.list_users().await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_user_success() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_update().returning(|id, changes| {
        let mut user = create_test_user(id);
        user.name = changes.name;
        user.age = changes.age;
        user.email = changes.email;
        user.gender = changes.gender;
        user.phone_number = changes.phone_number;
        Ok(user)
    });

    let service = UserManager::new(Arc::new(repo));
    let updated = service.update_user(user_id, update_request()).await.unwrap();

    assert_eq!(updated.name, "Updated User");
    assert_eq!(updated.email, "updated@example.com");
    assert_eq!(updated.phone_number, "9876543210");
}

#[tokio::test]
async fn test_update_user_rejects_short_phone() {
    // The ten-digit rule applies on updates too, not just registration
    let repo = MockUserRepository::new();
    let service = UserManager::new(Arc::new(repo));

    let mut changes = update_request();
    changes.phone_number = "12345".to_string();

    let result = service.update_user(Uuid::new_v4(), changes).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_user_email_taken_by_other_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .returning(|_| Ok(Some(create_test_user(Uuid::new_v4()))));

    let service = UserManager::new(Arc::new(repo));
    let result = service.update_user(Uuid::new_v4(), update_request()).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_user_keeps_own_email() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    // The email resolves to the user being updated; that is not a conflict
    repo.expect_find_by_email()
        .returning(move |_| Ok(Some(create_test_user(user_id))));
    repo.expect_update()
        .returning(|id, _| Ok(create_test_user(id)));

    let service = UserManager::new(Arc::new(repo));
    let result = service.update_user(user_id, update_request()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_update().returning(|_, _| Err(AppError::NotFound));

    let service = UserManager::new(Arc::new(repo));
    let result = service.update_user(Uuid::new_v4(), update_request()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_delete_user_success() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().returning(|_| Ok(()));

    let service = UserManager::new(Arc::new(repo));
    let result = service.delete_user(Uuid::new_v4()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().returning(|_| Err(AppError::NotFound));

    let service = UserManager::new(Arc::new(repo));
    let result = service.delete_user(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
