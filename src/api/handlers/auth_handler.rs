//! Authentication handlers.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
    routing::{post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{CreateUser, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::services::TokenPair;
use crate::types::{ApiResponse, MessageResponse};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Unique login name
    #[validate(length(min = 4, max = 50, message = "Username must be between 4 and 50 characters long"))]
    #[schema(example = "alice")]
    pub username: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// User password (8 to 50 characters)
    #[validate(length(min = 8, max = 50, message = "Password must be between 8 and 50 characters long"))]
    #[schema(example = "Secret123", min_length = 8, max_length = 50)]
    pub password: String,
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Alice Doe")]
    pub name: String,
    /// User age in years
    #[schema(example = 30)]
    pub age: i32,
    /// User gender
    #[validate(length(min = 1, message = "Gender is required"))]
    #[schema(example = "female")]
    pub gender: String,
    /// Ten-digit phone number
    #[validate(length(equal = 10, message = "Phone number should be exactly 10 digits"))]
    #[schema(example = "1234567890")]
    pub phone_number: String,
}

impl From<RegisterRequest> for CreateUser {
    fn from(request: RegisterRequest) -> Self {
        CreateUser {
            username: request.username,
            email: request.email,
            password: request.password,
            name: request.name,
            age: request.age,
            gender: request.gender,
            phone_number: request.phone_number,
        }
    }
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username or email address
    #[validate(length(min = 1, message = "Username or email is required"))]
    #[schema(example = "alice")]
    pub username_or_email: String,
    /// User password
    #[schema(example = "Secret123")]
    pub password: String,
}

/// Password reset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgetPasswordRequest {
    /// Username or email address
    #[validate(length(min = 1, message = "Username or email is required"))]
    #[schema(example = "alice")]
    pub username_or_email: String,
    /// New password (8 to 50 characters)
    #[serde(alias = "newPassword")]
    #[validate(length(min = 8, max = 50, message = "Password must be between 8 and 50 characters long"))]
    #[schema(example = "NewSecret123")]
    pub new_password: String,
    /// Confirmation of the new password
    #[serde(alias = "confirmPassword")]
    #[schema(example = "NewSecret123")]
    pub confirm_password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forget-password", put(forget_password))
        .route("/logout", post(logout))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state.auth_service.register(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            UserResponse::from(user),
            "User created successfully",
        )),
    ))
}

/// Login and get an access/refresh token pair
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenPair),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let tokens = state
        .auth_service
        .login(payload.username_or_email, payload.password)
        .await?;

    Ok(Json(tokens))
}

/// Reset a forgotten password
#[utoipa::path(
    put,
    path = "/auth/forget-password",
    tag = "Authentication",
    request_body = ForgetPasswordRequest,
    responses(
        (status = 200, description = "Password changed successfully", body = MessageResponse),
        (status = 400, description = "Passwords do not match"),
        (status = 404, description = "User not found")
    )
)]
pub async fn forget_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .forget_password(
            payload.username_or_email,
            payload.new_password,
            payload.confirm_password,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// Logout by revoking the presented bearer token
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out successfully", body = MessageResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<MessageResponse>> {
    let token = bearer_token(&headers)?;
    state.auth_service.logout(token)?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Pull the bearer token out of the Authorization header
fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)
}
