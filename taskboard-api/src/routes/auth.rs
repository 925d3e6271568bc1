/// Credential endpoints, the only public part of `/v1`
///
/// Registration and login both answer with the user's public fields plus
/// an access/refresh token pair; everything else on the API is reached
/// with the access token.
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Create an account
/// - `POST /v1/auth/login` - Exchange credentials for tokens
/// - `POST /v1/auth/refresh` - Exchange a refresh token for a new access token
/// - `POST /v1/auth/logout` - Client-side token discard

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User, UserSummary},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (also checked for strength)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub full_name: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Body returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The authenticated user's public fields
    pub user: UserSummary,

    /// Short-lived token for API requests
    pub access_token: String,

    /// Long-lived token for the refresh endpoint
    pub refresh_token: String,
}

/// Body accepted by the refresh endpoint
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// A still-valid refresh token
    pub refresh_token: String,
}

/// Body returned by the refresh endpoint
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Fresh access token
    pub access_token: String,
}

/// Registers a new user
///
/// # Errors
///
/// - `409 Conflict`: email already registered
/// - `422 Unprocessable Entity`: validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    password::validate_password_strength(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message: e,
        }])
    })?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            full_name: req.full_name,
            avatar_url: None,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(issue_tokens(&state, user)?))
}

/// Logs a user in
///
/// Returns the same non-committal 401 for an unknown email and a wrong
/// password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(issue_tokens(&state, user)?))
}

/// Exchanges a refresh token for a new access token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Logout endpoint
///
/// Tokens are stateless, so there is nothing to revoke server-side; the
/// client simply discards its tokens. Kept as an endpoint so clients have
/// a uniform call to make.
pub async fn logout() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Logout successful" }))
}

fn issue_tokens(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let mint = |token_type| {
        jwt::create_token(&jwt::Claims::new(user.id, token_type), state.jwt_secret())
    };

    Ok(AuthResponse {
        access_token: mint(jwt::TokenType::Access)?,
        refresh_token: mint(jwt::TokenType::Refresh)?,
        user: user.summary(),
    })
}
