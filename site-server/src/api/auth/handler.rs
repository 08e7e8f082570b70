//! Authentication Handlers
//!
//! Login, logout, current-user lookup, and admin account registration.

use std::time::Duration;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::AdminUserCreate;
use crate::db::repository::AdminUserRepository;
use crate::utils::validation::{validate_required_text, MAX_PASSWORD_LEN};
use crate::utils::{ok, AppError, AppResponse};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
}

/// POST /api/auth/login
///
/// Failures share one message so usernames cannot be enumerated.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let repo = AdminUserRepository::new(state.get_db());
    let user = repo.find_by_username(&req.username).await?;

    // Fixed delay before acting on the lookup result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    if !user.is_active {
        return Err(AppError::forbidden("Account has been disabled".to_string()));
    }

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user_id,
            username: user.username,
        },
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless, so logout is client-side; the endpoint exists so
/// the admin UI has something to call and the access log records it.
pub async fn logout(
    Extension(user): Extension<CurrentUser>,
) -> Json<AppResponse<()>> {
    tracing::info!(username = %user.username, "User logged out");
    ok(())
}

/// GET /api/auth/me
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<UserInfo> {
    Json(UserInfo {
        id: user.id,
        username: user.username,
    })
}

/// POST /api/auth/register
///
/// Creates another admin account. Requires an authenticated admin.
pub async fn register(
    State(state): State<ServerState>,
    Extension(creator): Extension<CurrentUser>,
    Json(req): Json<AdminUserCreate>,
) -> Result<Json<UserInfo>, AppError> {
    validate_required_text(&req.username, "username", 64)?;
    if req.password.len() < 8 || req.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be between 8 and {} characters",
            MAX_PASSWORD_LEN
        )));
    }

    let repo = AdminUserRepository::new(state.get_db());
    let user = repo.create(req).await?;

    tracing::info!(
        created_by = %creator.username,
        username = %user.username,
        "Admin account created"
    );

    Ok(Json(UserInfo {
        id: user.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        username: user.username,
    }))
}
