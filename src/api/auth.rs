//! Authentication endpoints: register, login, current user

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthUser, jwt};
use crate::db;
use crate::domain::UserRole;
use crate::error::{ApiResult, AppError};
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

/// POST /api/auth/register
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub telegram: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<db::users::User> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::validation("Username must not be empty"));
    }
    if req.password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }
    let telegram = req.telegram.trim();
    if telegram.is_empty() {
        return Err(AppError::validation("Telegram contact is required"));
    }

    if db::users::find_by_username(&state.pool, username)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed during registration: {e}");
            AppError::internal()
        })?
        .is_some()
    {
        return Err(AppError::conflict(format!(
            "User '{username}' already exists"
        )));
    }

    let hashed = hash_password(&req.password).map_err(|_| AppError::internal())?;
    let user = db::users::create(
        &state.pool,
        username,
        req.email.as_deref().map(str::trim).filter(|e| !e.is_empty()),
        &hashed,
        telegram,
        UserRole::User.as_str(),
    )
    .await
    .map_err(|e| {
        tracing::error!("User insert failed during registration: {e}");
        AppError::internal()
    })?;

    tracing::info!(username = %user.username, "User registered");
    Ok(Json(user))
}

/// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = db::users::find_by_username(&state.pool, req.username.trim())
        .await
        .map_err(|e| {
            tracing::error!("DB error during login: {e}");
            AppError::internal()
        })?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    if !verify_password(&req.password, &user.hashed_password) {
        return Err(AppError::unauthorized("Invalid username or password"));
    }

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    let token =
        jwt::create_token(&user, &state.jwt_secret, state.jwt_expire_minutes).map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::internal()
        })?;

    tracing::info!(username = %user.username, "User logged in");
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "bearer",
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
) -> ApiResult<db::users::User> {
    let user = db::users::find_by_id(&state.pool, identity.id)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {e}");
            AppError::internal()
        })?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(user))
}
