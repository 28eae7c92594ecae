//! User listing and admin user management

use axum::{Extension, Json, extract::Path, extract::State};
use serde::Deserialize;

use crate::auth::{AuthUser, role};
use crate::db;
use crate::domain::UserRole;
use crate::error::{ApiResult, AppError};
use crate::state::AppState;

/// GET /api/users — assignee/approver pickers; any authenticated caller
pub async fn list_users(
    State(state): State<AppState>,
    Extension(_identity): Extension<AuthUser>,
) -> ApiResult<Vec<db::users::UserBrief>> {
    let users = db::users::list(&state.pool).await.map_err(|e| {
        tracing::error!("User listing failed: {e}");
        AppError::internal()
    })?;
    Ok(Json(users.iter().map(db::users::UserBrief::from).collect()))
}

/// GET /api/admin/users — full user rows for administration
pub async fn admin_list_users(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
) -> ApiResult<Vec<db::users::User>> {
    role::require_admin(&identity)?;

    let users = db::users::list(&state.pool).await.map_err(|e| {
        tracing::error!("User listing failed: {e}");
        AppError::internal()
    })?;
    Ok(Json(users))
}

/// PUT /api/admin/users/{id}/role
#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

pub async fn update_user_role(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<db::users::User> {
    role::require_admin(&identity)?;

    let new_role = UserRole::from_name(&req.role)
        .ok_or_else(|| AppError::validation(format!("Unknown role: {}", req.role)))?;

    // Admins may not reassign their own role
    if user_id == identity.id {
        return Err(AppError::forbidden("You cannot change your own role"));
    }

    let user = db::users::find_by_id(&state.pool, user_id)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {e}");
            AppError::internal()
        })?
        .ok_or_else(|| AppError::not_found("User"))?;

    db::users::set_role(&state.pool, user.id, new_role.as_str())
        .await
        .map_err(|e| {
            tracing::error!("Role update failed: {e}");
            AppError::internal()
        })?;

    tracing::info!(
        user_id = user.id,
        role = new_role.as_str(),
        actor = %identity.username,
        "User role reassigned"
    );

    let updated = db::users::find_by_id(&state.pool, user.id)
        .await
        .map_err(|_| AppError::internal())?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(updated))
}
