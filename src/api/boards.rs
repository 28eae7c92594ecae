//! Board listing

use axum::{Extension, Json, extract::State};

use crate::auth::AuthUser;
use crate::db;
use crate::error::{ApiResult, AppError};
use crate::state::AppState;

/// GET /api/boards
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(_identity): Extension<AuthUser>,
) -> ApiResult<Vec<db::boards::Board>> {
    let boards = db::boards::list(&state.pool).await.map_err(|e| {
        tracing::error!("Board listing failed: {e}");
        AppError::internal()
    })?;
    Ok(Json(boards))
}
