//! Column endpoints: board view, WIP limit administration

use axum::{Extension, Json, extract::Path, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthUser, role};
use crate::db;
use crate::error::{ApiResult, AppError, ServiceResult};
use crate::services::cards as card_service;
use crate::state::AppState;

/// Column with its cards resolved, the board-view payload
#[derive(Serialize)]
pub struct ColumnWithCards {
    #[serde(flatten)]
    pub column: db::columns::Column,
    pub cards_count: usize,
    pub cards: Vec<card_service::CardDetail>,
}

async fn load_column_view(
    state: &AppState,
    column: db::columns::Column,
) -> ServiceResult<ColumnWithCards> {
    let rows = db::cards::list_by_column(&state.pool, column.id).await?;
    let mut cards = Vec::with_capacity(rows.len());
    for row in rows {
        cards.push(card_service::load_detail(state, row).await?);
    }
    Ok(ColumnWithCards {
        column,
        cards_count: cards.len(),
        cards,
    })
}

/// GET /api/columns
pub async fn list_columns(
    State(state): State<AppState>,
    Extension(_identity): Extension<AuthUser>,
) -> ApiResult<Vec<ColumnWithCards>> {
    let columns = db::columns::list_ordered(&state.pool).await?;

    let mut out = Vec::with_capacity(columns.len());
    for column in columns {
        out.push(load_column_view(&state, column).await?);
    }
    Ok(Json(out))
}

/// GET /api/columns/{id}
pub async fn get_column(
    State(state): State<AppState>,
    Extension(_identity): Extension<AuthUser>,
    Path(column_id): Path<i64>,
) -> ApiResult<ColumnWithCards> {
    let column = db::columns::find_by_id(&state.pool, column_id)
        .await?
        .ok_or_else(|| AppError::not_found("Column"))?;

    Ok(Json(load_column_view(&state, column).await?))
}

/// WIP summary row for curators
#[derive(Serialize)]
pub struct WipSummary {
    pub column_id: i64,
    pub title: String,
    pub wip_limit: Option<i32>,
    pub cards_count: i64,
}

/// GET /api/wip-limits — curator or admin
pub async fn list_wip_limits(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
) -> ApiResult<Vec<WipSummary>> {
    role::require_curator(&identity)?;

    let columns = db::columns::list_ordered(&state.pool).await?;

    let mut out = Vec::with_capacity(columns.len());
    for column in columns {
        let cards_count = db::cards::count_in_column(&state.pool, column.id).await?;
        out.push(WipSummary {
            column_id: column.id,
            title: column.title,
            wip_limit: column.wip_limit,
            cards_count,
        });
    }
    Ok(Json(out))
}

/// PUT /api/columns/{id}/wip-limit — curator or admin
#[derive(Deserialize)]
pub struct UpdateWipLimitRequest {
    /// Positive integer, or null for unlimited
    pub wip_limit: Option<i32>,
}

pub async fn update_wip_limit(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(column_id): Path<i64>,
    Json(req): Json<UpdateWipLimitRequest>,
) -> ApiResult<WipSummary> {
    role::require_curator(&identity)?;

    if req.wip_limit.is_some_and(|limit| limit <= 0) {
        return Err(AppError::validation("WIP limit must be a positive integer"));
    }

    let column = db::columns::find_by_id(&state.pool, column_id)
        .await?
        .ok_or_else(|| AppError::not_found("Column"))?;

    db::columns::set_wip_limit(&state.pool, column.id, req.wip_limit).await?;

    tracing::info!(
        column_id = column.id,
        wip_limit = ?req.wip_limit,
        actor = %identity.username,
        "WIP limit updated"
    );

    let cards_count = db::cards::count_in_column(&state.pool, column.id).await?;

    Ok(Json(WipSummary {
        column_id: column.id,
        title: column.title,
        wip_limit: req.wip_limit,
        cards_count,
    }))
}
