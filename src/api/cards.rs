//! Card endpoints, thin wrappers over the card lifecycle service

use axum::{Extension, Json, extract::Path, extract::State};

use crate::auth::AuthUser;
use crate::db;
use crate::error::{ApiResult, AppError};
use crate::services::cards as card_service;
use crate::state::AppState;

/// POST /api/cards
pub async fn create_card(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Json(req): Json<card_service::CreateCard>,
) -> ApiResult<card_service::CardDetail> {
    let detail = card_service::create(&state, &identity, req).await?;
    Ok(Json(detail))
}

/// PUT /api/cards/{id}
pub async fn update_card(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(card_id): Path<i64>,
    Json(req): Json<card_service::UpdateCard>,
) -> ApiResult<card_service::CardDetail> {
    let detail = card_service::update(&state, &identity, card_id, req).await?;
    Ok(Json(detail))
}

/// POST /api/cards/{id}/move
pub async fn move_card(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(card_id): Path<i64>,
    Json(req): Json<card_service::MoveCard>,
) -> ApiResult<db::cards::Card> {
    let card = card_service::move_card(&state, &identity, card_id, req).await?;
    Ok(Json(card))
}

/// DELETE /api/cards/{id}
pub async fn delete_card(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(card_id): Path<i64>,
) -> ApiResult<card_service::DeletedCard> {
    let deleted = card_service::delete(&state, &identity, card_id).await?;
    Ok(Json(deleted))
}

/// GET /api/cards/{id}/history
pub async fn card_history(
    State(state): State<AppState>,
    Extension(_identity): Extension<AuthUser>,
    Path(card_id): Path<i64>,
) -> ApiResult<Vec<db::history::HistoryEntry>> {
    let card = db::cards::find_by_id(&state.pool, card_id)
        .await?
        .ok_or_else(|| AppError::not_found("Card"))?;

    let history = db::history::list_for_card(&state.pool, card.id).await?;
    Ok(Json(history))
}
