//! Card comment endpoints

use axum::{Extension, Json, extract::Path, extract::State};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::db;
use crate::error::{ApiResult, AppError};
use crate::state::AppState;

/// GET /api/cards/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(_identity): Extension<AuthUser>,
    Path(card_id): Path<i64>,
) -> ApiResult<Vec<db::comments::CommentWithAuthor>> {
    let card = db::cards::find_by_id(&state.pool, card_id)
        .await?
        .ok_or_else(|| AppError::not_found("Card"))?;

    let comments = db::comments::list_for_card(&state.pool, card.id).await?;
    Ok(Json(comments))
}

/// POST /api/cards/{id}/comments
#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthUser>,
    Path(card_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<db::comments::CommentWithAuthor> {
    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::validation("Comment must not be empty"));
    }

    let card = db::cards::find_by_id(&state.pool, card_id)
        .await?
        .ok_or_else(|| AppError::not_found("Card"))?;

    let comment = db::comments::insert(&state.pool, card.id, identity.id, content).await?;

    Ok(Json(db::comments::CommentWithAuthor {
        id: comment.id,
        content: comment.content,
        card_id: comment.card_id,
        user_id: comment.user_id,
        username: identity.username,
        created_at: comment.created_at,
    }))
}
