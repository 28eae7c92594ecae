use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub card_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Comment with the author's username resolved, for API responses
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub content: String,
    pub card_id: i64,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

pub async fn insert(
    exec: impl PgExecutor<'_>,
    card_id: i64,
    user_id: i64,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO comments (content, card_id, user_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(content)
    .bind(card_id)
    .bind(user_id)
    .fetch_one(exec)
    .await
}

pub async fn list_for_card(
    exec: impl PgExecutor<'_>,
    card_id: i64,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    sqlx::query_as(
        "SELECT c.id, c.content, c.card_id, c.user_id, u.username, c.created_at
         FROM comments c
         JOIN users u ON u.id = c.user_id
         WHERE c.card_id = $1
         ORDER BY c.created_at, c.id",
    )
    .bind(card_id)
    .fetch_all(exec)
    .await
}
