use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

pub async fn find_by_name(
    exec: impl PgExecutor<'_>,
    name: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tags WHERE name = $1")
        .bind(name)
        .fetch_optional(exec)
        .await
}

pub async fn insert(exec: impl PgExecutor<'_>, name: &str) -> Result<Tag, sqlx::Error> {
    sqlx::query_as("INSERT INTO tags (name) VALUES ($1) RETURNING *")
        .bind(name)
        .fetch_one(exec)
        .await
}

pub async fn list_for_card(
    exec: impl PgExecutor<'_>,
    card_id: i64,
) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as(
        "SELECT t.* FROM tags t
         JOIN card_tags ct ON ct.tag_id = t.id
         WHERE ct.card_id = $1
         ORDER BY t.name",
    )
    .bind(card_id)
    .fetch_all(exec)
    .await
}

pub async fn clear_card_tags(exec: impl PgExecutor<'_>, card_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM card_tags WHERE card_id = $1")
        .bind(card_id)
        .execute(exec)
        .await?;
    Ok(())
}

pub async fn bind_to_card(
    exec: impl PgExecutor<'_>,
    card_id: i64,
    tag_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO card_tags (card_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(card_id)
        .bind(tag_id)
        .execute(exec)
        .await?;
    Ok(())
}
