use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Board {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    exec: impl PgExecutor<'_>,
    title: &str,
    description: Option<&str>,
    owner_id: i64,
) -> Result<Board, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO boards (title, description, owner_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(title)
    .bind(description)
    .bind(owner_id)
    .fetch_one(exec)
    .await
}

pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<Board>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM boards ORDER BY id")
        .fetch_all(exec)
        .await
}

pub async fn count(exec: impl PgExecutor<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM boards")
        .fetch_one(exec)
        .await
}
