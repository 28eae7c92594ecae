use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Column {
    pub id: i64,
    pub title: String,
    pub position: i32,
    pub color: String,
    pub wip_limit: Option<i32>,
    pub board_id: i64,
}

pub async fn create(
    exec: impl PgExecutor<'_>,
    title: &str,
    position: i32,
    color: &str,
    board_id: i64,
) -> Result<Column, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO columns (title, position, color, board_id)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(title)
    .bind(position)
    .bind(color)
    .bind(board_id)
    .fetch_one(exec)
    .await
}

pub async fn find_by_id(exec: impl PgExecutor<'_>, id: i64) -> Result<Option<Column>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM columns WHERE id = $1")
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn list_ordered(exec: impl PgExecutor<'_>) -> Result<Vec<Column>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM columns ORDER BY position, id")
        .fetch_all(exec)
        .await
}

pub async fn set_wip_limit(
    exec: impl PgExecutor<'_>,
    column_id: i64,
    wip_limit: Option<i32>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE columns SET wip_limit = $1 WHERE id = $2")
        .bind(wip_limit)
        .bind(column_id)
        .execute(exec)
        .await?;
    Ok(())
}
