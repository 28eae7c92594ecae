use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub card_id: i64,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn append(
    exec: impl PgExecutor<'_>,
    card_id: i64,
    action: &str,
    details: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO card_history (card_id, action, details) VALUES ($1, $2, $3)")
        .bind(card_id)
        .bind(action)
        .bind(details)
        .execute(exec)
        .await?;
    Ok(())
}

pub async fn list_for_card(
    exec: impl PgExecutor<'_>,
    card_id: i64,
) -> Result<Vec<HistoryEntry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM card_history WHERE card_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(card_id)
        .fetch_all(exec)
        .await
}
