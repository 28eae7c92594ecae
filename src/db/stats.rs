//! Aggregate queries for the statistics endpoint
//!
//! Every query binds the same optional filter triple, so narrowing by
//! assignee or creation window needs no dynamic SQL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, Copy, Default)]
pub struct CardFilter {
    pub assignee_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

// NULL bind means the condition is not applied; cards always aliased `c`
const FILTER_CLAUSE: &str = "($1::bigint IS NULL OR c.assignee_id = $1)
     AND ($2::timestamptz IS NULL OR c.created_at >= $2)
     AND ($3::timestamptz IS NULL OR c.created_at <= $3)";

pub async fn total_cards(
    exec: impl PgExecutor<'_>,
    filter: CardFilter,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM cards c WHERE {FILTER_CLAUSE}"
    ))
    .bind(filter.assignee_id)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_one(exec)
    .await
}

pub async fn average_story_points(
    exec: impl PgExecutor<'_>,
    filter: CardFilter,
) -> Result<Option<f64>, sqlx::Error> {
    sqlx::query_scalar(&format!(
        "SELECT AVG(c.story_points)::float8 FROM cards c WHERE {FILTER_CLAUSE}"
    ))
    .bind(filter.assignee_id)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_one(exec)
    .await
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct ColumnCount {
    pub column_id: i64,
    pub title: String,
    pub cards_count: i64,
}

pub async fn cards_per_column(
    exec: impl PgExecutor<'_>,
    filter: CardFilter,
) -> Result<Vec<ColumnCount>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT col.id AS column_id, col.title, COUNT(c.id) AS cards_count
         FROM columns col
         LEFT JOIN cards c ON c.column_id = col.id AND {FILTER_CLAUSE}
         GROUP BY col.id, col.title, col.position
         ORDER BY col.position, col.id"
    ))
    .bind(filter.assignee_id)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_all(exec)
    .await
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct AssigneeCount {
    pub user_id: i64,
    pub username: String,
    pub cards_count: i64,
}

pub async fn cards_per_assignee(
    exec: impl PgExecutor<'_>,
    filter: CardFilter,
) -> Result<Vec<AssigneeCount>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT u.id AS user_id, u.username, COUNT(*) AS cards_count
         FROM cards c
         JOIN users u ON u.id = c.assignee_id
         WHERE {FILTER_CLAUSE}
         GROUP BY u.id, u.username
         ORDER BY cards_count DESC, u.username"
    ))
    .bind(filter.assignee_id)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_all(exec)
    .await
}
