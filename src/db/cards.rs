use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub position: Option<i32>,
    pub story_points: Option<i32>,
    pub column_id: i64,
    pub assignee_id: Option<i64>,
    pub approver_id: Option<i64>,
    pub created_by: Option<i64>,
    pub real_estate_type: Option<String>,
    pub rc_mk: Option<String>,
    pub rc_zm: Option<String>,
    pub ticket_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for an insert; enum fields already hold display values
pub struct NewCard<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<i32>,
    pub story_points: Option<i32>,
    pub column_id: i64,
    pub assignee_id: Option<i64>,
    pub approver_id: Option<i64>,
    pub created_by: i64,
    pub real_estate_type: Option<&'a str>,
    pub rc_mk: Option<&'a str>,
    pub rc_zm: Option<&'a str>,
    pub ticket_number: &'a str,
}

pub async fn insert(exec: impl PgExecutor<'_>, card: NewCard<'_>) -> Result<Card, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO cards (title, description, position, story_points, column_id,
                            assignee_id, approver_id, created_by,
                            real_estate_type, rc_mk, rc_zm, ticket_number)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(card.title)
    .bind(card.description)
    .bind(card.position)
    .bind(card.story_points)
    .bind(card.column_id)
    .bind(card.assignee_id)
    .bind(card.approver_id)
    .bind(card.created_by)
    .bind(card.real_estate_type)
    .bind(card.rc_mk)
    .bind(card.rc_zm)
    .bind(card.ticket_number)
    .fetch_one(exec)
    .await
}

/// Full-row update; the service layer merges supplied fields into the
/// current row before calling, so unsupplied fields keep their values.
pub async fn update(exec: impl PgExecutor<'_>, card: &Card) -> Result<Card, sqlx::Error> {
    sqlx::query_as(
        "UPDATE cards
         SET title = $1, description = $2, position = $3, story_points = $4,
             assignee_id = $5, approver_id = $6,
             real_estate_type = $7, rc_mk = $8, rc_zm = $9,
             updated_at = now()
         WHERE id = $10
         RETURNING *",
    )
    .bind(&card.title)
    .bind(&card.description)
    .bind(card.position)
    .bind(card.story_points)
    .bind(card.assignee_id)
    .bind(card.approver_id)
    .bind(&card.real_estate_type)
    .bind(&card.rc_mk)
    .bind(&card.rc_zm)
    .bind(card.id)
    .fetch_one(exec)
    .await
}

pub async fn set_column(
    exec: impl PgExecutor<'_>,
    card_id: i64,
    column_id: i64,
    position: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE cards SET column_id = $1, position = $2, updated_at = now() WHERE id = $3",
    )
    .bind(column_id)
    .bind(position)
    .bind(card_id)
    .execute(exec)
    .await?;
    Ok(())
}

pub async fn find_by_id(exec: impl PgExecutor<'_>, id: i64) -> Result<Option<Card>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM cards WHERE id = $1")
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn list_by_column(
    exec: impl PgExecutor<'_>,
    column_id: i64,
) -> Result<Vec<Card>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM cards WHERE column_id = $1 ORDER BY position, id")
        .bind(column_id)
        .fetch_all(exec)
        .await
}

pub async fn count_in_column(
    exec: impl PgExecutor<'_>,
    column_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE column_id = $1")
        .bind(column_id)
        .fetch_one(exec)
        .await
}

pub async fn delete(exec: impl PgExecutor<'_>, card_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM cards WHERE id = $1")
        .bind(card_id)
        .execute(exec)
        .await?;
    Ok(())
}

/// Draw the next ticket number from the dedicated sequence. Sequence values
/// survive rollbacks, so numbers are monotonic and never reused.
pub async fn next_ticket_value(exec: impl PgExecutor<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT nextval('card_ticket_seq')")
        .fetch_one(exec)
        .await
}
