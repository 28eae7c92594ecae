use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub telegram: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Minimal user payload attached to cards and comments
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct UserBrief {
    pub id: i64,
    pub username: String,
    pub telegram: String,
}

impl From<&User> for UserBrief {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            telegram: user.telegram.clone(),
        }
    }
}

pub async fn create(
    exec: impl PgExecutor<'_>,
    username: &str,
    email: Option<&str>,
    hashed_password: &str,
    telegram: &str,
    role: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (username, email, hashed_password, telegram, role)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .bind(telegram)
    .bind(role)
    .fetch_one(exec)
    .await
}

pub async fn find_by_id(exec: impl PgExecutor<'_>, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(exec)
        .await
}

/// Case-insensitive username lookup, used by registration and login
pub async fn find_by_username(
    exec: impl PgExecutor<'_>,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
        .bind(username)
        .fetch_optional(exec)
        .await
}

pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY id")
        .fetch_all(exec)
        .await
}

pub async fn set_role(
    exec: impl PgExecutor<'_>,
    user_id: i64,
    role: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
        .bind(role)
        .bind(user_id)
        .execute(exec)
        .await?;
    Ok(())
}

pub async fn count(exec: impl PgExecutor<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(exec)
        .await
}
