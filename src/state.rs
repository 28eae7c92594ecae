//! Application state for kanban-tracker

use sqlx::PgPool;

use crate::config::Config;
use crate::db;
use crate::domain::UserRole;
use crate::services::notify::TelegramNotifier;
use crate::util::hash_password;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT secret for access tokens
    pub jwt_secret: String,
    /// JWT token lifetime in minutes
    pub jwt_expire_minutes: i64,
    /// Outbound Telegram dispatcher
    pub notifier: TelegramNotifier,
}

impl AppState {
    /// Create a new AppState: connect, migrate, wire the notifier
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            jwt_expire_minutes: config.jwt_expire_minutes,
            notifier: TelegramNotifier::new(config.telegram_bot_token.clone()),
        })
    }

    /// Seed the admin user and a default board with three columns when the
    /// database is empty.
    pub async fn seed(&self, config: &Config) -> Result<(), BoxError> {
        if db::users::count(&self.pool).await? == 0 {
            let hashed = hash_password(&config.admin_password)
                .map_err(|e| format!("Failed to hash admin password: {e}"))?;
            let admin = db::users::create(
                &self.pool,
                &config.admin_username,
                None,
                &hashed,
                &config.admin_telegram,
                UserRole::Admin.as_str(),
            )
            .await?;
            tracing::info!(username = %admin.username, "Seeded administrator");
        }

        if db::boards::count(&self.pool).await? == 0 {
            let admin = db::users::find_by_username(&self.pool, &config.admin_username)
                .await?
                .ok_or("Admin user missing after seeding")?;
            let board = db::boards::create(
                &self.pool,
                "Main board",
                Some("Primary kanban board"),
                admin.id,
            )
            .await?;
            for (position, (title, color)) in [
                ("Backlog", "#FF6B6B"),
                ("In Progress", "#4ECDC4"),
                ("Done", "#45B7D1"),
            ]
            .into_iter()
            .enumerate()
            {
                db::columns::create(&self.pool, title, position as i32, color, board.id).await?;
            }
            tracing::info!(board_id = board.id, "Seeded default board and columns");
        }

        Ok(())
    }
}
