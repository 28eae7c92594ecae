//! kanban-tracker — Kanban board backend
//!
//! Long-running HTTP service that:
//! - Serves the board (columns, cards, comments, history) over a JSON API
//! - Enforces WIP limits on card placement
//! - Normalizes card tags to a canonical form
//! - Sends Telegram notifications on approver changes

mod api;
mod auth;
mod config;
mod db;
mod domain;
mod error;
mod services;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kanban_tracker=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting kanban-tracker (env: {})", config.environment);

    // Connect, migrate, seed
    let state = AppState::new(&config).await?;
    state.seed(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("kanban-tracker listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
