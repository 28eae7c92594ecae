//! API routes for kanban-tracker

pub mod auth;
pub mod boards;
pub mod cards;
pub mod columns;
pub mod comments;
pub mod enums;
pub mod health;
pub mod stats;
pub mod users;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::jwt::auth_middleware;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // No auth: health, registration, login
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    // Bearer-token authenticated; role gates applied inside handlers
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/users", get(users::list_users))
        .route("/api/boards", get(boards::list_boards))
        .route("/api/columns", get(columns::list_columns))
        .route("/api/columns/{id}", get(columns::get_column))
        .route("/api/columns/{id}/wip-limit", put(columns::update_wip_limit))
        .route("/api/wip-limits", get(columns::list_wip_limits))
        .route("/api/cards", post(cards::create_card))
        .route(
            "/api/cards/{id}",
            put(cards::update_card).delete(cards::delete_card),
        )
        .route("/api/cards/{id}/move", post(cards::move_card))
        .route("/api/cards/{id}/history", get(cards::card_history))
        .route(
            "/api/cards/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/api/statistics", get(stats::statistics))
        .route("/api/enums/real-estate-types", get(enums::real_estate_types))
        .route("/api/enums/regional-centers", get(enums::regional_centers))
        .route("/api/enums/roles", get(enums::roles))
        .route("/api/admin/users", get(users::admin_list_users))
        .route("/api/admin/users/{id}/role", put(users::update_user_role))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
