//! Board statistics endpoint

use axum::{Extension, Json, extract::Query, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::db;
use crate::db::stats::{AssigneeCount, CardFilter, ColumnCount};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct StatisticsQuery {
    pub assignee_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct Statistics {
    pub total_cards: i64,
    pub average_story_points: Option<f64>,
    pub cards_per_column: Vec<ColumnCount>,
    pub cards_per_assignee: Vec<AssigneeCount>,
}

/// GET /api/statistics
pub async fn statistics(
    State(state): State<AppState>,
    Extension(_identity): Extension<AuthUser>,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<Statistics> {
    let filter = CardFilter {
        assignee_id: query.assignee_id,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let total_cards = db::stats::total_cards(&state.pool, filter).await?;
    let average_story_points = db::stats::average_story_points(&state.pool, filter).await?;
    let cards_per_column = db::stats::cards_per_column(&state.pool, filter).await?;
    let cards_per_assignee = db::stats::cards_per_assignee(&state.pool, filter).await?;

    Ok(Json(Statistics {
        total_cards,
        average_story_points,
        cards_per_column,
        cards_per_assignee,
    }))
}
