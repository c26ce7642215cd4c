use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::statistics::{LeaderboardEntry, StatisticsReport},
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Teams ranked by total points; teams without scores total zero", body = Vec<LeaderboardEntry>)
    ),
    tag = "statistics"
)]
pub async fn get_leaderboard(State(db): State<Database>) -> Result<Response, WebError> {
    let leaderboard = services::get_leaderboard(db.pool()).await?;

    Ok(Json(leaderboard).into_response())
}

#[utoipa::path(
    get,
    path = "/api/statistics",
    responses(
        (status = 200, description = "Leaderboard, youngest and oldest participants, facility counts and farthest participant", body = StatisticsReport)
    ),
    tag = "statistics"
)]
pub async fn get_statistics(State(state): State<AppState>) -> Result<Response, WebError> {
    let today = chrono::Local::now().date_naive();
    let report = services::get_report(state.db.pool(), &state.home, today).await?;

    Ok(Json(report).into_response())
}
