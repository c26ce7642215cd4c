use axum::{Router, routing::get};

use super::handlers::{get_leaderboard, get_statistics};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .route("/statistics", get(get_statistics))
}
