use axum::{
    Router, middleware,
    routing::{delete, post, put},
};

use super::handlers::{delete_score, submit_game_scores, upsert_score};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/games/:game_id/scores", post(submit_game_scores))
        .route("/games/:game_id/scores/:team_id", put(upsert_score))
        .route("/scores/:score_id", delete(delete_score))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
