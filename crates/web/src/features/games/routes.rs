use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{create_game, delete_game, get_game, list_games, update_game};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/games", post(create_game))
        .route("/games/:game_id", put(update_game))
        .route("/games/:game_id", delete(delete_game))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/games", get(list_games))
        .route("/games/:game_id", get(get_game))
        .merge(protected)
}
