use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{create_team, delete_team, get_team, list_teams, update_team};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/teams", post(create_team))
        .route("/teams/:team_id", put(update_team))
        .route("/teams/:team_id", delete(delete_team))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/teams", get(list_teams))
        .route("/teams/:team_id", get(get_team))
        .merge(protected)
}
