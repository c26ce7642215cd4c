use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_participant, delete_participant, get_participant, list_participants,
    update_participant,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/participants", post(create_participant))
        .route("/participants/:participant_id", put(update_participant))
        .route("/participants/:participant_id", delete(delete_participant))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/participants", get(list_participants))
        .route("/participants/:participant_id", get(get_participant))
        .merge(protected)
}
