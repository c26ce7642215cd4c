use axum::Router;

use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

pub mod games;
pub mod participants;
pub mod scores;
pub mod statistics;
pub mod teams;

/// Every `/api` route; mutating ones require an API key
pub fn api_routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .merge(teams::routes::routes(api_keys.clone()))
        .merge(games::routes::routes(api_keys.clone()))
        .merge(scores::routes::routes(api_keys.clone()))
        .merge(participants::routes::routes(api_keys))
        .merge(statistics::routes::routes())
}
