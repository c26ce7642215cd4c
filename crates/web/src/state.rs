use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;
use storage::dto::statistics::HomeLocation;

use crate::geocoding::Geocoder;

/// Everything handlers need, passed explicitly through axum state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub geocoder: Arc<dyn Geocoder>,
    pub home: HomeLocation,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
