use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod geocoding;
mod middleware;
mod state;

use config::Config;
use error::WebError;
use geocoding::{DisabledGeocoder, Geocoder, NominatimGeocoder};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::teams::handlers::list_teams,
        features::teams::handlers::get_team,
        features::teams::handlers::create_team,
        features::teams::handlers::update_team,
        features::teams::handlers::delete_team,
        features::games::handlers::list_games,
        features::games::handlers::get_game,
        features::games::handlers::create_game,
        features::games::handlers::update_game,
        features::games::handlers::delete_game,
        features::scores::handlers::upsert_score,
        features::scores::handlers::submit_game_scores,
        features::scores::handlers::delete_score,
        features::participants::handlers::list_participants,
        features::participants::handlers::get_participant,
        features::participants::handlers::create_participant,
        features::participants::handlers::update_participant,
        features::participants::handlers::delete_participant,
        features::statistics::handlers::get_leaderboard,
        features::statistics::handlers::get_statistics,
    ),
    components(
        schemas(
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::team::TeamResponse,
            storage::dto::team::TeamDetailResponse,
            storage::dto::team::TeamGameScore,
            storage::dto::game::CreateGameRequest,
            storage::dto::game::UpdateGameRequest,
            storage::dto::game::GameResponse,
            storage::dto::game::GameDetailResponse,
            storage::dto::game::ScoreSheetEntry,
            storage::dto::score::UpsertScoreRequest,
            storage::dto::score::BulkScoreRequest,
            storage::dto::score::TeamPoints,
            storage::dto::score::ScoreResponse,
            storage::dto::participant::ParticipantRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::statistics::StatisticsReport,
            storage::dto::statistics::LeaderboardEntry,
            storage::dto::statistics::ParticipantSummary,
            storage::dto::statistics::FacilityCount,
            storage::dto::statistics::FarthestParticipant,
            storage::dto::statistics::HomeLocation,
            storage::services::geo::Coordinates,
            storage::models::Sex,
        )
    ),
    tags(
        (name = "teams", description = "Teams (squadre)"),
        (name = "games", description = "Games (giochi)"),
        (name = "scores", description = "Points of a team in a game"),
        (name = "participants", description = "Participants (partecipanti)"),
        (name = "statistics", description = "Leaderboard and event statistics"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting event scoreboard API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        home = %config.home.label,
        latitude = config.home.coordinates.latitude,
        longitude = config.home.coordinates.longitude,
        "Configuration loaded successfully"
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let geocoder: Arc<dyn Geocoder> = match &config.geocoder {
        Some(geocoder_config) => {
            tracing::info!("Geocoding participants via {}", geocoder_config.base_url);
            Arc::new(
                NominatimGeocoder::new(geocoder_config)
                    .context("Failed to build geocoding client")?,
            )
        }
        None => {
            tracing::info!("GEOCODER_URL not set, participants keep only the coordinates they are sent");
            Arc::new(DisabledGeocoder)
        }
    };

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every write request will be rejected");
    }

    let state = AppState {
        db,
        geocoder,
        home: config.home.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .nest("/api", features::api_routes(api_keys))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(|| async { WebError::NotFound })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
