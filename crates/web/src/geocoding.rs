//! Turning a free-text locality into coordinates.
//!
//! Lookups are best effort: a failed lookup never blocks saving a
//! participant, it just leaves the coordinates empty.

use async_trait::async_trait;
use serde::Deserialize;
use storage::services::geo::Coordinates;
use thiserror::Error;

use crate::config::GeocoderConfig;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected geocoder response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the place is unknown
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeocodingError>;
}

/// Used when no geocoder is configured
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<Coordinates>, GeocodingError> {
        Ok(None)
    }
}

/// Client for a Nominatim-compatible `/search` endpoint
pub struct NominatimGeocoder {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodingError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeocodingError> {
        let url = format!("{}/search", self.base_url);

        let places = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<NominatimPlace>>()
            .await?;

        first_coordinates(&places)
    }
}

fn first_coordinates(places: &[NominatimPlace]) -> Result<Option<Coordinates>, GeocodingError> {
    let Some(place) = places.first() else {
        return Ok(None);
    };

    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| GeocodingError::InvalidResponse(format!("bad coordinate '{value}'")))
    };

    let coordinates = Coordinates::new(parse(&place.lat)?, parse(&place.lon)?);
    if !(-90.0..=90.0).contains(&coordinates.latitude)
        || !(-180.0..=180.0).contains(&coordinates.longitude)
    {
        return Err(GeocodingError::InvalidResponse(format!(
            "coordinates out of range: {}, {}",
            coordinates.latitude, coordinates.longitude
        )));
    }

    Ok(Some(coordinates))
}

/// Geocode `query`, logging and swallowing any failure
pub async fn lookup_or_none(geocoder: &dyn Geocoder, query: &str) -> Option<Coordinates> {
    match geocoder.geocode(query).await {
        Ok(Some(coordinates)) => Some(coordinates),
        Ok(None) => {
            tracing::warn!(query, "No geocoding match, saving without coordinates");
            None
        }
        Err(e) => {
            tracing::warn!(query, error = %e, "Geocoding unavailable, saving without coordinates");
            None
        }
    }
}
