use std::time::Duration;

use anyhow::{Context, Result};
use storage::dto::statistics::HomeLocation;
use storage::services::geo::Coordinates;

const DEFAULT_HOME_LATITUDE: f64 = 45.0123;
const DEFAULT_HOME_LONGITUDE: f64 = 10.2585;
const DEFAULT_HOME_LABEL: &str = "Ragazzola (PR)";
const DEFAULT_GEOCODER_USER_AGENT: &str = "event-scoreboard/0.1";
const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub home: HomeLocation,
    pub geocoder: Option<GeocoderConfig>,
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let home = HomeLocation {
            label: var("HOME_LABEL").unwrap_or_else(|| DEFAULT_HOME_LABEL.to_string()),
            coordinates: Coordinates::new(
                parse_or(&var, "HOME_LATITUDE", DEFAULT_HOME_LATITUDE)?,
                parse_or(&var, "HOME_LONGITUDE", DEFAULT_HOME_LONGITUDE)?,
            ),
        };

        if !(-90.0..=90.0).contains(&home.coordinates.latitude)
            || !(-180.0..=180.0).contains(&home.coordinates.longitude)
        {
            anyhow::bail!("HOME_LATITUDE/HOME_LONGITUDE out of range");
        }

        let geocoder = match var("GEOCODER_URL").filter(|url| !url.trim().is_empty()) {
            Some(base_url) => Some(GeocoderConfig {
                base_url,
                user_agent: var("GEOCODER_USER_AGENT")
                    .unwrap_or_else(|| DEFAULT_GEOCODER_USER_AGENT.to_string()),
                timeout: Duration::from_secs(parse_or(
                    &var,
                    "GEOCODER_TIMEOUT_SECS",
                    DEFAULT_GEOCODER_TIMEOUT_SECS,
                )?),
            }),
            None => None,
        };

        Ok(Self {
            host: var("HOST").context("Cannot load HOST env variable")?,
            port: var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: var("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?,
            api_keys: var("API_KEYS").unwrap_or_default(),
            home,
            geocoder,
        })
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("HOST", "0.0.0.0"),
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/event"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.home.label, "Ragazzola (PR)");
        assert_eq!(config.home.coordinates, Coordinates::new(45.0123, 10.2585));
        assert!(config.geocoder.is_none());
        assert!(config.api_keys.is_empty());
    }

    #[test]
    fn test_home_and_geocoder_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("HOME_LATITUDE", "44.8"),
            ("HOME_LONGITUDE", "10.33"),
            ("HOME_LABEL", "Parma"),
            ("GEOCODER_URL", "https://nominatim.openstreetmap.org"),
            ("GEOCODER_TIMEOUT_SECS", "2"),
        ]);

        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.home.coordinates, Coordinates::new(44.8, 10.33));
        assert_eq!(config.home.label, "Parma");
        let geocoder = config.geocoder.unwrap();
        assert_eq!(geocoder.timeout, Duration::from_secs(2));
        assert_eq!(geocoder.user_agent, "event-scoreboard/0.1");
    }

    #[test]
    fn test_invalid_values_fail() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("HOME_LATITUDE", "nord"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());

        let mut vars = REQUIRED.to_vec();
        vars.push(("HOME_LATITUDE", "95"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());

        assert!(Config::from_lookup(lookup(&[("HOST", "0.0.0.0")])).is_err());
    }
}
