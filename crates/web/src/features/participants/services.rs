use sqlx::PgPool;
use storage::{
    dto::participant::ParticipantRequest,
    error::Result,
    models::Participant,
    repository::{participant::ParticipantRepository, team::TeamRepository},
    services::geo::Coordinates,
};
use uuid::Uuid;

use crate::geocoding::{self, Geocoder};

/// List all participants
pub async fn list_participants(pool: &PgPool) -> Result<Vec<Participant>> {
    let repo = ParticipantRepository::new(pool);
    repo.list().await
}

/// Get a participant by ID
pub async fn get_participant(pool: &PgPool, id: Uuid) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.find_by_id(id).await
}

/// Register a participant, geocoding the locality when no coordinates were sent
pub async fn create_participant(
    pool: &PgPool,
    geocoder: &dyn Geocoder,
    request: &ParticipantRequest,
) -> Result<Participant> {
    ensure_team_exists(pool, request.team_id).await?;

    let coordinates = resolve_coordinates(geocoder, request).await;

    let repo = ParticipantRepository::new(pool);
    repo.create(request, coordinates).await
}

/// Replace a participant's data
pub async fn update_participant(
    pool: &PgPool,
    geocoder: &dyn Geocoder,
    id: Uuid,
    request: &ParticipantRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    ensure_team_exists(pool, request.team_id).await?;

    let coordinates = match request.coordinates() {
        Some(coordinates) => Some(coordinates),
        // same place as before, no need to ask the geocoder again
        None if same_location(&existing, request) && existing.coordinates().is_some() => {
            existing.coordinates()
        }
        None => resolve_coordinates(geocoder, request).await,
    };

    repo.update(id, request, coordinates).await
}

/// Delete a participant
pub async fn delete_participant(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = ParticipantRepository::new(pool);
    repo.delete(id).await
}

async fn ensure_team_exists(pool: &PgPool, team_id: Option<Uuid>) -> Result<()> {
    if let Some(team_id) = team_id {
        TeamRepository::new(pool).find_by_id(team_id).await?;
    }
    Ok(())
}

/// Coordinates sent by the client win; otherwise ask the geocoder
pub async fn resolve_coordinates(
    geocoder: &dyn Geocoder,
    request: &ParticipantRequest,
) -> Option<Coordinates> {
    if let Some(coordinates) = request.coordinates() {
        return Some(coordinates);
    }

    let query = request.location_query()?;
    geocoding::lookup_or_none(geocoder, &query).await
}

fn same_location(existing: &Participant, request: &ParticipantRequest) -> bool {
    let normalize = |value: Option<&str>| value.map(str::trim).unwrap_or_default().to_lowercase();

    normalize(existing.locality.as_deref()) == normalize(request.locality.as_deref())
        && normalize(existing.province.as_deref()) == normalize(request.province.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::models::Sex;

    use crate::geocoding::GeocodingError;

    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _query: &str) -> std::result::Result<Option<Coordinates>, GeocodingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(Coordinates::new(44.98, 10.22)))
        }
    }

    fn request() -> ParticipantRequest {
        ParticipantRequest {
            name: "Sara".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2012, 3, 1).unwrap(),
            sex: "F".to_string(),
            locality: Some("Ragazzola".to_string()),
            province: Some("PR".to_string()),
            facility: None,
            latitude: None,
            longitude: None,
            team_id: None,
        }
    }

    #[tokio::test]
    async fn test_client_coordinates_skip_geocoder() {
        let geocoder = CountingGeocoder {
            calls: AtomicUsize::new(0),
        };
        let mut req = request();
        req.latitude = Some(45.5);
        req.longitude = Some(9.1);

        let coordinates = resolve_coordinates(&geocoder, &req).await;

        assert_eq!(coordinates, Some(Coordinates::new(45.5, 9.1)));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_locality_is_geocoded() {
        let geocoder = CountingGeocoder {
            calls: AtomicUsize::new(0),
        };

        let coordinates = resolve_coordinates(&geocoder, &request()).await;

        assert_eq!(coordinates, Some(Coordinates::new(44.98, 10.22)));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_locality_no_lookup() {
        let geocoder = CountingGeocoder {
            calls: AtomicUsize::new(0),
        };
        let mut req = request();
        req.locality = None;

        assert!(resolve_coordinates(&geocoder, &req).await.is_none());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_same_location_ignores_case_and_spaces() {
        let existing = Participant {
            participant_id: Uuid::new_v4(),
            name: "Sara".to_string(),
            birth_date: None,
            sex: Sex::Female,
            locality: Some("ragazzola ".to_string()),
            province: Some("pr".to_string()),
            facility: None,
            latitude: Some(44.98),
            longitude: Some(10.22),
            team_id: None,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };

        assert!(same_location(&existing, &request()));

        let mut moved = request();
        moved.locality = Some("Parma".to_string());
        assert!(!same_location(&existing, &moved));
    }
}
