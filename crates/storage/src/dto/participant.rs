use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::validate_not_blank;
use crate::models::{Participant, Sex};
use crate::services::geo::Coordinates;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub age: Option<u32>,
    pub sex: Sex,
    pub locality: Option<String>,
    pub province: Option<String>,
    pub facility: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub team_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

impl ParticipantResponse {
    pub fn from_participant(participant: Participant, today: NaiveDate) -> Self {
        Self {
            age: participant.age_on(today),
            participant_id: participant.participant_id,
            name: participant.name,
            birth_date: participant.birth_date,
            sex: participant.sex,
            locality: participant.locality,
            province: participant.province,
            facility: participant.facility,
            latitude: participant.latitude,
            longitude: participant.longitude,
            team_id: participant.team_id,
            created_at: participant.created_at,
        }
    }
}

/// Registration form for a participant. Updates replace every field.
///
/// Coordinates are optional: when absent the server tries to geocode
/// `locality`/`province`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_coordinates_pair"))]
pub struct ParticipantRequest {
    #[validate(
        length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: NaiveDate,

    /// M, F or O (also accepts male/female/other and the Italian words)
    #[validate(custom(function = "validate_sex"))]
    pub sex: String,

    #[validate(length(max = 120))]
    pub locality: Option<String>,

    #[validate(length(max = 10))]
    pub province: Option<String>,

    #[validate(length(max = 120))]
    pub facility: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub team_id: Option<Uuid>,
}

impl ParticipantRequest {
    pub fn sex(&self) -> Sex {
        Sex::from_code(&self.sex)
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    /// "locality, province" for the geocoder, if a locality was given
    pub fn location_query(&self) -> Option<String> {
        let locality = self.locality.as_deref().map(str::trim).filter(|l| !l.is_empty())?;

        match self.province.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(province) => Some(format!("{locality}, {province}")),
            None => Some(locality.to_string()),
        }
    }
}

fn validate_birth_date(birth_date: &NaiveDate) -> Result<(), ValidationError> {
    if *birth_date > chrono::Local::now().date_naive() {
        let mut error = ValidationError::new("birth_date_in_future");
        error.message = Some("Birth date cannot be in the future".into());
        return Err(error);
    }
    Ok(())
}

fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    const VALID_SEXES: &[&str] = &[
        "M", "F", "O", "MALE", "FEMALE", "OTHER", "MASCHIO", "FEMMINA", "ALTRO",
    ];

    if VALID_SEXES.contains(&sex.trim().to_uppercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_sex"))
    }
}

fn validate_coordinates_pair(req: &ParticipantRequest) -> Result<(), ValidationError> {
    if req.latitude.is_some() != req.longitude.is_some() {
        let mut error = ValidationError::new("coordinates_pair");
        error.message = Some("Latitude and longitude must be given together".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ParticipantRequest {
        ParticipantRequest {
            name: "Marco Rossi".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2010, 5, 1).unwrap(),
            sex: "M".to_string(),
            locality: Some("Ragazzola".to_string()),
            province: Some("PR".to_string()),
            facility: Some("Il Ranch".to_string()),
            latitude: None,
            longitude: None,
            team_id: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
        assert_eq!(request().sex(), Sex::Male);
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut req = request();
        req.name = " ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let mut req = request();
        req.birth_date = chrono::Local::now().date_naive() + chrono::Duration::days(1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_unknown_sex_rejected() {
        let mut req = request();
        req.sex = "X".to_string();
        assert!(req.validate().is_err());

        req.sex = "altro".to_string();
        assert!(req.validate().is_ok());
        assert_eq!(req.sex(), Sex::Other);
    }

    #[test]
    fn test_half_coordinates_rejected() {
        let mut req = request();
        req.latitude = Some(45.0);
        assert!(req.validate().is_err());

        req.longitude = Some(10.0);
        assert!(req.validate().is_ok());
        assert_eq!(req.coordinates(), Some(Coordinates::new(45.0, 10.0)));
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let mut req = request();
        req.latitude = Some(91.0);
        req.longitude = Some(10.0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_location_query() {
        assert_eq!(request().location_query().as_deref(), Some("Ragazzola, PR"));

        let mut req = request();
        req.province = None;
        assert_eq!(req.location_query().as_deref(), Some("Ragazzola"));

        req.locality = Some(" ".to_string());
        assert_eq!(req.location_query(), None);
    }
}
