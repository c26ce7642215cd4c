use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::services::geo::Coordinates;

/// Sex of a participant, normalized from whatever the form or a legacy row
/// carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Other,
}

impl Sex {
    /// Single-letter code stored in the `participants.sex` column
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }

    /// Accepts codes and words in English or Italian. Anything unrecognized
    /// is `Other`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "M" | "MALE" | "MASCHIO" => Self::Male,
            "F" | "FEMALE" | "FEMMINA" => Self::Female,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub participant_id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub sex: Sex,
    pub locality: Option<String>,
    pub province: Option<String>,
    pub facility: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub team_id: Option<Uuid>,
    pub created_at: chrono::NaiveDateTime,
}

impl Participant {
    /// Registered location, only when both halves are known
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Completed years on `today`
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        if birth > today {
            return None;
        }

        let mut years = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }

        u32::try_from(years).ok()
    }

    /// Non-blank facility name
    pub fn facility_name(&self) -> Option<&str> {
        self.facility
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(birth_date: Option<NaiveDate>) -> Participant {
        Participant {
            participant_id: Uuid::new_v4(),
            name: "Giulia".to_string(),
            birth_date,
            sex: Sex::Female,
            locality: None,
            province: None,
            facility: None,
            latitude: None,
            longitude: None,
            team_id: None,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sex_from_code_variants() {
        assert_eq!(Sex::from_code("M"), Sex::Male);
        assert_eq!(Sex::from_code("maschio"), Sex::Male);
        assert_eq!(Sex::from_code(" f "), Sex::Female);
        assert_eq!(Sex::from_code("Female"), Sex::Female);
        assert_eq!(Sex::from_code("Altro"), Sex::Other);
        assert_eq!(Sex::from_code(""), Sex::Other);
    }

    #[test]
    fn test_sex_code_is_stable() {
        for sex in [Sex::Male, Sex::Female, Sex::Other] {
            assert_eq!(Sex::from_code(sex.as_code()), sex);
        }
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let p = participant(Some(date(2010, 5, 1)));
        assert_eq!(p.age_on(date(2025, 4, 30)), Some(14));
        assert_eq!(p.age_on(date(2025, 5, 1)), Some(15));
        assert_eq!(p.age_on(date(2009, 1, 1)), None);
        assert_eq!(participant(None).age_on(date(2025, 1, 1)), None);
    }

    #[test]
    fn test_coordinates_require_both_values() {
        let mut p = participant(None);
        p.latitude = Some(45.0);
        assert!(p.coordinates().is_none());

        p.longitude = Some(10.0);
        assert_eq!(p.coordinates(), Some(Coordinates::new(45.0, 10.0)));
    }

    #[test]
    fn test_blank_facility_is_ignored() {
        let mut p = participant(None);
        p.facility = Some("   ".to_string());
        assert_eq!(p.facility_name(), None);

        p.facility = Some(" Il Ranch ".to_string());
        assert_eq!(p.facility_name(), Some("Il Ranch"));
    }
}
