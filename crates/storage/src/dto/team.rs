use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::participant::ParticipantResponse;
use super::validate_not_blank;
use crate::models::Team;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub name: String,
    pub facility: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Team with its members and the points it scored in each game
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamDetailResponse {
    pub team_id: Uuid,
    pub name: String,
    pub facility: Option<String>,
    pub created_at: NaiveDateTime,
    pub participants: Vec<ParticipantResponse>,
    pub scores: Vec<TeamGameScore>,
    pub total_points: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamGameScore {
    pub score_id: Uuid,
    pub game_id: Uuid,
    pub game_name: String,
    pub points: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(
        length(min = 1, max = 100, message = "Team name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 120))]
    pub facility: Option<String>,
}

/// Partial update. Absent fields keep their value; an empty `facility`
/// clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(length(max = 120))]
    pub facility: Option<String>,
}

impl CreateTeamRequest {
    pub fn facility(&self) -> Option<&str> {
        self.facility.as_deref().map(str::trim).filter(|f| !f.is_empty())
    }
}

impl UpdateTeamRequest {
    /// The facility to store after this update
    pub fn facility_or<'a>(&'a self, existing: Option<&'a str>) -> Option<&'a str> {
        match self.facility.as_deref().map(str::trim) {
            Some("") => None,
            Some(facility) => Some(facility),
            None => existing,
        }
    }
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name,
            facility: team.facility,
            created_at: team.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_name_required() {
        let req = CreateTeamRequest {
            name: String::new(),
            facility: None,
        };
        assert!(req.validate().is_err());

        let req = CreateTeamRequest {
            name: "Cavalieri".to_string(),
            facility: Some("Maneggio del Po".to_string()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_team_update_rejects_blank_name() {
        let req = UpdateTeamRequest {
            name: Some(String::new()),
            facility: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_whitespace_team_name_rejected() {
        let req = CreateTeamRequest {
            name: "   ".to_string(),
            facility: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateTeamRequest {
            name: Some(" \t ".to_string()),
            facility: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateTeamRequest {
            name: None,
            facility: Some(String::new()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_facility() {
        let keep = UpdateTeamRequest {
            name: None,
            facility: None,
        };
        assert_eq!(keep.facility_or(Some("Il Ranch")), Some("Il Ranch"));

        let clear = UpdateTeamRequest {
            name: None,
            facility: Some("  ".to_string()),
        };
        assert_eq!(clear.facility_or(Some("Il Ranch")), None);

        let change = UpdateTeamRequest {
            name: None,
            facility: Some(" Maneggio del Po ".to_string()),
        };
        assert_eq!(change.facility_or(Some("Il Ranch")), Some("Maneggio del Po"));
    }

    #[test]
    fn test_blank_create_facility_is_none() {
        let req = CreateTeamRequest {
            name: "Cavalieri".to_string(),
            facility: Some(" ".to_string()),
        };
        assert_eq!(req.facility(), None);
    }
}
