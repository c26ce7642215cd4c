use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Participant, Sex};
use crate::services::geo::Coordinates;

/// Reference point distances are measured from
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeLocation {
    pub label: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub team_id: Uuid,
    pub team_name: String,
    pub facility: Option<String>,
    pub total: Decimal,
    pub scores_recorded: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantSummary {
    pub participant_id: Uuid,
    pub name: String,
    pub sex: Sex,
    pub birth_date: Option<NaiveDate>,
    pub age: Option<u32>,
    pub facility: Option<String>,
    pub team_id: Option<Uuid>,
}

impl ParticipantSummary {
    pub fn from_participant(participant: &Participant, today: NaiveDate) -> Self {
        Self {
            participant_id: participant.participant_id,
            name: participant.name.clone(),
            sex: participant.sex,
            birth_date: participant.birth_date,
            age: participant.age_on(today),
            facility: participant.facility_name().map(String::from),
            team_id: participant.team_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DemographicExtremes {
    pub youngest_male: Option<ParticipantSummary>,
    pub youngest_female: Option<ParticipantSummary>,
    pub oldest: Option<ParticipantSummary>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacilityCount {
    pub facility: String,
    pub participants: i64,
}

#[derive(Debug, Clone, Default)]
pub struct FacilityPopularity {
    pub counts: BTreeMap<String, i64>,
    pub top: Option<FacilityCount>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FarthestParticipant {
    pub participant_id: Uuid,
    pub name: String,
    pub facility: Option<String>,
    pub locality: Option<String>,
    pub province: Option<String>,
    pub distance_km: f64,
}

/// Everything the home page shows
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatisticsReport {
    pub home: HomeLocation,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub youngest_male: Option<ParticipantSummary>,
    pub youngest_female: Option<ParticipantSummary>,
    pub oldest: Option<ParticipantSummary>,
    pub facility_counts: BTreeMap<String, i64>,
    pub top_facility: Option<FacilityCount>,
    pub farthest: Option<FarthestParticipant>,
}
