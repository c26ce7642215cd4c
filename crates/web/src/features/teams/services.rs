use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    dto::{
        participant::ParticipantResponse,
        team::{CreateTeamRequest, TeamDetailResponse, UpdateTeamRequest},
    },
    error::Result,
    models::Team,
    repository::{participant::ParticipantRepository, score::ScoreRepository, team::TeamRepository},
};
use uuid::Uuid;

/// List all teams
pub async fn list_teams(pool: &PgPool) -> Result<Vec<Team>> {
    let repo = TeamRepository::new(pool);
    repo.list().await
}

/// Team with its participants and per-game points
pub async fn get_team_detailed(pool: &PgPool, id: Uuid, today: NaiveDate) -> Result<TeamDetailResponse> {
    let team = TeamRepository::new(pool).find_by_id(id).await?;
    let participants = ParticipantRepository::new(pool).list_by_team(id).await?;
    let scores = ScoreRepository::new(pool).list_by_team(id).await?;

    let total_points = scores.iter().map(|s| s.points).sum::<Decimal>();

    Ok(TeamDetailResponse {
        team_id: team.team_id,
        name: team.name,
        facility: team.facility,
        created_at: team.created_at,
        participants: participants
            .into_iter()
            .map(|p| ParticipantResponse::from_participant(p, today))
            .collect(),
        scores,
        total_points,
    })
}

/// Create a new team
pub async fn create_team(pool: &PgPool, request: &CreateTeamRequest) -> Result<Team> {
    let repo = TeamRepository::new(pool);
    repo.create(request).await
}

/// Update a team
pub async fn update_team(pool: &PgPool, id: Uuid, request: &UpdateTeamRequest) -> Result<Team> {
    let repo = TeamRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a team and its scores
pub async fn delete_team(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = TeamRepository::new(pool);
    repo.delete(id).await
}
