use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::team::{CreateTeamRequest, UpdateTeamRequest};
use crate::error::{Result, StorageError};
use crate::models::Team;

const DUPLICATE_NAME: &str = "A team with this name already exists";

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all teams by name
    pub async fn list(&self) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, name, facility, created_at
            FROM teams
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Team> {
        sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, name, facility, created_at
            FROM teams
            WHERE team_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, facility)
            VALUES ($1, $2)
            RETURNING team_id, name, facility, created_at
            "#,
        )
        .bind(req.name.trim())
        .bind(req.facility())
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(DUPLICATE_NAME))?;

        Ok(team)
    }

    pub async fn update(&self, existing: &Team, req: &UpdateTeamRequest) -> Result<Team> {
        let name = req.name.as_deref().map(str::trim).unwrap_or(existing.name.as_str());
        let facility = req.facility_or(existing.facility.as_deref());

        sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = $2,
                facility = $3
            WHERE team_id = $1
            RETURNING team_id, name, facility, created_at
            "#,
        )
        .bind(existing.team_id)
        .bind(name)
        .bind(facility)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(DUPLICATE_NAME))?
        .ok_or(StorageError::NotFound)
    }

    /// Delete a team. Its scores go with it; its participants stay, unaffiliated.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM teams WHERE team_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::Database;
    use crate::dto::game::CreateGameRequest;
    use crate::dto::participant::ParticipantRequest;
    use crate::repository::game::GameRepository;
    use crate::repository::participant::ParticipantRepository;
    use crate::repository::score::ScoreRepository;

    fn create_request(name: &str, facility: Option<&str>) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
            facility: facility.map(str::to_string),
        }
    }

    fn participant(team_id: Uuid) -> ParticipantRequest {
        ParticipantRequest {
            name: "Marco Rossi".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2010, 5, 1).unwrap(),
            sex: "M".to_string(),
            locality: None,
            province: None,
            facility: None,
            latitude: None,
            longitude: None,
            team_id: Some(team_id),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_team_cascades_scores_and_frees_participants(pool: PgPool) {
        let db = Database::from_pool(pool);
        let teams = TeamRepository::new(db.pool());
        let team = teams.create(&create_request("Cavalieri", None)).await.unwrap();
        let game = GameRepository::new(db.pool())
            .create(&CreateGameRequest {
                name: "Tiro alla fune".to_string(),
            })
            .await
            .unwrap();
        ScoreRepository::new(db.pool())
            .upsert(team.team_id, game.game_id, Decimal::from(4))
            .await
            .unwrap();
        let participants = ParticipantRepository::new(db.pool());
        let member = participants
            .create(&participant(team.team_id), None)
            .await
            .unwrap();

        teams.delete(team.team_id).await.unwrap();

        let scores: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scores WHERE team_id = $1")
            .bind(team.team_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(scores, 0);

        let member = participants.find_by_id(member.participant_id).await.unwrap();
        assert_eq!(member.team_id, None);

        assert!(matches!(
            teams.delete(team.team_id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_name_is_conflict(pool: PgPool) {
        let db = Database::from_pool(pool);
        let teams = TeamRepository::new(db.pool());
        teams.create(&create_request("Cavalieri", None)).await.unwrap();

        let result = teams.create(&create_request(" Cavalieri ", None)).await;

        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_can_clear_facility(pool: PgPool) {
        let db = Database::from_pool(pool);
        let teams = TeamRepository::new(db.pool());
        let team = teams
            .create(&create_request("Cavalieri", Some("Il Ranch")))
            .await
            .unwrap();

        let renamed = teams
            .update(
                &team,
                &UpdateTeamRequest {
                    name: Some("Cavalieri del Po".to_string()),
                    facility: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.facility.as_deref(), Some("Il Ranch"));

        let cleared = teams
            .update(
                &renamed,
                &UpdateTeamRequest {
                    name: None,
                    facility: Some(String::new()),
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.name, "Cavalieri del Po");
        assert_eq!(cleared.facility, None);
    }
}
