use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::game::ScoreSheetEntry;
use crate::dto::team::TeamGameScore;
use crate::error::{Result, StorageError};
use crate::models::Score;

const UPSERT_SCORE: &str = r#"
    INSERT INTO scores (team_id, game_id, points)
    VALUES ($1, $2, $3)
    ON CONFLICT (team_id, game_id)
    DO UPDATE SET
        points = EXCLUDED.points,
        updated_at = CURRENT_TIMESTAMP
    RETURNING score_id, points, team_id, game_id, created_at, updated_at
"#;

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Set the points of a team in a game, creating the score on first
    /// submission. A missing team or game is reported as not found.
    pub async fn upsert(&self, team_id: Uuid, game_id: Uuid, points: Decimal) -> Result<Score> {
        let score = sqlx::query_as::<_, Score>(UPSERT_SCORE)
            .bind(team_id)
            .bind(game_id)
            .bind(points)
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_foreign_key_violation())?;

        Ok(score)
    }

    /// Upsert several teams' points for one game; all or nothing
    pub async fn upsert_many(&self, game_id: Uuid, points: &[(Uuid, Decimal)]) -> Result<Vec<Score>> {
        let mut tx: Transaction<'_, Postgres> = self.pool.begin().await?;
        let mut scores = Vec::with_capacity(points.len());

        for &(team_id, value) in points {
            let score = sqlx::query_as::<_, Score>(UPSERT_SCORE)
                .bind(team_id)
                .bind(game_id)
                .bind(value)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StorageError::from(e).on_foreign_key_violation())?;
            scores.push(score);
        }

        tx.commit().await?;
        Ok(scores)
    }

    /// Every team, by name, with its points in `game_id` if any
    pub async fn score_sheet(&self, game_id: Uuid) -> Result<Vec<ScoreSheetEntry>> {
        let entries = sqlx::query_as::<_, ScoreSheetEntry>(
            r#"
            SELECT t.team_id, t.name AS team_name, s.score_id, s.points
            FROM teams t
            LEFT JOIN scores s ON s.team_id = t.team_id AND s.game_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(game_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<TeamGameScore>> {
        let scores = sqlx::query_as::<_, TeamGameScore>(
            r#"
            SELECT s.score_id, g.game_id, g.name AS game_name, s.points
            FROM scores s
            JOIN games g ON g.game_id = s.game_id
            WHERE s.team_id = $1
            ORDER BY g.created_at, g.name
            "#,
        )
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM scores WHERE score_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
