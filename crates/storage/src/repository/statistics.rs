use sqlx::PgPool;

use super::participant::{PARTICIPANT_COLUMNS, ParticipantRow};
use crate::error::Result;
use crate::models::{Game, Participant, Score, Team};
use crate::services::statistics::Snapshot;

pub struct StatisticsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatisticsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read all four tables from one consistent snapshot
    pub async fn load_snapshot(&self) -> Result<Snapshot> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let teams = sqlx::query_as::<_, Team>(
            "SELECT team_id, name, facility, created_at FROM teams ORDER BY name",
        )
        .fetch_all(&mut *tx)
        .await?;

        let games = sqlx::query_as::<_, Game>(
            "SELECT game_id, name, created_at FROM games ORDER BY created_at, name",
        )
        .fetch_all(&mut *tx)
        .await?;

        let participants_sql = format!("SELECT {PARTICIPANT_COLUMNS} FROM participants");
        let participants = sqlx::query_as::<_, ParticipantRow>(&participants_sql)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(Participant::from)
            .collect();

        let scores = sqlx::query_as::<_, Score>(
            "SELECT score_id, points, team_id, game_id, created_at, updated_at FROM scores",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Snapshot {
            teams,
            games,
            participants,
            scores,
        })
    }
}
