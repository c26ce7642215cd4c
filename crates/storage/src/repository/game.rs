use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::game::{CreateGameRequest, UpdateGameRequest};
use crate::error::{Result, StorageError};
use crate::models::Game;

const DUPLICATE_NAME: &str = "A game with this name already exists";

pub struct GameRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GameRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Game>> {
        let games = sqlx::query_as::<_, Game>(
            r#"
            SELECT game_id, name, created_at
            FROM games
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(games)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Game> {
        sqlx::query_as::<_, Game>(
            r#"
            SELECT game_id, name, created_at
            FROM games
            WHERE game_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateGameRequest) -> Result<Game> {
        let game = sqlx::query_as::<_, Game>(
            r#"
            INSERT INTO games (name)
            VALUES ($1)
            RETURNING game_id, name, created_at
            "#,
        )
        .bind(req.name.trim())
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(DUPLICATE_NAME))?;

        Ok(game)
    }

    pub async fn update(&self, existing: &Game, req: &UpdateGameRequest) -> Result<Game> {
        let name = req.name.as_deref().map(str::trim).unwrap_or(existing.name.as_str());

        sqlx::query_as::<_, Game>(
            r#"
            UPDATE games
            SET name = $2
            WHERE game_id = $1
            RETURNING game_id, name, created_at
            "#,
        )
        .bind(existing.game_id)
        .bind(name)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(DUPLICATE_NAME))?
        .ok_or(StorageError::NotFound)
    }

    /// Delete a game together with every score recorded for it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM games WHERE game_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
