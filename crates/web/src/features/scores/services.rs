use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    error::Result,
    models::Score,
    repository::{game::GameRepository, score::ScoreRepository, team::TeamRepository},
};
use uuid::Uuid;

/// Record the points of one team in one game, replacing any previous value
pub async fn upsert_score(pool: &PgPool, game_id: Uuid, team_id: Uuid, points: Decimal) -> Result<Score> {
    GameRepository::new(pool).find_by_id(game_id).await?;
    TeamRepository::new(pool).find_by_id(team_id).await?;

    ScoreRepository::new(pool)
        .upsert(team_id, game_id, points)
        .await
}

/// Record several teams' points for a game in one transaction
pub async fn submit_game_scores(
    pool: &PgPool,
    game_id: Uuid,
    points: &[(Uuid, Decimal)],
) -> Result<Vec<Score>> {
    GameRepository::new(pool).find_by_id(game_id).await?;

    ScoreRepository::new(pool).upsert_many(game_id, points).await
}

/// Delete a single score
pub async fn delete_score(pool: &PgPool, score_id: Uuid) -> Result<()> {
    ScoreRepository::new(pool).delete(score_id).await
}
