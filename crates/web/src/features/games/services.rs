use sqlx::PgPool;
use storage::{
    dto::game::{CreateGameRequest, GameDetailResponse, UpdateGameRequest},
    error::Result,
    models::Game,
    repository::{game::GameRepository, score::ScoreRepository},
};
use uuid::Uuid;

/// List all games
pub async fn list_games(pool: &PgPool) -> Result<Vec<Game>> {
    let repo = GameRepository::new(pool);
    repo.list().await
}

/// Game with the score sheet of every team
pub async fn get_game_detailed(pool: &PgPool, id: Uuid) -> Result<GameDetailResponse> {
    let game = GameRepository::new(pool).find_by_id(id).await?;
    let scores = ScoreRepository::new(pool).score_sheet(id).await?;

    Ok(GameDetailResponse {
        game_id: game.game_id,
        name: game.name,
        created_at: game.created_at,
        scores,
    })
}

/// Create a new game
pub async fn create_game(pool: &PgPool, request: &CreateGameRequest) -> Result<Game> {
    let repo = GameRepository::new(pool);
    repo.create(request).await
}

/// Rename a game
pub async fn update_game(pool: &PgPool, id: Uuid, request: &UpdateGameRequest) -> Result<Game> {
    let repo = GameRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a game and its scores
pub async fn delete_game(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = GameRepository::new(pool);
    repo.delete(id).await
}
