use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::game::{CreateGameRequest, GameDetailResponse, GameResponse, UpdateGameRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/games",
    responses(
        (status = 200, description = "List all games successfully", body = Vec<GameResponse>)
    ),
    tag = "games"
)]
pub async fn list_games(State(db): State<Database>) -> Result<Json<Vec<GameResponse>>, WebError> {
    let games = services::list_games(db.pool()).await?;

    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/games/{game_id}",
    params(
        ("game_id" = Uuid, Path, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Game with the points of every team", body = GameDetailResponse),
        (status = 404, description = "Game not found")
    ),
    tag = "games"
)]
pub async fn get_game(
    State(db): State<Database>,
    Path(game_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let game = services::get_game_detailed(db.pool(), game_id).await?;

    Ok(Json(game).into_response())
}

#[utoipa::path(
    post,
    path = "/api/games",
    request_body = CreateGameRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Game created successfully", body = GameResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Game name already taken")
    ),
    tag = "games"
)]
pub async fn create_game(
    State(db): State<Database>,
    Json(req): Json<CreateGameRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let game = services::create_game(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(GameResponse::from(game))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/games/{game_id}",
    params(
        ("game_id" = Uuid, Path, description = "Game ID")
    ),
    request_body = UpdateGameRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Game updated successfully", body = GameResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Game not found"),
        (status = 409, description = "Game name already taken")
    ),
    tag = "games"
)]
pub async fn update_game(
    State(db): State<Database>,
    Path(game_id): Path<Uuid>,
    Json(update_req): Json<UpdateGameRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_game(db.pool(), game_id, &update_req).await?;

    Ok(Json(GameResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/games/{game_id}",
    params(
        ("game_id" = Uuid, Path, description = "Game ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Game and its scores deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Game not found")
    ),
    tag = "games"
)]
pub async fn delete_game(
    State(db): State<Database>,
    Path(game_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_game(db.pool(), game_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
