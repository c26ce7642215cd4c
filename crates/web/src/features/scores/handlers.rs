use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::score::{BulkScoreRequest, ScoreResponse, UpsertScoreRequest},
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    put,
    path = "/api/games/{game_id}/scores/{team_id}",
    params(
        ("game_id" = Uuid, Path, description = "Game ID"),
        ("team_id" = Uuid, Path, description = "Team ID")
    ),
    request_body = UpsertScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score stored; an existing score for the team is replaced", body = ScoreResponse),
        (status = 400, description = "Points are not a number"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Game or team not found")
    ),
    tag = "scores"
)]
pub async fn upsert_score(
    State(db): State<Database>,
    Path((game_id, team_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpsertScoreRequest>,
) -> Result<Response, WebError> {
    let points = req.points.to_decimal()?;

    let score = services::upsert_score(db.pool(), game_id, team_id, points).await?;

    Ok(Json(ScoreResponse::from(score)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/games/{game_id}/scores",
    params(
        ("game_id" = Uuid, Path, description = "Game ID")
    ),
    request_body = BulkScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Scores stored; blank values were skipped", body = Vec<ScoreResponse>),
        (status = 400, description = "At least one value is not a number; nothing was stored"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Game or one of the teams not found")
    ),
    tag = "scores"
)]
pub async fn submit_game_scores(
    State(db): State<Database>,
    Path(game_id): Path<Uuid>,
    Json(req): Json<BulkScoreRequest>,
) -> Result<Response, WebError> {
    let points = req.parse().map_err(|(team_id, e)| {
        WebError::BadRequest(format!("Invalid points for team {team_id}: {e}"))
    })?;

    let scores = services::submit_game_scores(db.pool(), game_id, &points).await?;

    let response: Vec<ScoreResponse> = scores.into_iter().map(ScoreResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/scores/{score_id}",
    params(
        ("score_id" = Uuid, Path, description = "Score ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn delete_score(
    State(db): State<Database>,
    Path(score_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_score(db.pool(), score_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
