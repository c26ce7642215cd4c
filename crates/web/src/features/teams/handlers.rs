use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::team::{CreateTeamRequest, TeamDetailResponse, TeamResponse, UpdateTeamRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/teams",
    responses(
        (status = 200, description = "List all teams successfully", body = Vec<TeamResponse>)
    ),
    tag = "teams"
)]
pub async fn list_teams(State(db): State<Database>) -> Result<Json<Vec<TeamResponse>>, WebError> {
    let teams = services::list_teams(db.pool()).await?;

    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = Uuid, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team with its participants and scores", body = TeamDetailResponse),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let today = chrono::Local::now().date_naive();
    let team = services::get_team_detailed(db.pool(), team_id, today).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Team created successfully", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Team name already taken")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(db): State<Database>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::create_team(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = Uuid, Path, description = "Team ID")
    ),
    request_body = UpdateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team updated successfully", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Team name already taken")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
    Json(update_req): Json<UpdateTeamRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_team(db.pool(), team_id, &update_req).await?;

    Ok(Json(TeamResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = Uuid, Path, description = "Team ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Team and its scores deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_team(db.pool(), team_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
