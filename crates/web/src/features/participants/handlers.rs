use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::participant::{ParticipantRequest, ParticipantResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants",
    responses(
        (status = 200, description = "List all participants successfully", body = Vec<ParticipantResponse>)
    ),
    tag = "participants"
)]
pub async fn list_participants(State(db): State<Database>) -> Result<Response, WebError> {
    let today = chrono::Local::now().date_naive();
    let participants = services::list_participants(db.pool()).await?;

    let response: Vec<ParticipantResponse> = participants
        .into_iter()
        .map(|p| ParticipantResponse::from_participant(p, today))
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{participant_id}",
    params(
        ("participant_id" = Uuid, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "Participant found", body = ParticipantResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    Path(participant_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let today = chrono::Local::now().date_naive();
    let participant = services::get_participant(db.pool(), participant_id).await?;

    Ok(Json(ParticipantResponse::from_participant(participant, today)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = ParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Participant created successfully", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "participants"
)]
pub async fn create_participant(
    State(state): State<AppState>,
    Json(req): Json<ParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let today = chrono::Local::now().date_naive();
    let participant =
        services::create_participant(state.db.pool(), state.geocoder.as_ref(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ParticipantResponse::from_participant(participant, today)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{participant_id}",
    params(
        ("participant_id" = Uuid, Path, description = "Participant ID")
    ),
    request_body = ParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant updated successfully", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant or team not found")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<Uuid>,
    Json(req): Json<ParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let today = chrono::Local::now().date_naive();
    let updated = services::update_participant(
        state.db.pool(),
        state.geocoder.as_ref(),
        participant_id,
        &req,
    )
    .await?;

    Ok(Json(ParticipantResponse::from_participant(updated, today)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{participant_id}",
    params(
        ("participant_id" = Uuid, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Participant deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(db): State<Database>,
    Path(participant_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_participant(db.pool(), participant_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
