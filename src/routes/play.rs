use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    dto::rooms::{MoveApplied, MoveRequest},
    error::AppError,
    identity::PlayerId,
    services::match_service,
    state::SharedState,
};

/// Routes handling gameplay inside a live match.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/rooms/{id}/moves", post(submit_move))
        .route("/rooms/{id}/surrender", post(surrender))
}

/// Place a stone in the caller's live match.
#[utoipa::path(
    post,
    path = "/rooms/{id}/moves",
    tag = "play",
    params(("id" = Uuid, Path, description = "Identifier of the room")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Move committed", body = MoveApplied),
        (status = 400, description = "Cell out of bounds or occupied"),
        (status = 409, description = "Not the caller's turn or no live match")
    ),
)]
pub async fn submit_move(
    State(state): State<SharedState>,
    player: PlayerId,
    Path(id): Path<Uuid>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MoveApplied>, AppError> {
    let outcome = match_service::submit_move(&state, id, player.0, payload).await?;
    Ok(Json(outcome))
}

/// Concede the live match.
#[utoipa::path(
    post,
    path = "/rooms/{id}/surrender",
    tag = "play",
    params(("id" = Uuid, Path, description = "Identifier of the room")),
    responses(
        (status = 204, description = "Match conceded"),
        (status = 409, description = "No live match to concede")
    ),
)]
pub async fn surrender(
    State(state): State<SharedState>,
    player: PlayerId,
    Path(id): Path<Uuid>,
) -> Result<axum::http::StatusCode, AppError> {
    match_service::surrender(&state, id, player.0).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
