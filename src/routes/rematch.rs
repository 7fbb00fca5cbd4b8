use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    dto::rooms::RoomSummary,
    error::AppError,
    identity::PlayerId,
    services::rematch_service,
    state::SharedState,
};

/// Routes handling the rematch handshake on concluded rooms.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/rooms/{id}/rematch/request", post(request_rematch))
        .route("/rooms/{id}/rematch/accept", post(accept_rematch))
}

/// Propose a rematch in a concluded room.
#[utoipa::path(
    post,
    path = "/rooms/{id}/rematch/request",
    tag = "rematch",
    params(("id" = Uuid, Path, description = "Identifier of the concluded room")),
    responses(
        (status = 200, description = "Rematch requested", body = RoomSummary),
        (status = 409, description = "Room not rematch-eligible or request already pending")
    ),
)]
pub async fn request_rematch(
    State(state): State<SharedState>,
    player: PlayerId,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomSummary>, AppError> {
    let room = rematch_service::request_rematch(&state, id, player.0).await?;
    Ok(Json(room))
}

/// Accept a pending rematch; returns the successor room.
#[utoipa::path(
    post,
    path = "/rooms/{id}/rematch/accept",
    tag = "rematch",
    params(("id" = Uuid, Path, description = "Identifier of the concluded room")),
    responses(
        (status = 200, description = "Successor room", body = RoomSummary),
        (status = 409, description = "No pending request or self-acceptance")
    ),
)]
pub async fn accept_rematch(
    State(state): State<SharedState>,
    player: PlayerId,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomSummary>, AppError> {
    let room = rematch_service::accept_rematch(&state, id, player.0).await?;
    Ok(Json(room))
}
