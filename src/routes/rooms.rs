use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::rooms::{CreateRoomRequest, CreatedRoom, JoinRoomRequest, RoomSummary},
    error::AppError,
    identity::PlayerId,
    services::room_service,
    state::SharedState,
};

/// Routes handling room creation, discovery, and membership.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/rooms", post(create_room).get(list_rooms))
        .route("/rooms/{id}", get(get_room))
        .route("/rooms/{id}/join", post(join_room))
        .route("/rooms/{id}/ready", post(mark_ready))
        .route("/rooms/{id}/leave", post(leave_room))
}

/// Open a new room with the caller seated as host.
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "Room created", body = CreatedRoom),
        (status = 409, description = "Caller already holds a seat in an active room")
    ),
)]
pub async fn create_room(
    State(state): State<SharedState>,
    player: PlayerId,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<Json<CreatedRoom>, AppError> {
    payload.validate()?;
    let created = room_service::create_room(&state, player.0, payload).await?;
    Ok(Json(created))
}

/// List every room with its seats. Join codes are never included.
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    responses((status = 200, description = "All rooms", body = [RoomSummary]))
)]
pub async fn list_rooms(
    State(state): State<SharedState>,
) -> Result<Json<Vec<RoomSummary>>, AppError> {
    let rooms = room_service::list_rooms(&state).await?;
    Ok(Json(rooms))
}

/// Snapshot a single room.
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "rooms",
    params(("id" = Uuid, Path, description = "Identifier of the room")),
    responses(
        (status = 200, description = "Room snapshot", body = RoomSummary),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomSummary>, AppError> {
    let room = room_service::get_room(&state, id).await?;
    Ok(Json(room))
}

/// Take the open seat in a room.
#[utoipa::path(
    post,
    path = "/rooms/{id}/join",
    tag = "rooms",
    params(("id" = Uuid, Path, description = "Identifier of the room")),
    request_body = JoinRoomRequest,
    responses(
        (status = 200, description = "Seat taken", body = RoomSummary),
        (status = 401, description = "Missing or wrong join code"),
        (status = 409, description = "Room full or caller already seated")
    ),
)]
pub async fn join_room(
    State(state): State<SharedState>,
    player: PlayerId,
    Path(id): Path<Uuid>,
    payload: Option<Json<JoinRoomRequest>>,
) -> Result<Json<RoomSummary>, AppError> {
    let request = payload.map(|Json(body)| body).unwrap_or_default();
    let room = room_service::join_room(&state, id, player.0, request).await?;
    Ok(Json(room))
}

/// Declare the caller's seat ready; starts the match once both seats are.
#[utoipa::path(
    post,
    path = "/rooms/{id}/ready",
    tag = "rooms",
    params(("id" = Uuid, Path, description = "Identifier of the room")),
    responses(
        (status = 200, description = "Readiness recorded", body = RoomSummary),
        (status = 409, description = "Room is not in the ready handshake")
    ),
)]
pub async fn mark_ready(
    State(state): State<SharedState>,
    player: PlayerId,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomSummary>, AppError> {
    let room = room_service::mark_ready(&state, id, player.0).await?;
    Ok(Json(room))
}

/// Vacate the caller's seat; forfeits when the match is live.
#[utoipa::path(
    post,
    path = "/rooms/{id}/leave",
    tag = "rooms",
    params(("id" = Uuid, Path, description = "Identifier of the room")),
    responses(
        (status = 204, description = "Seat vacated"),
        (status = 409, description = "Caller holds no seat in this room")
    ),
)]
pub async fn leave_room(
    State(state): State<SharedState>,
    player: PlayerId,
    Path(id): Path<Uuid>,
) -> Result<axum::http::StatusCode, AppError> {
    room_service::leave_room(&state, id, player.0).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
