use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::{EndReason, MatchResult, RoomPhase};
use crate::dto::rooms::{MoveApplied, RoomSummary};
use crate::engine::Stone;

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels. `room_id` lets a
/// subscriber filter to a single room without deserialising `data`.
pub struct RoomEvent {
    pub room_id: Uuid,
    pub event: String,
    pub data: String,
}

impl RoomEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(room_id: Uuid, event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<String>,
        T: Serialize,
    {
        Ok(Self {
            room_id,
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Event emitted when a room is opened.
pub struct RoomCreatedEvent(pub RoomSummary);

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a participant takes a seat.
pub struct SeatJoinedEvent {
    pub room_id: Uuid,
    pub player_id: Uuid,
    pub is_host: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a seat is vacated before the game starts.
pub struct SeatLeftEvent {
    pub room_id: Uuid,
    pub player_id: Uuid,
    /// Participant promoted to host, when the host's departure triggered one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_host_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a seated participant declares ready.
pub struct PlayerReadyEvent {
    pub room_id: Uuid,
    pub player_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when the ready handshake completes and a match begins.
pub struct GameStartedEvent {
    pub room_id: Uuid,
    pub match_id: Uuid,
    /// Participant placing the first stone.
    pub first_player_id: Uuid,
    pub second_player_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Event emitted when a stone placement is committed.
pub struct MoveAppliedEvent(pub MoveApplied);

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a match concludes, however it ended.
pub struct GameEndedEvent {
    pub room_id: Uuid,
    pub phase: RoomPhase,
    pub result: MatchResult,
    pub reason: EndReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_stone: Option<Stone>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a participant proposes a rematch.
pub struct RematchRequestedEvent {
    pub room_id: Uuid,
    pub requested_by: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when the opponent accepts a pending rematch.
pub struct RematchAcceptedEvent {
    pub room_id: Uuid,
    pub accepted_by: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted on the old room when the rematch successor exists.
pub struct RematchCreatedEvent {
    pub room_id: Uuid,
    pub successor_room_id: Uuid,
}
