use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::{
    MatchResult, ReadyState, RematchState, RoomEntity, RoomPhase, RoomStatus, RoomVisibility,
    SeatEntity, SeatResult,
};
use crate::dto::format_system_time;
use crate::engine::Stone;

/// Payload used to open a brand-new room.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRoomRequest {
    /// Display name shown in room lists.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Public rooms accept anyone; private rooms require the join code.
    pub visibility: RoomVisibility,
}

/// Response for a freshly created room. The join code is returned only
/// here, to the creator; room summaries never carry it.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedRoom {
    /// Snapshot of the new room.
    pub room: RoomSummary,
    /// Code the creator shares to let the opponent join a private room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_code: Option<String>,
}

/// Payload accompanying a join request.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct JoinRoomRequest {
    /// Required when the room is private.
    #[serde(default)]
    pub join_code: Option<String>,
}

/// A candidate stone placement.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct MoveRequest {
    /// Column, `0 <= x < 15`.
    pub x: u8,
    /// Row, `0 <= y < 15`.
    pub y: u8,
}

/// Public projection of a seat.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeatSummary {
    /// Participant occupying the seat.
    pub player_id: Uuid,
    /// Whether this seat is the room's host.
    pub is_host: bool,
    /// Ready handshake progress.
    pub ready_state: ReadyState,
    /// Terminal outcome recorded on this seat.
    pub game_result: SeatResult,
    /// Whether this seat accepted the pending rematch.
    pub accepted_rematch: bool,
    /// RFC3339 timestamp of when the seat was taken.
    pub joined_at: String,
}

impl From<&SeatEntity> for SeatSummary {
    fn from(seat: &SeatEntity) -> Self {
        Self {
            player_id: seat.player_id,
            is_host: seat.is_host,
            ready_state: seat.ready_state,
            game_result: seat.game_result,
            accepted_rematch: seat.accepted_rematch,
            joined_at: format_system_time(seat.joined_at),
        }
    }
}

/// Public projection of a room and its seats.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomSummary {
    /// Primary key of the room.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Public or private visibility.
    pub visibility: RoomVisibility,
    /// Coarse status bucket.
    pub status: RoomStatus,
    /// Fine-grained lifecycle phase.
    pub phase: RoomPhase,
    /// Progress of the rematch handshake.
    pub rematch_state: RematchState,
    /// Participant who requested the pending rematch, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rematch_requested_by: Option<Uuid>,
    /// Room spawned by a completed rematch handshake, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successor_room_id: Option<Uuid>,
    /// Participant who created the room.
    pub created_by: Uuid,
    /// RFC3339 creation timestamp.
    pub created_at: String,
    /// RFC3339 timestamp of the match start, once started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_started_at: Option<String>,
    /// RFC3339 timestamp of the match end, once ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_ended_at: Option<String>,
    /// Seats in join order.
    pub seats: Vec<SeatSummary>,
}

impl RoomSummary {
    /// Project a room entity and its seats into the public shape.
    pub fn from_parts(room: &RoomEntity, seats: &[SeatEntity]) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            visibility: room.visibility,
            status: room.status,
            phase: room.phase,
            rematch_state: room.rematch_state,
            rematch_requested_by: room.rematch_requested_by,
            successor_room_id: room.successor_room_id,
            created_by: room.created_by,
            created_at: format_system_time(room.created_at),
            game_started_at: room.game_started_at.map(format_system_time),
            game_ended_at: room.game_ended_at.map(format_system_time),
            seats: seats.iter().map(SeatSummary::from).collect(),
        }
    }
}

/// Everything an observer needs after a committed move: the refreshed
/// board, who plays next (absent when the game just ended), and the
/// outcome if the move concluded the match.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MoveApplied {
    /// Room the move belongs to.
    pub room_id: Uuid,
    /// Match the move belongs to.
    pub match_id: Uuid,
    /// Column of the placed stone.
    pub x: u8,
    /// Row of the placed stone.
    pub y: u8,
    /// Participant who placed the stone.
    pub player_id: Uuid,
    /// Color of the placed stone.
    pub stone: Stone,
    /// 1-based sequence number of the move.
    pub move_number: u32,
    /// Participant entitled to move next; absent when the game concluded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_turn: Option<Uuid>,
    /// Room phase after the move.
    pub phase: RoomPhase,
    /// Match result after the move.
    pub result: MatchResult,
    /// Winner, when the move decided the match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<Uuid>,
    /// Full 15×15 occupancy grid (0 empty, 1 first stone, 2 second).
    pub board: Vec<Vec<u8>>,
    /// Human-readable outcome message.
    pub message: String,
}
