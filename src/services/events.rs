//! Fire-and-forget broadcast helpers. Event delivery never gates a state
//! change: a payload that fails to serialise is logged and dropped, and the
//! triggering request still succeeds.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dao::models::{EndReason, MatchResult, RoomPhase},
    dto::{
        events::{
            GameEndedEvent, GameStartedEvent, MoveAppliedEvent, PlayerReadyEvent,
            RematchAcceptedEvent, RematchCreatedEvent, RematchRequestedEvent, RoomCreatedEvent,
            RoomEvent, SeatJoinedEvent, SeatLeftEvent,
        },
        rooms::{MoveApplied, RoomSummary},
    },
    engine::Stone,
    state::SharedState,
};

const EVENT_ROOM_CREATED: &str = "room.created";
const EVENT_SEAT_JOINED: &str = "seat.joined";
const EVENT_SEAT_LEFT: &str = "seat.left";
const EVENT_PLAYER_READY: &str = "player.ready";
const EVENT_GAME_STARTED: &str = "game.started";
const EVENT_MOVE_APPLIED: &str = "move.applied";
const EVENT_GAME_ENDED: &str = "game.ended";
const EVENT_REMATCH_REQUESTED: &str = "rematch.requested";
const EVENT_REMATCH_ACCEPTED: &str = "rematch.accepted";
const EVENT_REMATCH_CREATED: &str = "rematch.created";

/// Broadcast that a room has been opened.
pub fn broadcast_room_created(state: &SharedState, room: RoomSummary) {
    let room_id = room.id;
    send_event(state, room_id, EVENT_ROOM_CREATED, &RoomCreatedEvent(room));
}

/// Broadcast that a participant took a seat.
pub fn broadcast_seat_joined(state: &SharedState, room_id: Uuid, player_id: Uuid, is_host: bool) {
    let payload = SeatJoinedEvent {
        room_id,
        player_id,
        is_host,
    };
    send_event(state, room_id, EVENT_SEAT_JOINED, &payload);
}

/// Broadcast that a seat was vacated before the game started.
pub fn broadcast_seat_left(
    state: &SharedState,
    room_id: Uuid,
    player_id: Uuid,
    new_host_id: Option<Uuid>,
) {
    let payload = SeatLeftEvent {
        room_id,
        player_id,
        new_host_id,
    };
    send_event(state, room_id, EVENT_SEAT_LEFT, &payload);
}

/// Broadcast that a seated participant declared ready.
pub fn broadcast_player_ready(state: &SharedState, room_id: Uuid, player_id: Uuid) {
    let payload = PlayerReadyEvent { room_id, player_id };
    send_event(state, room_id, EVENT_PLAYER_READY, &payload);
}

/// Broadcast that a match has begun.
pub fn broadcast_game_started(
    state: &SharedState,
    room_id: Uuid,
    match_id: Uuid,
    first_player_id: Uuid,
    second_player_id: Uuid,
) {
    let payload = GameStartedEvent {
        room_id,
        match_id,
        first_player_id,
        second_player_id,
    };
    send_event(state, room_id, EVENT_GAME_STARTED, &payload);
}

/// Broadcast a committed stone placement.
pub fn broadcast_move_applied(state: &SharedState, outcome: MoveApplied) {
    let room_id = outcome.room_id;
    send_event(state, room_id, EVENT_MOVE_APPLIED, &MoveAppliedEvent(outcome));
}

/// Broadcast that a match concluded.
pub fn broadcast_game_ended(
    state: &SharedState,
    room_id: Uuid,
    phase: RoomPhase,
    result: MatchResult,
    reason: EndReason,
    winner_id: Option<Uuid>,
    winning_stone: Option<Stone>,
) {
    let payload = GameEndedEvent {
        room_id,
        phase,
        result,
        reason,
        winner_id,
        winning_stone,
    };
    send_event(state, room_id, EVENT_GAME_ENDED, &payload);
}

/// Broadcast a new rematch proposal.
pub fn broadcast_rematch_requested(state: &SharedState, room_id: Uuid, requested_by: Uuid) {
    let payload = RematchRequestedEvent {
        room_id,
        requested_by,
    };
    send_event(state, room_id, EVENT_REMATCH_REQUESTED, &payload);
}

/// Broadcast an accepted rematch.
pub fn broadcast_rematch_accepted(state: &SharedState, room_id: Uuid, accepted_by: Uuid) {
    let payload = RematchAcceptedEvent {
        room_id,
        accepted_by,
    };
    send_event(state, room_id, EVENT_REMATCH_ACCEPTED, &payload);
}

/// Broadcast that the rematch successor room exists.
pub fn broadcast_rematch_created(state: &SharedState, room_id: Uuid, successor_room_id: Uuid) {
    let payload = RematchCreatedEvent {
        room_id,
        successor_room_id,
    };
    send_event(state, room_id, EVENT_REMATCH_CREATED, &payload);
}

fn send_event(state: &SharedState, room_id: Uuid, event: &str, payload: &impl Serialize) {
    match RoomEvent::json(room_id, event, payload) {
        Ok(event) => state.events().broadcast(event),
        Err(err) => warn!(event, %room_id, error = %err, "failed to serialize event payload"),
    }
}
