//! Two-phase rematch handshake. One participant requests, the other
//! accepts, and acceptance spawns a fresh successor room with both
//! participants pre-seated and every per-game flag reset.

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{RematchState, RoomEntity, RoomVisibility, SeatEntity},
    dto::rooms::RoomSummary,
    error::GameError,
    services::{events, join_code},
    state::{
        SharedState,
        lifecycle::{self, LifecycleEvent},
    },
};

/// Propose a rematch in a concluded room.
pub async fn request_rematch(
    state: &SharedState,
    room_id: Uuid,
    player_id: Uuid,
) -> Result<RoomSummary, GameError> {
    let gate = state.room_gate(room_id);
    let _guard = gate.lock().await;

    let mut room = find_room(state, room_id).await?;
    if !room.phase.allows_rematch() {
        return Err(GameError::WrongPhase { phase: room.phase });
    }
    if room.rematch_state != RematchState::None {
        return Err(GameError::AlreadyRequested);
    }

    let seats = state.store().seats_in_room(room_id).await?;
    if !seats.iter().any(|seat| seat.player_id == player_id) {
        return Err(GameError::NotASeatHolder);
    }
    if seats.len() < 2 {
        return Err(GameError::InsufficientSeats);
    }

    for seat in &seats {
        if seat.player_id == player_id {
            let mut seat = seat.clone();
            seat.accepted_rematch = true;
            state.store().update_seat(seat).await?;
        }
    }

    room.rematch_state = RematchState::Requested;
    room.rematch_requested_by = Some(player_id);
    state.store().update_room(room.clone()).await?;

    info!(%room_id, %player_id, "rematch requested");
    events::broadcast_rematch_requested(state, room_id, player_id);

    let seats = state.store().seats_in_room(room_id).await?;
    Ok(RoomSummary::from_parts(&room, &seats))
}

/// Accept a pending rematch, creating the successor room.
///
/// Accepting an already-completed handshake is idempotent: the existing
/// successor is returned instead of creating another one.
pub async fn accept_rematch(
    state: &SharedState,
    room_id: Uuid,
    player_id: Uuid,
) -> Result<RoomSummary, GameError> {
    let gate = state.room_gate(room_id);
    let _guard = gate.lock().await;

    let mut room = find_room(state, room_id).await?;
    match room.rematch_state {
        RematchState::None => return Err(GameError::NoPendingRequest),
        RematchState::Created => {
            let successor_id = room.successor_room_id.ok_or_else(|| {
                GameError::Inconsistent("rematch marked created without a successor room".into())
            })?;
            let successor = find_room(state, successor_id).await?;
            let seats = state.store().seats_in_room(successor_id).await?;
            return Ok(RoomSummary::from_parts(&successor, &seats));
        }
        RematchState::Requested => {}
    }

    let requester_id = room.rematch_requested_by.ok_or_else(|| {
        GameError::Inconsistent("rematch requested without a requester".into())
    })?;
    if requester_id == player_id {
        return Err(GameError::SelfAccept);
    }

    let seats = state.store().seats_in_room(room_id).await?;
    if !seats.iter().any(|seat| seat.player_id == player_id) {
        return Err(GameError::NotASeatHolder);
    }
    if seats.len() < 2 {
        return Err(GameError::InsufficientSeats);
    }

    for seat in &seats {
        let mut seat = seat.clone();
        seat.accepted_rematch = true;
        state.store().update_seat(seat).await?;
    }
    events::broadcast_rematch_accepted(state, room_id, player_id);

    let successor = spawn_successor(state, &room, requester_id, player_id).await?;

    room.rematch_state = RematchState::Created;
    room.successor_room_id = Some(successor.id);
    state.store().update_room(room.clone()).await?;

    info!(%room_id, successor_room_id = %successor.id, "rematch room created");
    events::broadcast_rematch_created(state, room_id, successor.id);

    let seats = state.store().seats_in_room(successor.id).await?;
    Ok(RoomSummary::from_parts(&successor, &seats))
}

/// Create the successor room and migrate both participants into it. The old
/// seats are deleted before the new ones are inserted so the one-seat-per-
/// player rule never observes a participant in two active rooms.
async fn spawn_successor(
    state: &SharedState,
    old_room: &RoomEntity,
    requester_id: Uuid,
    accepter_id: Uuid,
) -> Result<RoomEntity, GameError> {
    let code = match old_room.visibility {
        RoomVisibility::Private => Some(join_code::unique_join_code(state).await?),
        RoomVisibility::Public => None,
    };

    // The requester hosts the new room and will play the first stone there.
    let successor = RoomEntity::new(
        old_room.name.clone(),
        old_room.visibility,
        code,
        requester_id,
    );
    state.store().create_room(successor.clone()).await?;

    state.store().delete_seat(old_room.id, requester_id).await?;
    state.store().delete_seat(old_room.id, accepter_id).await?;

    state
        .store()
        .insert_seat(SeatEntity::new(successor.id, requester_id, true))
        .await?;
    state
        .store()
        .insert_seat(SeatEntity::new(successor.id, accepter_id, false))
        .await?;

    // Both seats are taken from the outset, so the successor opens directly
    // in the ready-handshake phase.
    let mut successor = successor;
    let next = lifecycle::advance(successor.phase, LifecycleEvent::SeatFilled)?;
    successor.set_phase(next);
    state.store().update_room(successor.clone()).await?;

    Ok(successor)
}

async fn find_room(state: &SharedState, room_id: Uuid) -> Result<RoomEntity, GameError> {
    state
        .store()
        .find_room(room_id)
        .await?
        .ok_or(GameError::RoomNotFound(room_id))
}
