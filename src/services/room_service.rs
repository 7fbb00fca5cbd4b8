//! Room lifecycle: creation, listing, joining, the ready handshake, and
//! leaving. Every mutating operation locks the room's gate before touching
//! the store, so concurrent requests targeting the same room serialize.
//! Seat-taking paths additionally hold the joining player's gate, which
//! keeps the one-active-seat rule intact across rooms.

use std::time::SystemTime;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::{
        MatchEntity, MatchResult, ReadyState, RoomEntity, RoomPhase, RoomVisibility, SeatEntity,
        SeatResult,
    },
    dto::rooms::{CreateRoomRequest, CreatedRoom, JoinRoomRequest, RoomSummary},
    error::GameError,
    services::{endgame, events, join_code},
    state::{
        SharedState,
        lifecycle::{self, LifecycleEvent},
    },
};

/// Open a new room with its creator seated as host.
pub async fn create_room(
    state: &SharedState,
    creator_id: Uuid,
    request: CreateRoomRequest,
) -> Result<CreatedRoom, GameError> {
    // The player's gate stays held from the one-active-seat check through
    // the seat insert; a concurrent join or create by the same player waits
    // here instead of slipping a second seat in.
    let player_gate = state.player_gate(creator_id);
    let _player_guard = player_gate.lock().await;
    ensure_not_seated_elsewhere(state, creator_id).await?;

    let code = match request.visibility {
        RoomVisibility::Private => Some(join_code::unique_join_code(state).await?),
        RoomVisibility::Public => None,
    };

    let room = RoomEntity::new(request.name, request.visibility, code.clone(), creator_id);
    state.store().create_room(room.clone()).await?;

    let host_seat = SeatEntity::new(room.id, creator_id, true);
    state.store().insert_seat(host_seat.clone()).await?;

    info!(room_id = %room.id, %creator_id, visibility = ?room.visibility, "room created");

    let summary = RoomSummary::from_parts(&room, &[host_seat]);
    events::broadcast_room_created(state, summary.clone());

    Ok(CreatedRoom {
        room: summary,
        join_code: code,
    })
}

/// Snapshot a single room with its seats.
pub async fn get_room(state: &SharedState, room_id: Uuid) -> Result<RoomSummary, GameError> {
    let room = find_room(state, room_id).await?;
    let seats = state.store().seats_in_room(room_id).await?;
    Ok(RoomSummary::from_parts(&room, &seats))
}

/// Snapshot every room. Join codes are never included; private rooms are
/// visible in the list but cannot be entered without their code.
pub async fn list_rooms(state: &SharedState) -> Result<Vec<RoomSummary>, GameError> {
    let mut rooms = state.store().list_rooms().await?;
    rooms.sort_by_key(|room| room.created_at);

    let mut summaries = Vec::with_capacity(rooms.len());
    for room in rooms {
        let seats = state.store().seats_in_room(room.id).await?;
        summaries.push(RoomSummary::from_parts(&room, &seats));
    }
    Ok(summaries)
}

/// Take the open seat in a room.
pub async fn join_room(
    state: &SharedState,
    room_id: Uuid,
    player_id: Uuid,
    request: JoinRoomRequest,
) -> Result<RoomSummary, GameError> {
    let gate = state.room_gate(room_id);
    let _guard = gate.lock().await;

    let mut room = find_room(state, room_id).await?;
    let seats = state.store().seats_in_room(room_id).await?;
    if seats.iter().any(|seat| seat.player_id == player_id) {
        return Err(GameError::AlreadySeated);
    }
    match room.phase {
        RoomPhase::WaitingForPlayers => {}
        // Both seats are taken while the handshake runs.
        RoomPhase::WaitingForReady => return Err(GameError::RoomFull),
        phase => return Err(GameError::WrongPhase { phase }),
    }

    if room.visibility == RoomVisibility::Private
        && request.join_code.as_deref() != room.join_code.as_deref()
    {
        return Err(GameError::WrongJoinCode);
    }
    if seats.len() >= 2 {
        return Err(GameError::RoomFull);
    }

    // Room gate first, player gate second; every path that holds both uses
    // this order.
    let player_gate = state.player_gate(player_id);
    let _player_guard = player_gate.lock().await;
    ensure_not_seated_elsewhere(state, player_id).await?;

    let seat = SeatEntity::new(room_id, player_id, seats.is_empty());
    state.store().insert_seat(seat.clone()).await?;

    if seats.len() + 1 == 2 {
        let next = lifecycle::advance(room.phase, LifecycleEvent::SeatFilled)?;
        room.set_phase(next);
        state.store().update_room(room.clone()).await?;
    }

    info!(%room_id, %player_id, "seat taken");
    events::broadcast_seat_joined(state, room_id, player_id, seat.is_host);

    let seats = state.store().seats_in_room(room_id).await?;
    Ok(RoomSummary::from_parts(&room, &seats))
}

/// Mark the caller's seat ready. When this readiness completes the
/// handshake, the match starts in the same gated pass.
pub async fn mark_ready(
    state: &SharedState,
    room_id: Uuid,
    player_id: Uuid,
) -> Result<RoomSummary, GameError> {
    let gate = state.room_gate(room_id);
    let _guard = gate.lock().await;

    let mut room = find_room(state, room_id).await?;
    if room.phase != RoomPhase::WaitingForReady {
        return Err(GameError::WrongPhase { phase: room.phase });
    }

    let mut seat = state
        .store()
        .find_seat(room_id, player_id)
        .await?
        .ok_or(GameError::NotASeatHolder)?;

    if seat.ready_state != ReadyState::Ready {
        seat.ready_state = ReadyState::Ready;
        state.store().update_seat(seat).await?;
        events::broadcast_player_ready(state, room_id, player_id);
    }

    let seats = state.store().seats_in_room(room_id).await?;
    let all_ready = seats.len() == 2
        && seats
            .iter()
            .all(|seat| seat.ready_state == ReadyState::Ready);
    if all_ready {
        start_match(state, &mut room, seats).await?;
    }

    let seats = state.store().seats_in_room(room_id).await?;
    Ok(RoomSummary::from_parts(&room, &seats))
}

/// Vacate the caller's seat. Mid-game this is a forfeit; before the game it
/// reopens (or deletes) the room; after the game it simply exits.
pub async fn leave_room(
    state: &SharedState,
    room_id: Uuid,
    player_id: Uuid,
) -> Result<(), GameError> {
    let gate = state.room_gate(room_id);
    let _guard = gate.lock().await;

    let mut room = find_room(state, room_id).await?;
    state
        .store()
        .find_seat(room_id, player_id)
        .await?
        .ok_or(GameError::NotASeatHolder)?;

    match room.phase {
        RoomPhase::InProgress => {
            endgame::forfeit(state, &mut room, player_id, LifecycleEvent::Leave).await?;
        }
        RoomPhase::WaitingForPlayers | RoomPhase::WaitingForReady => {
            leave_before_start(state, &mut room, player_id).await?;
        }
        RoomPhase::Finished | RoomPhase::EndedByLeave | RoomPhase::EndedBySurrender => {
            // The room is kept as history; only the membership row goes.
            state.store().delete_seat(room_id, player_id).await?;
            events::broadcast_seat_left(state, room_id, player_id, None);
        }
    }

    Ok(())
}

async fn leave_before_start(
    state: &SharedState,
    room: &mut RoomEntity,
    player_id: Uuid,
) -> Result<(), GameError> {
    let was_host = state
        .store()
        .find_seat(room.id, player_id)
        .await?
        .is_some_and(|seat| seat.is_host);

    state.store().delete_seat(room.id, player_id).await?;

    let remaining = state.store().seats_in_room(room.id).await?;
    if remaining.is_empty() {
        state.store().delete_room(room.id).await?;
        state.discard_room_gate(room.id);
        info!(room_id = %room.id, "room deleted after last seat left");
        events::broadcast_seat_left(state, room.id, player_id, None);
        return Ok(());
    }

    // Promote the earliest remaining seat when the host departed, and drop
    // any ready flags so the handshake restarts from scratch.
    let mut new_host_id = None;
    for (index, seat) in remaining.into_iter().enumerate() {
        let mut seat = seat;
        if was_host && index == 0 {
            seat.is_host = true;
            new_host_id = Some(seat.player_id);
        }
        seat.ready_state = ReadyState::NotReady;
        state.store().update_seat(seat).await?;
    }

    if room.phase == RoomPhase::WaitingForReady {
        let next = lifecycle::advance(room.phase, LifecycleEvent::SeatVacated)?;
        room.set_phase(next);
        state.store().update_room(room.clone()).await?;
    }

    info!(room_id = %room.id, %player_id, ?new_host_id, "seat vacated before start");
    events::broadcast_seat_left(state, room.id, player_id, new_host_id);
    Ok(())
}

/// Start the match once both seats are ready. The host plays the first
/// stone; the other seat plays the second.
async fn start_match(
    state: &SharedState,
    room: &mut RoomEntity,
    seats: Vec<SeatEntity>,
) -> Result<(), GameError> {
    if seats.len() < 2 {
        return Err(GameError::InsufficientSeats);
    }

    // An ongoing match here means an earlier terminal transition was lost.
    // This is the one place a stale match is repaired rather than surfaced:
    // it is closed as abandoned so the new match is the room's only live one.
    if let Some(mut stale) = state.store().ongoing_match(room.id).await? {
        warn!(room_id = %room.id, match_id = %stale.id, "closing stale ongoing match as abandoned");
        stale.result = MatchResult::Abandoned;
        stale.ended_at = Some(SystemTime::now());
        state.store().update_match(stale).await?;
    }

    let host = seats
        .iter()
        .find(|seat| seat.is_host)
        .ok_or_else(|| GameError::Inconsistent("room has seats but no host".into()))?;
    let opponent = seats
        .iter()
        .find(|seat| !seat.is_host)
        .ok_or_else(|| GameError::Inconsistent("room has two host seats".into()))?;

    let game_match = MatchEntity::new(room.id, host.player_id, opponent.player_id);
    state.store().create_match(game_match.clone()).await?;

    for seat in seats {
        let mut seat = seat;
        seat.ready_state = ReadyState::InGame;
        seat.game_result = SeatResult::None;
        state.store().update_seat(seat).await?;
    }

    let next = lifecycle::advance(room.phase, LifecycleEvent::AllReady)?;
    room.set_phase(next);
    room.game_started_at = Some(SystemTime::now());
    state.store().update_room(room.clone()).await?;

    info!(
        room_id = %room.id,
        match_id = %game_match.id,
        first = %game_match.first_player_id,
        second = %game_match.second_player_id,
        "match started"
    );
    events::broadcast_game_started(
        state,
        room.id,
        game_match.id,
        game_match.first_player_id,
        game_match.second_player_id,
    );
    Ok(())
}

async fn find_room(state: &SharedState, room_id: Uuid) -> Result<RoomEntity, GameError> {
    state
        .store()
        .find_room(room_id)
        .await?
        .ok_or(GameError::RoomNotFound(room_id))
}

/// A participant may hold at most one seat across all non-finished rooms.
async fn ensure_not_seated_elsewhere(
    state: &SharedState,
    player_id: Uuid,
) -> Result<(), GameError> {
    let seats = state.store().seats_for_player(player_id).await?;
    for seat in seats {
        if let Some(room) = state.store().find_room(seat.room_id).await?
            && !room.phase.is_terminal()
        {
            return Err(GameError::AlreadySeatedElsewhere);
        }
    }
    Ok(())
}
