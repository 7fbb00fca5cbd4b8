//! Move arbitration. Turn authority is re-derived from the persisted move
//! count on every submission, and the board is replayed from the move log,
//! so nothing here trusts request-supplied ordering.

use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, MatchResult, MoveEntity, RoomEntity, RoomPhase},
    dto::rooms::{MoveApplied, MoveRequest},
    engine::{Board, Stone, stone_for_move_number, stone_to_move},
    error::GameError,
    services::{endgame, events},
    state::{SharedState, lifecycle::LifecycleEvent},
};

/// Validate and commit a stone placement. All checks run against freshly
/// loaded state before anything is written; a rejected move leaves the move
/// log untouched.
pub async fn submit_move(
    state: &SharedState,
    room_id: Uuid,
    player_id: Uuid,
    request: MoveRequest,
) -> Result<MoveApplied, GameError> {
    let gate = state.room_gate(room_id);
    let _guard = gate.lock().await;

    let mut room = state
        .store()
        .find_room(room_id)
        .await?
        .ok_or(GameError::RoomNotFound(room_id))?;
    if room.phase != RoomPhase::InProgress {
        return Err(GameError::WrongPhase { phase: room.phase });
    }

    let mut game_match = state
        .store()
        .ongoing_match(room_id)
        .await?
        .ok_or(GameError::NoOngoingMatch)?;

    let stone = stone_for_player(&game_match, player_id)?;

    let move_count = state.store().count_moves(game_match.id).await?;
    if stone_to_move(move_count) != stone {
        return Err(GameError::OutOfTurn);
    }

    let moves = state.store().moves_in_match(game_match.id).await?;
    let mut board = Board::replay(
        moves
            .iter()
            .map(|entry| (entry.x, entry.y, stone_for_move_number(entry.move_number))),
    );
    if board
        .place(request.x, request.y, stone)
        .is_err()
    {
        return Err(GameError::IllegalCell {
            x: request.x,
            y: request.y,
        });
    }

    let move_number = move_count as u32 + 1;
    state
        .store()
        .insert_move(MoveEntity {
            match_id: game_match.id,
            player_id,
            x: request.x,
            y: request.y,
            move_number,
            created_at: SystemTime::now(),
        })
        .await?;

    info!(%room_id, %player_id, x = request.x, y = request.y, move_number, "move committed");

    let outcome = if board.wins_at(request.x, request.y) {
        let conclusion =
            endgame::conclude(state, &mut room, &mut game_match, Some((player_id, stone))).await?;
        build_outcome(
            &room,
            &game_match,
            request,
            player_id,
            stone,
            move_number,
            &board,
            conclusion.result,
            conclusion.winner_id,
            format!("player {player_id} wins with five in a row"),
        )
    } else if board.is_full() {
        let conclusion = endgame::conclude(state, &mut room, &mut game_match, None).await?;
        build_outcome(
            &room,
            &game_match,
            request,
            player_id,
            stone,
            move_number,
            &board,
            conclusion.result,
            conclusion.winner_id,
            "board is full; the game is a draw".to_string(),
        )
    } else {
        let next_player = match stone.opponent() {
            Stone::First => game_match.first_player_id,
            Stone::Second => game_match.second_player_id,
        };
        let mut outcome = build_outcome(
            &room,
            &game_match,
            request,
            player_id,
            stone,
            move_number,
            &board,
            MatchResult::Ongoing,
            None,
            "move accepted".to_string(),
        );
        outcome.next_turn = Some(next_player);
        outcome
    };

    events::broadcast_move_applied(state, outcome.clone());
    Ok(outcome)
}

/// Concede the live match. The surrendering seat loses; the room moves to
/// the surrendered phase and remains rematch-eligible.
pub async fn surrender(
    state: &SharedState,
    room_id: Uuid,
    player_id: Uuid,
) -> Result<(), GameError> {
    let gate = state.room_gate(room_id);
    let _guard = gate.lock().await;

    let mut room = state
        .store()
        .find_room(room_id)
        .await?
        .ok_or(GameError::RoomNotFound(room_id))?;
    if room.phase != RoomPhase::InProgress {
        return Err(GameError::WrongPhase { phase: room.phase });
    }
    state
        .store()
        .find_seat(room_id, player_id)
        .await?
        .ok_or(GameError::NotASeatHolder)?;

    endgame::forfeit(state, &mut room, player_id, LifecycleEvent::Surrender).await?;
    Ok(())
}

fn stone_for_player(game_match: &MatchEntity, player_id: Uuid) -> Result<Stone, GameError> {
    if game_match.first_player_id == player_id {
        Ok(Stone::First)
    } else if game_match.second_player_id == player_id {
        Ok(Stone::Second)
    } else {
        Err(GameError::NotASeatHolder)
    }
}

#[allow(clippy::too_many_arguments)]
fn build_outcome(
    room: &RoomEntity,
    game_match: &MatchEntity,
    request: MoveRequest,
    player_id: Uuid,
    stone: Stone,
    move_number: u32,
    board: &Board,
    result: MatchResult,
    winner_id: Option<Uuid>,
    message: String,
) -> MoveApplied {
    MoveApplied {
        room_id: room.id,
        match_id: game_match.id,
        x: request.x,
        y: request.y,
        player_id,
        stone,
        move_number,
        next_turn: None,
        phase: room.phase,
        result,
        winner_id,
        board: board.to_rows(),
        message,
    }
}
