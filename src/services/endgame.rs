//! Terminal transitions shared by the move arbiter, surrender, and
//! mid-game leave. Every path through this module stamps the room, closes
//! the match, writes seat outcomes, and appends a history record in one
//! pass while the caller holds the room's gate.

use std::time::SystemTime;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::{
        EndReason, HistoryRecordEntity, MatchEntity, MatchResult, ReadyState, RoomEntity,
        SeatResult,
    },
    engine::Stone,
    error::GameError,
    services::events,
    state::{SharedState, lifecycle::{self, LifecycleEvent}},
};

/// Outcome of a terminal transition, echoed back to the caller so the move
/// response can describe how the game ended.
#[derive(Debug, Clone, Copy)]
pub struct Conclusion {
    /// Match result after the transition.
    pub result: MatchResult,
    /// Winner, absent for a draw.
    pub winner_id: Option<Uuid>,
    /// Winning stone, absent for a draw.
    pub winning_stone: Option<Stone>,
}

/// Conclude a match that ended over the board, by a winning run or a full
/// board. `winner` carries the winning seat and stone, or `None` for a draw.
pub async fn conclude(
    state: &SharedState,
    room: &mut RoomEntity,
    game_match: &mut MatchEntity,
    winner: Option<(Uuid, Stone)>,
) -> Result<Conclusion, GameError> {
    let now = SystemTime::now();
    let result = match winner {
        Some((_, Stone::First)) => MatchResult::FirstWin,
        Some((_, Stone::Second)) => MatchResult::SecondWin,
        None => MatchResult::Draw,
    };

    game_match.result = result;
    game_match.ended_at = Some(now);
    state.store().update_match(game_match.clone()).await?;

    let next = lifecycle::advance(room.phase, LifecycleEvent::Concluded)?;
    room.set_phase(next);
    room.game_ended_at = Some(now);
    state.store().update_room(room.clone()).await?;

    let winner_id = winner.map(|(id, _)| id);
    let mut loser_id = None;
    let seats = state.store().seats_in_room(room.id).await?;
    for mut seat in seats {
        seat.ready_state = ReadyState::NotReady;
        seat.game_result = match winner_id {
            Some(id) if id == seat.player_id => SeatResult::Win,
            Some(_) => {
                loser_id = Some(seat.player_id);
                SeatResult::Lose
            }
            None => SeatResult::None,
        };
        state.store().update_seat(seat).await?;
    }

    append_history_record(
        state,
        HistoryRecordEntity {
            room_id: room.id,
            winner_id,
            loser_id,
            reason: EndReason::Win,
            started_at: room.game_started_at,
            ended_at: now,
        },
    )
    .await;

    info!(room_id = %room.id, ?result, "match concluded");
    events::broadcast_game_ended(
        state,
        room.id,
        room.phase,
        result,
        EndReason::Win,
        winner_id,
        winner.map(|(_, stone)| stone),
    );

    Ok(Conclusion {
        result,
        winner_id,
        winning_stone: winner.map(|(_, stone)| stone),
    })
}

/// End a live match by forfeit. The departing or surrendering participant
/// loses, the remaining one wins, and the room moves to the matching ended
/// phase. A mid-game leave additionally removes the forfeiting seat row.
pub async fn forfeit(
    state: &SharedState,
    room: &mut RoomEntity,
    forfeiter_id: Uuid,
    event: LifecycleEvent,
) -> Result<Conclusion, GameError> {
    let reason = match event {
        LifecycleEvent::Leave => EndReason::Leave,
        LifecycleEvent::Surrender => EndReason::Surrender,
        _ => {
            return Err(GameError::Inconsistent(format!(
                "{event:?} is not a forfeit event"
            )));
        }
    };

    let now = SystemTime::now();
    let mut game_match = state
        .store()
        .ongoing_match(room.id)
        .await?
        .ok_or(GameError::NoOngoingMatch)?;

    let (winner_id, winning_stone) = if game_match.first_player_id == forfeiter_id {
        (game_match.second_player_id, Stone::Second)
    } else if game_match.second_player_id == forfeiter_id {
        (game_match.first_player_id, Stone::First)
    } else {
        return Err(GameError::NotASeatHolder);
    };

    let result = match winning_stone {
        Stone::First => MatchResult::FirstWin,
        Stone::Second => MatchResult::SecondWin,
    };
    game_match.result = result;
    game_match.ended_at = Some(now);
    state.store().update_match(game_match).await?;

    let next = lifecycle::advance(room.phase, event)?;
    room.set_phase(next);
    room.game_ended_at = Some(now);
    state.store().update_room(room.clone()).await?;

    let seats = state.store().seats_in_room(room.id).await?;
    for mut seat in seats {
        seat.ready_state = ReadyState::NotReady;
        if seat.player_id == forfeiter_id {
            seat.game_result = SeatResult::Lose;
            state.store().update_seat(seat).await?;
        } else {
            seat.game_result = SeatResult::Win;
            state.store().update_seat(seat).await?;
        }
    }
    if reason == EndReason::Leave {
        // The forfeiting seat row is removed so the room can never satisfy
        // the two-seat rematch precondition again.
        state.store().delete_seat(room.id, forfeiter_id).await?;
    }

    append_history_record(
        state,
        HistoryRecordEntity {
            room_id: room.id,
            winner_id: Some(winner_id),
            loser_id: Some(forfeiter_id),
            reason,
            started_at: room.game_started_at,
            ended_at: now,
        },
    )
    .await;

    info!(room_id = %room.id, %forfeiter_id, ?reason, "match ended by forfeit");
    events::broadcast_game_ended(
        state,
        room.id,
        room.phase,
        result,
        reason,
        Some(winner_id),
        Some(winning_stone),
    );

    Ok(Conclusion {
        result,
        winner_id: Some(winner_id),
        winning_stone: Some(winning_stone),
    })
}

/// History writes never fail the surrounding transition; a storage error is
/// logged and the record is lost.
async fn append_history_record(state: &SharedState, record: HistoryRecordEntity) {
    let room_id = record.room_id;
    if let Err(err) = state.store().append_history(record).await {
        warn!(%room_id, error = %err, "failed to append history record");
    }
}
