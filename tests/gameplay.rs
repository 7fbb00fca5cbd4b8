//! Gameplay scenarios: turn arbitration, win and forfeit handling, and the
//! integrity of the persisted move log.

mod common;

use std::time::SystemTime;

use uuid::Uuid;

use gomoku_back::{
    dao::models::{EndReason, MatchResult, MoveEntity, RoomPhase, RoomStatus, SeatResult},
    dto::rooms::MoveRequest,
    error::GameError,
    services::{match_service, room_service},
};

#[tokio::test]
async fn five_in_a_row_finishes_the_room() {
    let state = common::state();
    let (room_id, host, guest) = common::playing_room(&state).await;

    common::play_host_win(&state, room_id, host, guest).await;

    let snapshot = room_service::get_room(&state, room_id).await.unwrap();
    assert_eq!(snapshot.phase, RoomPhase::Finished);
    assert_eq!(snapshot.status, RoomStatus::Finished);
    assert!(snapshot.game_ended_at.is_some());

    let host_seat = snapshot
        .seats
        .iter()
        .find(|seat| seat.player_id == host)
        .unwrap();
    let guest_seat = snapshot
        .seats
        .iter()
        .find(|seat| seat.player_id == guest)
        .unwrap();
    assert_eq!(host_seat.game_result, SeatResult::Win);
    assert_eq!(guest_seat.game_result, SeatResult::Lose);

    let game_match = state.store().ongoing_match(room_id).await.unwrap();
    assert!(game_match.is_none(), "no live match may remain");

    let history = state.store().history_for_room(room_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].winner_id, Some(host));
    assert_eq!(history[0].loser_id, Some(guest));
    assert_eq!(history[0].reason, EndReason::Win);
}

#[tokio::test]
async fn winning_move_reports_the_outcome() {
    let state = common::state();
    let (room_id, host, guest) = common::playing_room(&state).await;

    for y in 0..4u8 {
        common::place(&state, room_id, host, 0, y).await;
        common::place(&state, room_id, guest, 1, y).await;
    }
    let outcome = match_service::submit_move(&state, room_id, host, MoveRequest { x: 0, y: 4 })
        .await
        .unwrap();

    assert_eq!(outcome.result, MatchResult::FirstWin);
    assert_eq!(outcome.winner_id, Some(host));
    assert_eq!(outcome.next_turn, None);
    assert_eq!(outcome.phase, RoomPhase::Finished);
    assert_eq!(outcome.move_number, 9);
    assert_eq!(outcome.board[4][0], 1);
}

#[tokio::test]
async fn filling_the_board_without_a_run_ends_in_a_draw() {
    let state = common::state();
    let (room_id, host, guest) = common::playing_room(&state).await;
    let match_id = state
        .store()
        .ongoing_match(room_id)
        .await
        .unwrap()
        .unwrap()
        .id;

    // Seed every cell except the center through the store. Replay colors a
    // stone by its move-number parity, so the eight cells around the center
    // take even (second-stone) numbers; every run through the final
    // placement then stops at length one.
    let blocked = [
        (6u8, 6u8),
        (7, 6),
        (8, 6),
        (6, 7),
        (8, 7),
        (6, 8),
        (7, 8),
        (8, 8),
    ];
    let mut odd_numbers = (1u32..=224).step_by(2);
    let mut even_numbers = (2u32..=224).step_by(2);
    for y in 0..15u8 {
        for x in 0..15u8 {
            if (x, y) == (7, 7) {
                continue;
            }
            let move_number = if blocked.contains(&(x, y)) {
                even_numbers.next().unwrap()
            } else {
                odd_numbers
                    .next()
                    .unwrap_or_else(|| even_numbers.next().unwrap())
            };
            let player_id = if move_number % 2 == 1 { host } else { guest };
            state
                .store()
                .insert_move(MoveEntity {
                    match_id,
                    player_id,
                    x,
                    y,
                    move_number,
                    created_at: SystemTime::now(),
                })
                .await
                .unwrap();
        }
    }
    assert_eq!(state.store().count_moves(match_id).await.unwrap(), 224);

    let outcome = match_service::submit_move(&state, room_id, host, MoveRequest { x: 7, y: 7 })
        .await
        .unwrap();

    assert_eq!(outcome.result, MatchResult::Draw);
    assert_eq!(outcome.winner_id, None);
    assert_eq!(outcome.next_turn, None);
    assert_eq!(outcome.phase, RoomPhase::Finished);
    assert_eq!(outcome.move_number, 225);

    let snapshot = room_service::get_room(&state, room_id).await.unwrap();
    assert_eq!(snapshot.phase, RoomPhase::Finished);
    assert!(
        snapshot
            .seats
            .iter()
            .all(|seat| seat.game_result == SeatResult::None),
        "a draw leaves no winner or loser on the seats"
    );

    let game_match = state.store().ongoing_match(room_id).await.unwrap();
    assert!(game_match.is_none(), "no live match may remain");

    let history = state.store().history_for_room(room_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].winner_id, None);
    assert_eq!(history[0].loser_id, None);
    assert_eq!(history[0].reason, EndReason::Win);
}

#[tokio::test]
async fn turns_alternate_starting_with_the_host() {
    let state = common::state();
    let (room_id, host, guest) = common::playing_room(&state).await;

    let premature =
        match_service::submit_move(&state, room_id, guest, MoveRequest { x: 7, y: 7 }).await;
    assert!(matches!(premature, Err(GameError::OutOfTurn)));

    let opening = match_service::submit_move(&state, room_id, host, MoveRequest { x: 7, y: 7 })
        .await
        .unwrap();
    assert_eq!(opening.next_turn, Some(guest));

    let double =
        match_service::submit_move(&state, room_id, host, MoveRequest { x: 8, y: 7 }).await;
    assert!(matches!(double, Err(GameError::OutOfTurn)));
}

#[tokio::test]
async fn rejected_moves_leave_the_log_untouched() {
    let state = common::state();
    let (room_id, host, guest) = common::playing_room(&state).await;

    common::place(&state, room_id, host, 7, 7).await;
    let match_id = state
        .store()
        .ongoing_match(room_id)
        .await
        .unwrap()
        .unwrap()
        .id;
    assert_eq!(state.store().count_moves(match_id).await.unwrap(), 1);

    let occupied =
        match_service::submit_move(&state, room_id, guest, MoveRequest { x: 7, y: 7 }).await;
    assert!(matches!(occupied, Err(GameError::IllegalCell { x: 7, y: 7 })));

    let out_of_bounds =
        match_service::submit_move(&state, room_id, guest, MoveRequest { x: 15, y: 0 }).await;
    assert!(matches!(out_of_bounds, Err(GameError::IllegalCell { .. })));

    let out_of_turn =
        match_service::submit_move(&state, room_id, host, MoveRequest { x: 8, y: 8 }).await;
    assert!(matches!(out_of_turn, Err(GameError::OutOfTurn)));

    assert_eq!(state.store().count_moves(match_id).await.unwrap(), 1);
}

#[tokio::test]
async fn outsiders_cannot_move() {
    let state = common::state();
    let (room_id, _, _) = common::playing_room(&state).await;

    let stranger = Uuid::new_v4();
    let rejected =
        match_service::submit_move(&state, room_id, stranger, MoveRequest { x: 0, y: 0 }).await;
    assert!(matches!(rejected, Err(GameError::NotASeatHolder)));
}

#[tokio::test]
async fn moves_require_a_live_match() {
    let state = common::state();
    let (room_id, host, _) = common::waiting_room(&state).await;

    let rejected =
        match_service::submit_move(&state, room_id, host, MoveRequest { x: 0, y: 0 }).await;
    assert!(matches!(rejected, Err(GameError::WrongPhase { .. })));
}

#[tokio::test]
async fn surrender_awards_the_opponent() {
    let state = common::state();
    let (room_id, host, guest) = common::playing_room(&state).await;

    common::place(&state, room_id, host, 7, 7).await;
    match_service::surrender(&state, room_id, guest).await.unwrap();

    let snapshot = room_service::get_room(&state, room_id).await.unwrap();
    assert_eq!(snapshot.phase, RoomPhase::EndedBySurrender);
    let host_seat = snapshot
        .seats
        .iter()
        .find(|seat| seat.player_id == host)
        .unwrap();
    assert_eq!(host_seat.game_result, SeatResult::Win);

    let history = state.store().history_for_room(room_id).await.unwrap();
    assert_eq!(history[0].reason, EndReason::Surrender);
    assert_eq!(history[0].winner_id, Some(host));
    assert_eq!(history[0].loser_id, Some(guest));

    // the concluded room accepts no further gameplay
    let rejected =
        match_service::submit_move(&state, room_id, host, MoveRequest { x: 0, y: 0 }).await;
    assert!(matches!(rejected, Err(GameError::WrongPhase { .. })));
}

#[tokio::test]
async fn leaving_mid_game_forfeits_and_vacates_the_seat() {
    let state = common::state();
    let (room_id, host, guest) = common::playing_room(&state).await;

    common::place(&state, room_id, host, 7, 7).await;
    room_service::leave_room(&state, room_id, guest).await.unwrap();

    let snapshot = room_service::get_room(&state, room_id).await.unwrap();
    assert_eq!(snapshot.phase, RoomPhase::EndedByLeave);
    assert_eq!(snapshot.seats.len(), 1, "the forfeiting seat row is removed");
    assert_eq!(snapshot.seats[0].player_id, host);
    assert_eq!(snapshot.seats[0].game_result, SeatResult::Win);

    let history = state.store().history_for_room(room_id).await.unwrap();
    assert_eq!(history[0].reason, EndReason::Leave);
    assert_eq!(history[0].loser_id, Some(guest));
}
