//! Room lifecycle scenarios: creation, joining, readiness, and leaving
//! before the match starts.

mod common;

use uuid::Uuid;

use gomoku_back::{
    dao::models::{ReadyState, RoomPhase, RoomStatus, RoomVisibility},
    dto::rooms::{CreateRoomRequest, JoinRoomRequest},
    error::GameError,
    services::room_service,
};

#[tokio::test]
async fn creating_a_room_seats_the_creator_as_host() {
    let state = common::state();
    let host = Uuid::new_v4();

    let created = room_service::create_room(
        &state,
        host,
        CreateRoomRequest {
            name: "arena".into(),
            visibility: RoomVisibility::Public,
        },
    )
    .await
    .unwrap();

    assert_eq!(created.room.phase, RoomPhase::WaitingForPlayers);
    assert_eq!(created.room.status, RoomStatus::Waiting);
    assert!(created.join_code.is_none());
    assert_eq!(created.room.seats.len(), 1);
    assert_eq!(created.room.seats[0].player_id, host);
    assert!(created.room.seats[0].is_host);
}

#[tokio::test]
async fn private_rooms_require_the_join_code() {
    let state = common::state();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();

    let created = room_service::create_room(
        &state,
        host,
        CreateRoomRequest {
            name: "hidden".into(),
            visibility: RoomVisibility::Private,
        },
    )
    .await
    .unwrap();
    let code = created.join_code.expect("private rooms get a code");

    let rejected = room_service::join_room(
        &state,
        created.room.id,
        guest,
        JoinRoomRequest {
            join_code: Some("WRONG1".into()),
        },
    )
    .await;
    assert!(matches!(rejected, Err(GameError::WrongJoinCode)));

    let missing =
        room_service::join_room(&state, created.room.id, guest, JoinRoomRequest::default()).await;
    assert!(matches!(missing, Err(GameError::WrongJoinCode)));

    let joined = room_service::join_room(
        &state,
        created.room.id,
        guest,
        JoinRoomRequest {
            join_code: Some(code),
        },
    )
    .await
    .unwrap();
    assert_eq!(joined.phase, RoomPhase::WaitingForReady);
}

#[tokio::test]
async fn second_join_fills_the_room() {
    let state = common::state();
    let (room_id, _, _) = common::waiting_room(&state).await;

    let snapshot = room_service::get_room(&state, room_id).await.unwrap();
    assert_eq!(snapshot.phase, RoomPhase::WaitingForReady);
    assert_eq!(snapshot.seats.len(), 2);

    let third = Uuid::new_v4();
    let rejected =
        room_service::join_room(&state, room_id, third, JoinRoomRequest::default()).await;
    assert!(matches!(rejected, Err(GameError::RoomFull)));
}

#[tokio::test]
async fn joining_a_live_room_is_a_phase_error() {
    let state = common::state();
    let (room_id, _, _) = common::playing_room(&state).await;

    let third = Uuid::new_v4();
    let rejected =
        room_service::join_room(&state, room_id, third, JoinRoomRequest::default()).await;
    assert!(matches!(
        rejected,
        Err(GameError::WrongPhase {
            phase: RoomPhase::InProgress
        })
    ));
}

#[tokio::test]
async fn a_player_holds_at_most_one_active_seat() {
    let state = common::state();
    let (_, host, guest) = common::waiting_room(&state).await;

    let request = CreateRoomRequest {
        name: "second front".into(),
        visibility: RoomVisibility::Public,
    };
    let rejected = room_service::create_room(&state, host, request).await;
    assert!(matches!(rejected, Err(GameError::AlreadySeatedElsewhere)));

    let other = room_service::create_room(
        &state,
        Uuid::new_v4(),
        CreateRoomRequest {
            name: "other".into(),
            visibility: RoomVisibility::Public,
        },
    )
    .await
    .unwrap();
    let rejected =
        room_service::join_room(&state, other.room.id, guest, JoinRoomRequest::default()).await;
    assert!(matches!(rejected, Err(GameError::AlreadySeatedElsewhere)));
}

#[tokio::test]
async fn simultaneous_joins_grant_a_single_seat() {
    let state = common::state();

    for _ in 0..16 {
        let room_a = room_service::create_room(
            &state,
            Uuid::new_v4(),
            CreateRoomRequest {
                name: "left".into(),
                visibility: RoomVisibility::Public,
            },
        )
        .await
        .unwrap()
        .room
        .id;
        let room_b = room_service::create_room(
            &state,
            Uuid::new_v4(),
            CreateRoomRequest {
                name: "right".into(),
                visibility: RoomVisibility::Public,
            },
        )
        .await
        .unwrap()
        .room
        .id;

        let player = Uuid::new_v4();
        let left = tokio::spawn({
            let state = state.clone();
            async move {
                room_service::join_room(&state, room_a, player, JoinRoomRequest::default()).await
            }
        });
        let right = tokio::spawn({
            let state = state.clone();
            async move {
                room_service::join_room(&state, room_b, player, JoinRoomRequest::default()).await
            }
        });
        let outcomes = [left.await.unwrap(), right.await.unwrap()];

        assert_eq!(
            outcomes.iter().filter(|outcome| outcome.is_ok()).count(),
            1,
            "exactly one of the racing joins may win"
        );
        for outcome in &outcomes {
            if let Err(err) = outcome {
                assert!(matches!(err, GameError::AlreadySeatedElsewhere));
            }
        }
        let seats = state.store().seats_for_player(player).await.unwrap();
        assert_eq!(seats.len(), 1);
    }
}

#[tokio::test]
async fn creating_while_joining_grants_a_single_seat() {
    let state = common::state();

    for _ in 0..16 {
        let open_room = room_service::create_room(
            &state,
            Uuid::new_v4(),
            CreateRoomRequest {
                name: "open".into(),
                visibility: RoomVisibility::Public,
            },
        )
        .await
        .unwrap()
        .room
        .id;

        let player = Uuid::new_v4();
        let joining = tokio::spawn({
            let state = state.clone();
            async move {
                room_service::join_room(&state, open_room, player, JoinRoomRequest::default())
                    .await
                    .map(|_| ())
            }
        });
        let creating = tokio::spawn({
            let state = state.clone();
            async move {
                room_service::create_room(
                    &state,
                    player,
                    CreateRoomRequest {
                        name: "own".into(),
                        visibility: RoomVisibility::Public,
                    },
                )
                .await
                .map(|_| ())
            }
        });
        let outcomes = [joining.await.unwrap(), creating.await.unwrap()];

        assert_eq!(
            outcomes.iter().filter(|outcome| outcome.is_ok()).count(),
            1,
            "exactly one of the racing seat takers may win"
        );
        let seats = state.store().seats_for_player(player).await.unwrap();
        assert_eq!(seats.len(), 1);
    }
}

#[tokio::test]
async fn readiness_of_both_seats_starts_the_match() {
    let state = common::state();
    let (room_id, host, guest) = common::waiting_room(&state).await;

    let after_one = room_service::mark_ready(&state, room_id, host).await.unwrap();
    assert_eq!(after_one.phase, RoomPhase::WaitingForReady);

    let after_both = room_service::mark_ready(&state, room_id, guest)
        .await
        .unwrap();
    assert_eq!(after_both.phase, RoomPhase::InProgress);
    assert_eq!(after_both.status, RoomStatus::Playing);
    assert!(after_both.game_started_at.is_some());
    assert!(
        after_both
            .seats
            .iter()
            .all(|seat| seat.ready_state == ReadyState::InGame)
    );

    let game_match = state.store().ongoing_match(room_id).await.unwrap().unwrap();
    assert_eq!(game_match.first_player_id, host);
    assert_eq!(game_match.second_player_id, guest);
}

#[tokio::test]
async fn ready_outside_the_handshake_is_rejected() {
    let state = common::state();
    let host = Uuid::new_v4();
    let created = room_service::create_room(
        &state,
        host,
        CreateRoomRequest {
            name: "lonely".into(),
            visibility: RoomVisibility::Public,
        },
    )
    .await
    .unwrap();

    let rejected = room_service::mark_ready(&state, created.room.id, host).await;
    assert!(matches!(rejected, Err(GameError::WrongPhase { .. })));
}

#[tokio::test]
async fn host_departure_promotes_the_remaining_seat() {
    let state = common::state();
    let (room_id, host, guest) = common::waiting_room(&state).await;

    room_service::mark_ready(&state, room_id, guest).await.unwrap();
    room_service::leave_room(&state, room_id, host).await.unwrap();

    let snapshot = room_service::get_room(&state, room_id).await.unwrap();
    assert_eq!(snapshot.phase, RoomPhase::WaitingForPlayers);
    assert_eq!(snapshot.seats.len(), 1);
    assert_eq!(snapshot.seats[0].player_id, guest);
    assert!(snapshot.seats[0].is_host);
    // the handshake restarts from scratch for the promoted seat
    assert_eq!(snapshot.seats[0].ready_state, ReadyState::NotReady);
}

#[tokio::test]
async fn last_seat_leaving_deletes_the_room() {
    let state = common::state();
    let host = Uuid::new_v4();
    let created = room_service::create_room(
        &state,
        host,
        CreateRoomRequest {
            name: "ephemeral".into(),
            visibility: RoomVisibility::Public,
        },
    )
    .await
    .unwrap();

    room_service::leave_room(&state, created.room.id, host)
        .await
        .unwrap();

    let rejected = room_service::get_room(&state, created.room.id).await;
    assert!(matches!(rejected, Err(GameError::RoomNotFound(_))));
}

#[tokio::test]
async fn leaving_without_a_seat_is_rejected() {
    let state = common::state();
    let (room_id, _, _) = common::waiting_room(&state).await;

    let stranger = Uuid::new_v4();
    let rejected = room_service::leave_room(&state, room_id, stranger).await;
    assert!(matches!(rejected, Err(GameError::NotASeatHolder)));
}
