#![allow(dead_code)]

use std::sync::Arc;

use uuid::Uuid;

use gomoku_back::{
    config::AppConfig,
    dao::memory::MemoryRoomStore,
    dto::rooms::{CreateRoomRequest, JoinRoomRequest, MoveRequest},
    state::{AppState, SharedState},
};
use gomoku_back::dao::models::RoomVisibility;
use gomoku_back::services::{match_service, room_service};

pub fn state() -> SharedState {
    AppState::new(AppConfig::default(), Arc::new(MemoryRoomStore::new()))
}

/// A public room with a host and a second seated player, still in the ready
/// handshake.
pub async fn waiting_room(state: &SharedState) -> (Uuid, Uuid, Uuid) {
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();

    let created = room_service::create_room(
        state,
        host,
        CreateRoomRequest {
            name: "arena".into(),
            visibility: RoomVisibility::Public,
        },
    )
    .await
    .expect("create room");

    room_service::join_room(state, created.room.id, guest, JoinRoomRequest::default())
        .await
        .expect("join room");

    (created.room.id, host, guest)
}

/// A room whose match has started. The host plays the first stone.
pub async fn playing_room(state: &SharedState) -> (Uuid, Uuid, Uuid) {
    let (room_id, host, guest) = waiting_room(state).await;
    room_service::mark_ready(state, room_id, host)
        .await
        .expect("host ready");
    room_service::mark_ready(state, room_id, guest)
        .await
        .expect("guest ready");
    (room_id, host, guest)
}

pub async fn place(state: &SharedState, room_id: Uuid, player: Uuid, x: u8, y: u8) {
    match_service::submit_move(state, room_id, player, MoveRequest { x, y })
        .await
        .expect("legal move");
}

/// Drive the host to a vertical five-in-a-row in column 0 while the guest
/// answers in column 1. The final host move wins the match.
pub async fn play_host_win(state: &SharedState, room_id: Uuid, host: Uuid, guest: Uuid) {
    for y in 0..4u8 {
        place(state, room_id, host, 0, y).await;
        place(state, room_id, guest, 1, y).await;
    }
    place(state, room_id, host, 0, 4).await;
}
