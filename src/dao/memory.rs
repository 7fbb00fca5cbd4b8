//! `DashMap`-backed store used by the binary and the test-suite. Every
//! operation completes synchronously; the trait's futures resolve
//! immediately, so a removal is always visible before the next call starts.

use dashmap::DashMap;
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use uuid::Uuid;

use crate::dao::models::{
    HistoryRecordEntity, MatchEntity, MatchResult, MoveEntity, RoomEntity, SeatEntity,
};
use crate::dao::storage::{StorageError, StorageResult};
use crate::dao::store::RoomStore;

/// In-memory room store keyed the same way a database backend would be.
#[derive(Default)]
pub struct MemoryRoomStore {
    rooms: DashMap<Uuid, RoomEntity>,
    /// Seats per room, kept in join order.
    seats: DashMap<Uuid, Vec<SeatEntity>>,
    matches: DashMap<Uuid, MatchEntity>,
    /// Move log per match, kept in move-number order.
    moves: DashMap<Uuid, Vec<MoveEntity>>,
    history: DashMap<Uuid, Vec<HistoryRecordEntity>>,
}

impl MemoryRoomStore {
    /// Fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn done<T: Send + 'static>(result: StorageResult<T>) -> BoxFuture<'static, StorageResult<T>> {
    future::ready(result).boxed()
}

impl RoomStore for MemoryRoomStore {
    fn create_room(&self, room: RoomEntity) -> BoxFuture<'static, StorageResult<()>> {
        let result = if self.rooms.contains_key(&room.id) {
            Err(StorageError::Duplicate(format!("room {}", room.id)))
        } else {
            self.rooms.insert(room.id, room);
            Ok(())
        };
        done(result)
    }

    fn find_room(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<RoomEntity>>> {
        done(Ok(self.rooms.get(&id).map(|entry| entry.clone())))
    }

    fn update_room(&self, room: RoomEntity) -> BoxFuture<'static, StorageResult<()>> {
        let result = match self.rooms.get_mut(&room.id) {
            Some(mut entry) => {
                *entry = room;
                Ok(())
            }
            None => Err(StorageError::Missing(format!("room {}", room.id))),
        };
        done(result)
    }

    fn delete_room(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>> {
        let result = match self.rooms.remove(&id) {
            Some(_) => {
                self.seats.remove(&id);
                Ok(())
            }
            None => Err(StorageError::Missing(format!("room {id}"))),
        };
        done(result)
    }

    fn list_rooms(&self) -> BoxFuture<'static, StorageResult<Vec<RoomEntity>>> {
        done(Ok(self
            .rooms
            .iter()
            .map(|entry| entry.value().clone())
            .collect()))
    }

    fn insert_seat(&self, seat: SeatEntity) -> BoxFuture<'static, StorageResult<()>> {
        let mut seats = self.seats.entry(seat.room_id).or_default();
        let result = if seats.iter().any(|s| s.player_id == seat.player_id) {
            Err(StorageError::Duplicate(format!(
                "seat ({}, {})",
                seat.room_id, seat.player_id
            )))
        } else {
            seats.push(seat);
            Ok(())
        };
        drop(seats);
        done(result)
    }

    fn update_seat(&self, seat: SeatEntity) -> BoxFuture<'static, StorageResult<()>> {
        let result = match self.seats.get_mut(&seat.room_id) {
            Some(mut seats) => match seats.iter_mut().find(|s| s.player_id == seat.player_id) {
                Some(slot) => {
                    *slot = seat;
                    Ok(())
                }
                None => Err(StorageError::Missing(format!(
                    "seat ({}, {})",
                    seat.room_id, seat.player_id
                ))),
            },
            None => Err(StorageError::Missing(format!("room {}", seat.room_id))),
        };
        done(result)
    }

    fn delete_seat(
        &self,
        room_id: Uuid,
        player_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let result = match self.seats.get_mut(&room_id) {
            Some(mut seats) => {
                let before = seats.len();
                seats.retain(|s| s.player_id != player_id);
                if seats.len() == before {
                    Err(StorageError::Missing(format!(
                        "seat ({room_id}, {player_id})"
                    )))
                } else {
                    Ok(())
                }
            }
            None => Err(StorageError::Missing(format!("room {room_id}"))),
        };
        done(result)
    }

    fn seats_in_room(&self, room_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<SeatEntity>>> {
        done(Ok(self
            .seats
            .get(&room_id)
            .map(|seats| seats.clone())
            .unwrap_or_default()))
    }

    fn find_seat(
        &self,
        room_id: Uuid,
        player_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<SeatEntity>>> {
        done(Ok(self.seats.get(&room_id).and_then(|seats| {
            seats.iter().find(|s| s.player_id == player_id).cloned()
        })))
    }

    fn seats_for_player(
        &self,
        player_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<SeatEntity>>> {
        done(Ok(self
            .seats
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|s| s.player_id == player_id)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect()))
    }

    fn create_match(&self, game_match: MatchEntity) -> BoxFuture<'static, StorageResult<()>> {
        let result = if self.matches.contains_key(&game_match.id) {
            Err(StorageError::Duplicate(format!("match {}", game_match.id)))
        } else {
            self.matches.insert(game_match.id, game_match);
            Ok(())
        };
        done(result)
    }

    fn update_match(&self, game_match: MatchEntity) -> BoxFuture<'static, StorageResult<()>> {
        let result = match self.matches.get_mut(&game_match.id) {
            Some(mut entry) => {
                *entry = game_match;
                Ok(())
            }
            None => Err(StorageError::Missing(format!("match {}", game_match.id))),
        };
        done(result)
    }

    fn ongoing_match(
        &self,
        room_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        done(Ok(self
            .matches
            .iter()
            .find(|entry| {
                entry.value().room_id == room_id && entry.value().result == MatchResult::Ongoing
            })
            .map(|entry| entry.value().clone())))
    }

    fn insert_move(&self, game_move: MoveEntity) -> BoxFuture<'static, StorageResult<()>> {
        let mut moves = self.moves.entry(game_move.match_id).or_default();
        let result = if moves.iter().any(|m| m.move_number == game_move.move_number) {
            Err(StorageError::Duplicate(format!(
                "move {} of match {}",
                game_move.move_number, game_move.match_id
            )))
        } else {
            moves.push(game_move);
            Ok(())
        };
        drop(moves);
        done(result)
    }

    fn moves_in_match(
        &self,
        match_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MoveEntity>>> {
        done(Ok(self
            .moves
            .get(&match_id)
            .map(|moves| moves.clone())
            .unwrap_or_default()))
    }

    fn count_moves(&self, match_id: Uuid) -> BoxFuture<'static, StorageResult<u64>> {
        done(Ok(self
            .moves
            .get(&match_id)
            .map(|moves| moves.len() as u64)
            .unwrap_or(0)))
    }

    fn append_history(
        &self,
        record: HistoryRecordEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.history.entry(record.room_id).or_default().push(record);
        done(Ok(()))
    }

    fn history_for_room(
        &self,
        room_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<HistoryRecordEntity>>> {
        done(Ok(self
            .history
            .get(&room_id)
            .map(|records| records.clone())
            .unwrap_or_default()))
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        done(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::RoomVisibility;

    fn room(created_by: Uuid) -> RoomEntity {
        RoomEntity::new("test room".into(), RoomVisibility::Public, None, created_by)
    }

    #[tokio::test]
    async fn room_roundtrip_and_duplicate_rejection() {
        let store = MemoryRoomStore::new();
        let entity = room(Uuid::new_v4());
        store.create_room(entity.clone()).await.unwrap();
        assert_eq!(store.find_room(entity.id).await.unwrap(), Some(entity.clone()));
        assert!(matches!(
            store.create_room(entity).await,
            Err(StorageError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn seats_keep_join_order_and_reject_duplicates() {
        let store = MemoryRoomStore::new();
        let entity = room(Uuid::new_v4());
        let (host, guest) = (Uuid::new_v4(), Uuid::new_v4());
        store.create_room(entity.clone()).await.unwrap();
        store
            .insert_seat(SeatEntity::new(entity.id, host, true))
            .await
            .unwrap();
        store
            .insert_seat(SeatEntity::new(entity.id, guest, false))
            .await
            .unwrap();

        let seats = store.seats_in_room(entity.id).await.unwrap();
        assert_eq!(seats.len(), 2);
        assert_eq!(seats[0].player_id, host);
        assert_eq!(seats[1].player_id, guest);

        assert!(matches!(
            store
                .insert_seat(SeatEntity::new(entity.id, host, false))
                .await,
            Err(StorageError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn seats_for_player_spans_rooms() {
        let store = MemoryRoomStore::new();
        let player = Uuid::new_v4();
        let (a, b) = (room(player), room(player));
        store.create_room(a.clone()).await.unwrap();
        store.create_room(b.clone()).await.unwrap();
        store
            .insert_seat(SeatEntity::new(a.id, player, true))
            .await
            .unwrap();
        store
            .insert_seat(SeatEntity::new(b.id, player, true))
            .await
            .unwrap();

        assert_eq!(store.seats_for_player(player).await.unwrap().len(), 2);
        store.delete_seat(a.id, player).await.unwrap();
        assert_eq!(store.seats_for_player(player).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn move_log_counts_and_orders() {
        let store = MemoryRoomStore::new();
        let game_match = MatchEntity::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        store.create_match(game_match.clone()).await.unwrap();

        for (number, x) in [(1u32, 7u8), (2, 8)] {
            store
                .insert_move(MoveEntity {
                    match_id: game_match.id,
                    player_id: Uuid::new_v4(),
                    x,
                    y: 7,
                    move_number: number,
                    created_at: std::time::SystemTime::now(),
                })
                .await
                .unwrap();
        }

        assert_eq!(store.count_moves(game_match.id).await.unwrap(), 2);
        let moves = store.moves_in_match(game_match.id).await.unwrap();
        assert_eq!(moves[0].move_number, 1);
        assert_eq!(moves[1].move_number, 2);
    }

    #[tokio::test]
    async fn ongoing_match_ignores_finished_ones() {
        let store = MemoryRoomStore::new();
        let room_id = Uuid::new_v4();
        let mut finished = MatchEntity::new(room_id, Uuid::new_v4(), Uuid::new_v4());
        finished.result = MatchResult::FirstWin;
        store.create_match(finished).await.unwrap();
        assert!(store.ongoing_match(room_id).await.unwrap().is_none());

        let live = MatchEntity::new(room_id, Uuid::new_v4(), Uuid::new_v4());
        store.create_match(live.clone()).await.unwrap();
        assert_eq!(store.ongoing_match(room_id).await.unwrap(), Some(live));
    }
}
