use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{HistoryRecordEntity, MatchEntity, MoveEntity, RoomEntity, SeatEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for rooms, seats, matches, move
/// logs, and history records.
///
/// Callers are expected to serialize mutating calls that target the same
/// room (the application holds a per-room gate); the store itself only
/// guarantees that each individual operation is atomic.
pub trait RoomStore: Send + Sync {
    /// Persist a new room, failing on a duplicate id.
    fn create_room(&self, room: RoomEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a room by id.
    fn find_room(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<RoomEntity>>>;
    /// Replace an existing room, failing when it is missing.
    fn update_room(&self, room: RoomEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Remove a room and its seats.
    fn delete_room(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>>;
    /// All rooms, unordered.
    fn list_rooms(&self) -> BoxFuture<'static, StorageResult<Vec<RoomEntity>>>;

    /// Persist a new seat, failing when (room, player) already exists.
    fn insert_seat(&self, seat: SeatEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Replace an existing seat, failing when it is missing.
    fn update_seat(&self, seat: SeatEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Remove a seat. The removal is applied before this future resolves,
    /// which is what the rematch coordinator relies on when it deletes old
    /// seats before inserting their replacements.
    fn delete_seat(&self, room_id: Uuid, player_id: Uuid)
    -> BoxFuture<'static, StorageResult<()>>;
    /// Seats of a room in join order.
    fn seats_in_room(&self, room_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<SeatEntity>>>;
    /// A specific seat by composite key.
    fn find_seat(
        &self,
        room_id: Uuid,
        player_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<SeatEntity>>>;
    /// Every seat held by a participant across all rooms.
    fn seats_for_player(
        &self,
        player_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<SeatEntity>>>;

    /// Persist a new match, failing on a duplicate id.
    fn create_match(&self, game_match: MatchEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Replace an existing match, failing when it is missing.
    fn update_match(&self, game_match: MatchEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// The room's match whose result is still ONGOING, if any.
    fn ongoing_match(
        &self,
        room_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>>;

    /// Append a move to a match's log.
    fn insert_move(&self, game_move: MoveEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Moves of a match ordered by move number.
    fn moves_in_match(&self, match_id: Uuid)
    -> BoxFuture<'static, StorageResult<Vec<MoveEntity>>>;
    /// Number of moves persisted for a match. Read fresh at validation time
    /// by the turn arbiter.
    fn count_moves(&self, match_id: Uuid) -> BoxFuture<'static, StorageResult<u64>>;

    /// Append a history record; append-only, never updated.
    fn append_history(
        &self,
        record: HistoryRecordEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// History records written for a room.
    fn history_for_room(
        &self,
        room_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<HistoryRecordEntity>>>;

    /// Cheap liveness check used by the health endpoint.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
