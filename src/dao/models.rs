use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Who may join a room without an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomVisibility {
    /// Anyone can take the open seat.
    Public,
    /// Joining requires the room's join code.
    Private,
}

/// Coarse room bucket used for "is this room active" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    /// Gathering players or waiting on the ready handshake.
    Waiting,
    /// A match is in progress.
    Playing,
    /// The room's match concluded; the room is retained as history.
    Finished,
}

/// Fine-grained phase driving the room state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomPhase {
    /// Fewer than two seats are taken.
    WaitingForPlayers,
    /// Both seats are taken; waiting for both ready flags.
    WaitingForReady,
    /// The match is live.
    InProgress,
    /// The match concluded with a win or a draw.
    Finished,
    /// A participant left mid-match and forfeited.
    EndedByLeave,
    /// A participant surrendered.
    EndedBySurrender,
}

impl RoomPhase {
    /// Whether gameplay in this room is over.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RoomPhase::Finished | RoomPhase::EndedByLeave | RoomPhase::EndedBySurrender
        )
    }

    /// Named rematch eligibility policy: a room that ended by a mid-game
    /// leave is excluded because the LEAVE forfeit removes the departing
    /// seat row, so the two-seat precondition can never hold again.
    pub fn allows_rematch(self) -> bool {
        matches!(self, RoomPhase::Finished | RoomPhase::EndedBySurrender)
    }

    /// Coarse status implied by this phase. The two fields are always
    /// written together, derived from the same phase value, so they cannot
    /// drift apart.
    pub fn status(self) -> RoomStatus {
        match self {
            RoomPhase::WaitingForPlayers | RoomPhase::WaitingForReady => RoomStatus::Waiting,
            RoomPhase::InProgress => RoomStatus::Playing,
            RoomPhase::Finished | RoomPhase::EndedByLeave | RoomPhase::EndedBySurrender => {
                RoomStatus::Finished
            }
        }
    }
}

/// Progress of the two-phase rematch handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RematchState {
    /// No rematch has been requested.
    None,
    /// One participant requested a rematch and awaits the other.
    Requested,
    /// The successor room has been created.
    Created,
}

/// Ready handshake progress for a single seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadyState {
    /// Seated but not ready.
    NotReady,
    /// Ready to start.
    Ready,
    /// The match started with this seat participating.
    InGame,
}

/// Terminal outcome recorded on a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatResult {
    /// No outcome yet.
    None,
    /// This seat won the match.
    Win,
    /// This seat lost the match.
    Lose,
}

/// Terminal result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchResult {
    /// The match is still being played.
    Ongoing,
    /// The first (opening) stone won.
    FirstWin,
    /// The second stone won.
    SecondWin,
    /// All 225 cells filled without a winning run.
    Draw,
    /// Closed without a result when a stale ongoing match was found at the
    /// only legitimate match-creation site (ready-handshake completion).
    Abandoned,
}

/// Why a concluded room ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndReason {
    /// Completed normally (win, or draw by convention).
    Win,
    /// A participant surrendered.
    Surrender,
    /// A participant left mid-match.
    Leave,
}

/// Aggregate room entity persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomEntity {
    /// Primary key of the room.
    pub id: Uuid,
    /// Display name shown in room lists.
    pub name: String,
    /// Public or private visibility.
    pub visibility: RoomVisibility,
    /// Join code, present only for private rooms.
    pub join_code: Option<String>,
    /// Coarse status bucket; always derived from `phase`.
    pub status: RoomStatus,
    /// Fine-grained lifecycle phase.
    pub phase: RoomPhase,
    /// Progress of the rematch handshake.
    pub rematch_state: RematchState,
    /// Participant who requested the pending rematch, if any.
    pub rematch_requested_by: Option<Uuid>,
    /// Room spawned by a completed rematch handshake, if any.
    pub successor_room_id: Option<Uuid>,
    /// Participant who created the room.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Stamped when the match starts.
    pub game_started_at: Option<SystemTime>,
    /// Stamped when the match ends, for any reason.
    pub game_ended_at: Option<SystemTime>,
}

impl RoomEntity {
    /// Build a fresh room in the waiting-for-players phase.
    pub fn new(
        name: String,
        visibility: RoomVisibility,
        join_code: Option<String>,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            visibility,
            join_code,
            status: RoomPhase::WaitingForPlayers.status(),
            phase: RoomPhase::WaitingForPlayers,
            rematch_state: RematchState::None,
            rematch_requested_by: None,
            successor_room_id: None,
            created_by,
            created_at: SystemTime::now(),
            game_started_at: None,
            game_ended_at: None,
        }
    }

    /// Move the room to a new phase, keeping the coarse status in lockstep.
    pub fn set_phase(&mut self, phase: RoomPhase) {
        self.phase = phase;
        self.status = phase.status();
    }
}

/// A participant's membership slot in a room. Composite identity
/// (room, player); at most two per room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatEntity {
    /// Room this seat belongs to.
    pub room_id: Uuid,
    /// Participant occupying the seat.
    pub player_id: Uuid,
    /// Exactly one host seat exists while the room has any seats.
    pub is_host: bool,
    /// Ready handshake progress.
    pub ready_state: ReadyState,
    /// Terminal outcome recorded on this seat.
    pub game_result: SeatResult,
    /// Whether this seat accepted the pending rematch.
    pub accepted_rematch: bool,
    /// When the participant took the seat; breaks host-promotion ties.
    pub joined_at: SystemTime,
}

impl SeatEntity {
    /// Build a fresh, not-ready seat.
    pub fn new(room_id: Uuid, player_id: Uuid, is_host: bool) -> Self {
        Self {
            room_id,
            player_id,
            is_host,
            ready_state: ReadyState::NotReady,
            game_result: SeatResult::None,
            accepted_rematch: false,
            joined_at: SystemTime::now(),
        }
    }
}

/// One playthrough of the board game within a room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEntity {
    /// Primary key of the match.
    pub id: Uuid,
    /// Room the match belongs to.
    pub room_id: Uuid,
    /// Participant assigned the first (opening) stone.
    pub first_player_id: Uuid,
    /// Participant assigned the second stone.
    pub second_player_id: Uuid,
    /// Terminal result; at most one ONGOING match exists per room.
    pub result: MatchResult,
    /// When the match started.
    pub started_at: SystemTime,
    /// When the match ended, for any reason.
    pub ended_at: Option<SystemTime>,
}

impl MatchEntity {
    /// Build an ongoing match with the given stone assignments.
    pub fn new(room_id: Uuid, first_player_id: Uuid, second_player_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            first_player_id,
            second_player_id,
            result: MatchResult::Ongoing,
            started_at: SystemTime::now(),
            ended_at: None,
        }
    }
}

/// A single placement in a match's move log. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveEntity {
    /// Match the move belongs to.
    pub match_id: Uuid,
    /// Participant who placed the stone.
    pub player_id: Uuid,
    /// Column, `0 <= x < 15`.
    pub x: u8,
    /// Row, `0 <= y < 15`.
    pub y: u8,
    /// 1-based sequence number, unique per match.
    pub move_number: u32,
    /// When the move was persisted.
    pub created_at: SystemTime,
}

/// Append-only record of a concluded room, written at the same terminal
/// transition that finishes the room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecordEntity {
    /// Room the record describes.
    pub room_id: Uuid,
    /// Winner, absent for a draw.
    pub winner_id: Option<Uuid>,
    /// Loser, absent for a draw.
    pub loser_id: Option<Uuid>,
    /// Why the room ended.
    pub reason: EndReason,
    /// When the match started, if it did.
    pub started_at: Option<SystemTime>,
    /// When the room ended.
    pub ended_at: SystemTime,
}
