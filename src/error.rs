//! Error layering: typed gameplay errors surfaced by the services, and
//! their HTTP projection at the request boundary.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::dao::models::RoomPhase;
use crate::dao::storage::StorageError;
use crate::state::lifecycle::InvalidTransition;

/// Errors surfaced by the room, match, and rematch services. None of these
/// are retried internally; every one propagates unchanged to the caller.
#[derive(Debug, Error)]
pub enum GameError {
    /// The referenced room does not exist.
    #[error("room `{0}` not found")]
    RoomNotFound(uuid::Uuid),
    /// Both seats are already occupied.
    #[error("room is full")]
    RoomFull,
    /// The participant already holds a seat in another active room.
    #[error("player already holds a seat in an active room")]
    AlreadySeatedElsewhere,
    /// The participant already holds a seat in this room.
    #[error("player is already seated in this room")]
    AlreadySeated,
    /// The participant holds no seat in this room.
    #[error("player holds no seat in this room")]
    NotASeatHolder,
    /// The operation is not permitted in the room's current phase.
    #[error("operation not allowed while the room is {phase:?}")]
    WrongPhase {
        /// Phase the room was in.
        phase: RoomPhase,
    },
    /// A private room was joined with a missing or incorrect code.
    #[error("join code does not match")]
    WrongJoinCode,
    /// The submitting participant is not the one entitled to move.
    #[error("it is not this player's turn")]
    OutOfTurn,
    /// The targeted cell is out of bounds or occupied.
    #[error("cell ({x}, {y}) is out of bounds or occupied")]
    IllegalCell {
        /// Column of the rejected cell.
        x: u8,
        /// Row of the rejected cell.
        y: u8,
    },
    /// The room claims to be playing but holds no ongoing match. Surfaced
    /// as an internal-consistency error instead of silently repaired.
    #[error("room has no ongoing match")]
    NoOngoingMatch,
    /// A rematch request is already pending or completed.
    #[error("a rematch request is already pending")]
    AlreadyRequested,
    /// No rematch request is pending to accept.
    #[error("no rematch request is pending")]
    NoPendingRequest,
    /// The rematch requester tried to accept their own request.
    #[error("the requester cannot accept their own rematch")]
    SelfAccept,
    /// A start or rematch was attempted with fewer than two seats.
    #[error("room does not have two seated players")]
    InsufficientSeats,
    /// The persistence collaborator failed.
    #[error("storage failure")]
    Storage(#[from] StorageError),
    /// Persisted state violates an invariant the services rely on.
    #[error("internal consistency violation: {0}")]
    Inconsistent(String),
}

impl From<InvalidTransition> for GameError {
    fn from(err: InvalidTransition) -> Self {
        GameError::WrongPhase { phase: err.from }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Missing or unusable caller identity or join code.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with the room's current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Storage backend unavailable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {err}"))
    }
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        let message = err.to_string();
        match err {
            GameError::RoomNotFound(_) => AppError::NotFound(message),
            GameError::IllegalCell { .. } => AppError::BadRequest(message),
            GameError::WrongJoinCode => AppError::Unauthorized(message),
            GameError::RoomFull
            | GameError::AlreadySeatedElsewhere
            | GameError::AlreadySeated
            | GameError::NotASeatHolder
            | GameError::WrongPhase { .. }
            | GameError::OutOfTurn
            | GameError::AlreadyRequested
            | GameError::NoPendingRequest
            | GameError::SelfAccept
            | GameError::InsufficientSeats => AppError::Conflict(message),
            GameError::Storage(source) => AppError::ServiceUnavailable(source.to_string()),
            GameError::NoOngoingMatch | GameError::Inconsistent(_) => AppError::Internal(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
