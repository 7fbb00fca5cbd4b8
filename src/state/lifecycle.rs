//! Pure transition rules for the room lifecycle.
//!
//! The phase itself is persisted on the room entity; this module only
//! decides which moves between phases are legal. All three ended phases are
//! terminal with respect to gameplay; only the rematch coordinator may
//! produce a follow-on room, and it does so by creating a new one.

use thiserror::Error;

use crate::dao::models::RoomPhase;

/// Events that can advance a room's phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The second seat was taken.
    SeatFilled,
    /// A seat was vacated before the match started.
    SeatVacated,
    /// Both seats reported ready.
    AllReady,
    /// The match ended with a win or a draw.
    Concluded,
    /// A participant left mid-match.
    Leave,
    /// A participant surrendered.
    Surrender,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the room was in when the invalid event was received.
    pub from: RoomPhase,
    /// The event that cannot be applied from this phase.
    pub event: LifecycleEvent,
}

/// Compute the phase that follows `event`, or reject the transition.
pub fn advance(from: RoomPhase, event: LifecycleEvent) -> Result<RoomPhase, InvalidTransition> {
    let next = match (from, event) {
        (RoomPhase::WaitingForPlayers, LifecycleEvent::SeatFilled) => RoomPhase::WaitingForReady,
        (RoomPhase::WaitingForReady, LifecycleEvent::SeatVacated) => RoomPhase::WaitingForPlayers,
        (RoomPhase::WaitingForReady, LifecycleEvent::AllReady) => RoomPhase::InProgress,
        (RoomPhase::InProgress, LifecycleEvent::Concluded) => RoomPhase::Finished,
        (RoomPhase::InProgress, LifecycleEvent::Leave) => RoomPhase::EndedByLeave,
        (RoomPhase::InProgress, LifecycleEvent::Surrender) => RoomPhase::EndedBySurrender,
        (from, event) => return Err(InvalidTransition { from, event }),
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::RoomStatus;

    #[test]
    fn happy_path_through_a_match() {
        let phase = RoomPhase::WaitingForPlayers;
        let phase = advance(phase, LifecycleEvent::SeatFilled).unwrap();
        assert_eq!(phase, RoomPhase::WaitingForReady);
        let phase = advance(phase, LifecycleEvent::AllReady).unwrap();
        assert_eq!(phase, RoomPhase::InProgress);
        let phase = advance(phase, LifecycleEvent::Concluded).unwrap();
        assert_eq!(phase, RoomPhase::Finished);
    }

    #[test]
    fn vacating_a_seat_reopens_the_room() {
        let phase = advance(RoomPhase::WaitingForReady, LifecycleEvent::SeatVacated).unwrap();
        assert_eq!(phase, RoomPhase::WaitingForPlayers);
    }

    #[test]
    fn forfeits_map_to_their_own_phases() {
        assert_eq!(
            advance(RoomPhase::InProgress, LifecycleEvent::Leave).unwrap(),
            RoomPhase::EndedByLeave
        );
        assert_eq!(
            advance(RoomPhase::InProgress, LifecycleEvent::Surrender).unwrap(),
            RoomPhase::EndedBySurrender
        );
    }

    #[test]
    fn terminal_phases_reject_every_event() {
        for phase in [
            RoomPhase::Finished,
            RoomPhase::EndedByLeave,
            RoomPhase::EndedBySurrender,
        ] {
            for event in [
                LifecycleEvent::SeatFilled,
                LifecycleEvent::AllReady,
                LifecycleEvent::Concluded,
                LifecycleEvent::Leave,
                LifecycleEvent::Surrender,
            ] {
                let err = advance(phase, event).unwrap_err();
                assert_eq!(err.from, phase);
                assert_eq!(err.event, event);
            }
        }
    }

    #[test]
    fn starting_requires_the_ready_phase() {
        assert!(advance(RoomPhase::WaitingForPlayers, LifecycleEvent::AllReady).is_err());
        assert!(advance(RoomPhase::InProgress, LifecycleEvent::SeatFilled).is_err());
    }

    #[test]
    fn status_tracks_phase() {
        assert_eq!(RoomPhase::WaitingForPlayers.status(), RoomStatus::Waiting);
        assert_eq!(RoomPhase::WaitingForReady.status(), RoomStatus::Waiting);
        assert_eq!(RoomPhase::InProgress.status(), RoomStatus::Playing);
        assert_eq!(RoomPhase::Finished.status(), RoomStatus::Finished);
        assert_eq!(RoomPhase::EndedByLeave.status(), RoomStatus::Finished);
        assert_eq!(RoomPhase::EndedBySurrender.status(), RoomStatus::Finished);
    }

    #[test]
    fn rematch_policy_excludes_leave() {
        assert!(RoomPhase::Finished.allows_rematch());
        assert!(RoomPhase::EndedBySurrender.allows_rematch());
        assert!(!RoomPhase::EndedByLeave.allows_rematch());
        assert!(!RoomPhase::InProgress.allows_rematch());
    }
}
