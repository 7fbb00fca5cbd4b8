//! Turn derivation from the persisted move count.
//!
//! Whose turn it is must always be computed from a count read inside the
//! room's serialization gate, never from a cached match object; two
//! concurrent submissions could otherwise both observe a stale "my turn"
//! state.

use crate::engine::board::Stone;

/// Stone entitled to play next given the number of moves already persisted
/// for the match: an even count means the first stone opens or replies.
pub fn stone_to_move(move_count: u64) -> Stone {
    if move_count % 2 == 0 {
        Stone::First
    } else {
        Stone::Second
    }
}

/// Stone that played the 1-based move number.
pub fn stone_for_move_number(move_number: u32) -> Stone {
    if move_number % 2 == 1 {
        Stone::First
    } else {
        Stone::Second
    }
}
