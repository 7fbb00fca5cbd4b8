//! Pure gameplay rules: board replay, win/draw detection, turn derivation.
//!
//! Nothing in this module performs I/O or holds state between requests; the
//! services rebuild everything from the persisted move log each time.

pub mod board;
pub mod turn;

pub use board::{BOARD_SIZE, Board, Stone};
pub use turn::{stone_for_move_number, stone_to_move};
