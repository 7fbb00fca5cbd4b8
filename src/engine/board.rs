//! 15×15 gomoku board rebuilt from an ordered move list.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Side length of the board.
pub const BOARD_SIZE: u8 = 15;
/// Total number of cells; a full board with no winning run is a draw.
pub const CELL_COUNT: u16 = (BOARD_SIZE as u16) * (BOARD_SIZE as u16);
/// Run length required to win.
const WIN_RUN: u32 = 5;

/// The four axis pairs checked for a winning run; each is scanned in both
/// the positive and negative direction from the placed cell.
const AXES: [(i16, i16); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// One of the two stone colors. The first stone always opens the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stone {
    /// Opening side (assigned to the host seat).
    First,
    /// Responding side.
    Second,
}

impl Stone {
    /// The opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Stone::First => Stone::Second,
            Stone::Second => Stone::First,
        }
    }

    /// Grid encoding used on the wire: 1 for the first stone, 2 for the second.
    pub fn grid_value(self) -> u8 {
        match self {
            Stone::First => 1,
            Stone::Second => 2,
        }
    }
}

/// Occupancy grid derived from a match's move log. Never cached across
/// requests; callers replay the persisted moves every time they need one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Stone>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    occupied: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board.
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            occupied: 0,
        }
    }

    /// Rebuild a board by replaying `(x, y, stone)` placements in move order.
    ///
    /// Placements that target an out-of-bounds or occupied cell are ignored;
    /// the move log is validated before persistence, so hitting one here
    /// would indicate corrupt stored data rather than a user error.
    pub fn replay<I>(placements: I) -> Self
    where
        I: IntoIterator<Item = (u8, u8, Stone)>,
    {
        let mut board = Self::new();
        for (x, y, stone) in placements {
            let _ = board.place(x, y, stone);
        }
        board
    }

    /// Whether the coordinates fall inside the grid.
    pub fn in_bounds(x: u8, y: u8) -> bool {
        x < BOARD_SIZE && y < BOARD_SIZE
    }

    /// Stone at the given cell, if any. Out-of-bounds reads come back empty.
    pub fn get(&self, x: u8, y: u8) -> Option<Stone> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        self.cells[y as usize][x as usize]
    }

    /// True iff the cell is inside the grid and unoccupied.
    pub fn is_legal(&self, x: u8, y: u8) -> bool {
        Self::in_bounds(x, y) && self.cells[y as usize][x as usize].is_none()
    }

    /// Place a stone, failing on out-of-bounds or occupied cells.
    pub fn place(&mut self, x: u8, y: u8, stone: Stone) -> Result<(), IllegalPlacement> {
        if !self.is_legal(x, y) {
            return Err(IllegalPlacement { x, y });
        }
        self.cells[y as usize][x as usize] = Some(stone);
        self.occupied += 1;
        Ok(())
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> u16 {
        self.occupied
    }

    /// All 225 cells are occupied.
    pub fn is_full(&self) -> bool {
        self.occupied == CELL_COUNT
    }

    /// Whether the stone at `(x, y)` completes a run of five or more along
    /// any of the four axes. Returns false for empty cells.
    pub fn wins_at(&self, x: u8, y: u8) -> bool {
        let Some(stone) = self.get(x, y) else {
            return false;
        };

        AXES.iter().any(|&(dx, dy)| {
            1 + self.run_length(x, y, stone, dx, dy) + self.run_length(x, y, stone, -dx, -dy)
                >= WIN_RUN
        })
    }

    /// Wire representation: rows of 0 (empty), 1 (first stone), 2 (second).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(0, Stone::grid_value))
                    .collect()
            })
            .collect()
    }

    /// Contiguous same-colored cells extending from `(x, y)` exclusive along
    /// the `(dx, dy)` direction.
    fn run_length(&self, x: u8, y: u8, stone: Stone, dx: i16, dy: i16) -> u32 {
        let mut length = 0;
        let mut cx = x as i16 + dx;
        let mut cy = y as i16 + dy;
        while (0..BOARD_SIZE as i16).contains(&cx)
            && (0..BOARD_SIZE as i16).contains(&cy)
            && self.cells[cy as usize][cx as usize] == Some(stone)
        {
            length += 1;
            cx += dx;
            cy += dy;
        }
        length
    }
}

/// Error raised when a placement targets an occupied or out-of-bounds cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell ({x}, {y}) is out of bounds or occupied")]
pub struct IllegalPlacement {
    /// Column of the rejected placement.
    pub x: u8,
    /// Row of the rejected placement.
    pub y: u8,
}
