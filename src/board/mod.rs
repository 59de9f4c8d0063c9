//! Board representation for the hunt game

pub mod board;
pub mod graph;
pub mod position;

// Re-exports
pub use board::Board;
pub use graph::Connectivity;
pub use position::{Move, Phase, Position, Status, DRAW_PLY_LIMIT};

use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Board size (5x5 intersections)
pub const BOARD_SIZE: usize = 5;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 25

/// Number of hunter tokens, fixed for the whole game
pub const HUNTER_COUNT: usize = 4;
/// Number of prey tokens entering the board during placement
pub const PREY_COUNT: u8 = 20;
/// Captures needed for a hunter win
pub const CAPTURE_WIN: u8 = 5;

/// Contents of a single intersection.
///
/// Wire encoding is 0/1/2 (the server mirror echoes positions back through
/// the same shape, so the numeric encoding is load-bearing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Hunter = 1,
    Prey = 2,
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Hunter),
            2 => Ok(Cell::Prey),
            v => Err(DeError::invalid_value(
                Unexpected::Unsigned(u64::from(v)),
                &"0, 1 or 2",
            )),
        }
    }
}

/// The two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Hunter,
    Prey,
}

impl Side {
    /// Get the opposing side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Hunter => Side::Prey,
            Side::Prey => Side::Hunter,
        }
    }

    /// The cell value of this side's pieces
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Side::Hunter => Cell::Hunter,
            Side::Prey => Cell::Prey,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_index_roundtrip() {
        for idx in 0..TOTAL_CELLS {
            assert_eq!(Pos::from_index(idx).to_index(), idx);
        }
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Hunter.opponent(), Side::Prey);
        assert_eq!(Side::Prey.opponent(), Side::Hunter);
    }

    #[test]
    fn test_cell_wire_encoding() {
        let json = serde_json::to_string(&[Cell::Empty, Cell::Hunter, Cell::Prey]).unwrap();
        assert_eq!(json, "[0,1,2]");

        let cells: Vec<Cell> = serde_json::from_str("[2,0,1]").unwrap();
        assert_eq!(cells, vec![Cell::Prey, Cell::Empty, Cell::Hunter]);

        // Out-of-range cell values are rejected
        assert!(serde_json::from_str::<Vec<Cell>>("[3]").is_err());
    }
}
