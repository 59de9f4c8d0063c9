//! Board grid

use serde::{Deserialize, Serialize};

use super::{Cell, Pos, BOARD_SIZE};

/// 5x5 grid of cell values.
///
/// Serializes transparently as a nested array of 0/1/2 cell codes, the
/// shape the game controller exchanges with the server mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Get the cell value at a position
    #[inline]
    #[must_use]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Set the cell value at a position
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    /// Check if a position is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Count cells holding the given value
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == cell)
            .count()
    }

    /// Iterate over the positions holding the given value.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().enumerate().flat_map(move |(r, row)| {
            row.iter().enumerate().filter_map(move |(c, &v)| {
                if v == cell {
                    Some(Pos::new(r as u8, c as u8))
                } else {
                    None
                }
            })
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
