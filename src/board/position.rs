//! Position: the shared game-state record
//!
//! `Position` is the value every other component reads and mutates. The
//! serde shape is wire-compatible with the JSON record the game controller
//! exchanges with the server mirror of the rules: camelCase field names,
//! board cells encoded 0/1/2.

use serde::{Deserialize, Serialize};

use super::{Board, Cell, Pos, Side, BOARD_SIZE};

/// Plies without a capture or placement before the game is drawn
pub const DRAW_PLY_LIMIT: u16 = 30;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Prey tokens are still entering the board; hunters move normally
    Placement,
    /// All prey placed; every piece moves along connectivity
    Movement,
}

/// Game outcome state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    InProgress,
    HunterWon,
    PreyWon,
    Draw,
}

/// A single move.
///
/// `Place` puts a new prey token on an empty intersection (placement phase
/// only). `Shift` relocates a piece; it is a capture exactly when `to` is
/// not connectivity-adjacent to `from` (it is then the landing cell of a
/// jump or jump chain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Move {
    Place { to: Pos },
    Shift { from: Pos, to: Pos },
}

impl Move {
    /// Destination cell of the move
    #[inline]
    #[must_use]
    pub fn to(&self) -> Pos {
        match *self {
            Move::Place { to } | Move::Shift { to, .. } => to,
        }
    }

    /// Origin cell for a `Shift`, `None` for a placement
    #[inline]
    #[must_use]
    pub fn from(&self) -> Option<Pos> {
        match *self {
            Move::Place { .. } => None,
            Move::Shift { from, .. } => Some(from),
        }
    }
}

/// Full game state: board plus phase, counters, turn and outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub board: Board,
    pub current_side: Side,
    pub phase: Phase,
    /// Prey tokens placed so far (0..=20)
    pub prey_placed: u8,
    /// Prey tokens captured so far (0..=5)
    pub prey_captured: u8,
    pub status: Status,
    /// Plies since the last capture or placement (draw counter)
    pub moves_since_progress: u16,
    pub last_move: Option<Move>,
}

impl Position {
    /// Starting position: hunters on the four corners, prey to move,
    /// placement phase.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Board::new();
        let last = (BOARD_SIZE - 1) as u8;
        for pos in [
            Pos::new(0, 0),
            Pos::new(0, last),
            Pos::new(last, 0),
            Pos::new(last, last),
        ] {
            board.set(pos, Cell::Hunter);
        }

        Self {
            board,
            current_side: Side::Prey,
            phase: Phase::Placement,
            prey_placed: 0,
            prey_captured: 0,
            status: Status::InProgress,
            moves_since_progress: 0,
            last_move: None,
        }
    }
}
