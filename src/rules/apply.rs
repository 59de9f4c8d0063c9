//! In-place make/undo mutator
//!
//! `apply_move`/`undo_move` exist for the search engine: they walk and
//! backtrack the game tree without per-node copies, under strictly nested
//! single-writer access. `apply_validated_move` is the controller-facing
//! API and refuses illegal moves without mutation.

use crate::board::{Cell, Connectivity, Move, Phase, Pos, Position, Side, Status, PREY_COUNT};

use super::capture::chain_to;
use super::movegen::legal_moves;
use super::win::check_terminal_status;

/// Everything `undo_move` needs to restore the pre-apply position
/// bit-for-bit.
#[derive(Debug, Clone)]
pub struct UndoToken {
    prev_side: Side,
    prev_phase: Phase,
    prev_status: Status,
    prev_moves_since_progress: u16,
    prev_last_move: Option<Move>,
    captured: Vec<Pos>,
}

impl UndoToken {
    /// Prey cells removed by the applied move, in jump order. Used by the
    /// search engine for incremental hash updates.
    #[must_use]
    pub fn captured(&self) -> &[Pos] {
        &self.captured
    }
}

/// Apply a legal move in place. The caller guarantees legality; behavior
/// on an illegal move is unspecified (the controller path goes through
/// [`apply_validated_move`] instead).
pub fn apply_move(pos: &mut Position, conn: &Connectivity, mv: Move) -> UndoToken {
    let mut token = UndoToken {
        prev_side: pos.current_side,
        prev_phase: pos.phase,
        prev_status: pos.status,
        prev_moves_since_progress: pos.moves_since_progress,
        prev_last_move: pos.last_move,
        captured: Vec::new(),
    };

    match mv {
        Move::Place { to } => {
            pos.board.set(to, Cell::Prey);
            pos.prey_placed += 1;
            pos.moves_since_progress = 0;
        }
        Move::Shift { from, to } => {
            // A non-adjacent destination is the landing of a jump chain;
            // re-derive the chain to find the full captured set.
            if !conn.is_adjacent(from, to) {
                if let Some(chain) = chain_to(&pos.board, conn, from, to) {
                    token.captured = chain.captured;
                }
            }

            let mover = pos.board.get(from);
            pos.board.set(from, Cell::Empty);
            pos.board.set(to, mover);

            if token.captured.is_empty() {
                pos.moves_since_progress += 1;
            } else {
                for &c in &token.captured {
                    pos.board.set(c, Cell::Empty);
                }
                pos.prey_captured += token.captured.len() as u8;
                pos.moves_since_progress = 0;
            }
        }
    }

    pos.last_move = Some(mv);
    pos.phase = if pos.prey_placed >= PREY_COUNT {
        Phase::Movement
    } else {
        Phase::Placement
    };
    pos.current_side = pos.current_side.opponent();
    pos.status = check_terminal_status(pos, conn);

    token
}

/// Reverse the effects of [`apply_move`]. `mv` and `token` must be the
/// exact pair produced by the matching apply.
pub fn undo_move(pos: &mut Position, mv: Move, token: UndoToken) {
    match mv {
        Move::Place { to } => {
            pos.board.set(to, Cell::Empty);
            pos.prey_placed -= 1;
        }
        Move::Shift { from, to } => {
            let mover = pos.board.get(to);
            pos.board.set(to, Cell::Empty);
            pos.board.set(from, mover);

            if !token.captured.is_empty() {
                pos.prey_captured -= token.captured.len() as u8;
                for &c in &token.captured {
                    pos.board.set(c, Cell::Prey);
                }
            }
        }
    }

    pos.current_side = token.prev_side;
    pos.phase = token.prev_phase;
    pos.status = token.prev_status;
    pos.moves_since_progress = token.prev_moves_since_progress;
    pos.last_move = token.prev_last_move;
}

/// Controller API: apply `mv` only if the generator lists it as legal.
/// Returns `false` and leaves the position untouched otherwise.
pub fn apply_validated_move(pos: &mut Position, conn: &Connectivity, mv: Move) -> bool {
    if !legal_moves(pos, conn).contains(&mv) {
        return false;
    }
    let _ = apply_move(pos, conn, mv);
    true
}
