//! Legal move generation
//!
//! Placement phase, prey's turn: one `Place` per empty cell. Everywhere
//! else each piece shifts to an empty connected neighbor, and hunters
//! additionally jump over adjacent prey. Jump chains are flattened to
//! `(from, final landing)` moves; intermediate squares are never offered
//! as separate moves.

use crate::board::{Board, Cell, Connectivity, Move, Phase, Pos, Position, Side, Status, TOTAL_CELLS};

use super::capture::capture_chains;

/// All legal moves for the side to move. Empty when the game is over.
#[must_use]
pub fn legal_moves(pos: &Position, conn: &Connectivity) -> Vec<Move> {
    if pos.status != Status::InProgress {
        return Vec::new();
    }

    if pos.phase == Phase::Placement && pos.current_side == Side::Prey {
        return (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(|&p| pos.board.is_empty(p))
            .map(|p| Move::Place { to: p })
            .collect();
    }

    let mut moves = Vec::new();
    for from in pos.board.positions_of(pos.current_side.cell()) {
        push_piece_moves(pos, conn, from, &mut moves);
    }
    moves
}

/// Legal moves for one piece. Empty when the piece does not belong to the
/// side to move, or when that side must place instead of move.
#[must_use]
pub fn moves_for_piece(pos: &Position, conn: &Connectivity, from: Pos) -> Vec<Move> {
    if pos.status != Status::InProgress
        || pos.board.get(from) != pos.current_side.cell()
        || (pos.phase == Phase::Placement && pos.current_side == Side::Prey)
    {
        return Vec::new();
    }

    let mut moves = Vec::new();
    push_piece_moves(pos, conn, from, &mut moves);
    moves
}

fn push_piece_moves(pos: &Position, conn: &Connectivity, from: Pos, out: &mut Vec<Move>) {
    for n in conn.neighbors(from) {
        if pos.board.is_empty(n) {
            out.push(Move::Shift { from, to: n });
        }
    }

    if pos.current_side == Side::Hunter {
        // Flatten jump chains to their final landing cells, deduplicated.
        let mut seen = 0u32;
        for chain in capture_chains(&pos.board, conn, from) {
            if let Some(&land) = chain.landings.last() {
                let bit = 1u32 << land.to_index();
                if seen & bit == 0 {
                    seen |= bit;
                    out.push(Move::Shift { from, to: land });
                }
            }
        }
    }
}

/// Reflection landing cell of a jump from `from` over `mid`, if on board.
pub(crate) fn reflect(from: Pos, mid: Pos) -> Option<Pos> {
    let row = 2 * i32::from(mid.row) - i32::from(from.row);
    let col = 2 * i32::from(mid.col) - i32::from(from.col);
    if Pos::is_valid(row, col) {
        Some(Pos::new(row as u8, col as u8))
    } else {
        None
    }
}

/// Single jumps available to a hunter at `from`: `(midpoint, landing)`
/// pairs where the midpoint holds prey and the landing cell is empty and
/// connected to the midpoint.
pub(crate) fn single_jumps(board: &Board, conn: &Connectivity, from: Pos) -> Vec<(Pos, Pos)> {
    let mut jumps = Vec::new();
    for mid in conn.neighbors(from) {
        if board.get(mid) != Cell::Prey {
            continue;
        }
        if let Some(land) = reflect(from, mid) {
            if board.is_empty(land) && conn.is_adjacent(mid, land) {
                jumps.push((mid, land));
            }
        }
    }
    jumps
}

/// True when no hunter has a shift or a jump. Checked over all hunters,
/// never just one.
#[must_use]
pub fn hunters_immobile(board: &Board, conn: &Connectivity) -> bool {
    for h in board.positions_of(Cell::Hunter) {
        if conn.neighbors(h).any(|n| board.is_empty(n)) {
            return false;
        }
        if !single_jumps(board, conn, h).is_empty() {
            return false;
        }
    }
    true
}
