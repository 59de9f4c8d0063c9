//! Chained-capture discovery
//!
//! Depth-first exploration of jump sequences from one hunter. The explorer
//! works on a scratch copy of the board and mutates it with explicit
//! push/pop around each recursive step, so the restore invariant is
//! checkable rather than implied by call-stack discipline. Single-writer,
//! non-reentrant.

use crate::board::{Board, Cell, Connectivity, Pos};

use super::movegen::single_jumps;

/// One jump sequence: the landing cells in order and the prey removed
/// along the way. Every prefix of a longer chain is reported as its own
/// chain, so callers see partial as well as maximal sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureChain {
    pub landings: Vec<Pos>,
    pub captured: Vec<Pos>,
}

/// All jump chains available to the hunter at `from`, including every
/// prefix chain. Empty when no jump exists.
#[must_use]
pub fn capture_chains(board: &Board, conn: &Connectivity, from: Pos) -> Vec<CaptureChain> {
    let mut scratch = board.clone();
    let mut landings = Vec::new();
    let mut captured = Vec::new();
    let mut chains = Vec::new();
    explore(&mut scratch, conn, from, &mut landings, &mut captured, &mut chains);
    chains
}

fn explore(
    board: &mut Board,
    conn: &Connectivity,
    at: Pos,
    landings: &mut Vec<Pos>,
    captured: &mut Vec<Pos>,
    chains: &mut Vec<CaptureChain>,
) {
    for (mid, land) in single_jumps(board, conn, at) {
        // push: take the jump on the scratch board
        board.set(mid, Cell::Empty);
        board.set(at, Cell::Empty);
        board.set(land, Cell::Hunter);
        landings.push(land);
        captured.push(mid);

        chains.push(CaptureChain {
            landings: landings.clone(),
            captured: captured.clone(),
        });
        explore(board, conn, land, landings, captured, chains);

        // pop: restore exactly what the jump changed
        captured.pop();
        landings.pop();
        board.set(land, Cell::Empty);
        board.set(at, Cell::Hunter);
        board.set(mid, Cell::Prey);
    }
}

/// The chain from `from` ending at `to`, preferring the most captures
/// (first found on ties). `None` when no chain reaches `to`.
#[must_use]
pub fn chain_to(board: &Board, conn: &Connectivity, from: Pos, to: Pos) -> Option<CaptureChain> {
    let mut best: Option<CaptureChain> = None;
    for chain in capture_chains(board, conn, from) {
        if chain.landings.last() == Some(&to) {
            let better = best
                .as_ref()
                .map_or(true, |b| chain.captured.len() > b.captured.len());
            if better {
                best = Some(chain);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_jump_chain() {
        let conn = Connectivity::new();
        let mut board = Board::new();
        board.set(Pos::new(0, 0), Cell::Hunter);
        board.set(Pos::new(0, 1), Cell::Prey);

        let chains = capture_chains(&board, &conn, Pos::new(0, 0));
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].landings, vec![Pos::new(0, 2)]);
        assert_eq!(chains[0].captured, vec![Pos::new(0, 1)]);
    }

    #[test]
    fn test_two_inline_prey_yield_multi_capture_chain() {
        let conn = Connectivity::new();
        let mut board = Board::new();
        board.set(Pos::new(2, 0), Cell::Hunter);
        board.set(Pos::new(2, 1), Cell::Prey);
        board.set(Pos::new(2, 3), Cell::Prey);

        let chains = capture_chains(&board, &conn, Pos::new(2, 0));
        assert!(chains.iter().any(|c| c.captured.len() > 1));

        let full = chains.iter().max_by_key(|c| c.captured.len()).unwrap();
        assert_eq!(full.landings, vec![Pos::new(2, 2), Pos::new(2, 4)]);
        assert_eq!(full.captured, vec![Pos::new(2, 1), Pos::new(2, 3)]);
    }

    #[test]
    fn test_prefix_chains_are_reported() {
        let conn = Connectivity::new();
        let mut board = Board::new();
        board.set(Pos::new(2, 0), Cell::Hunter);
        board.set(Pos::new(2, 1), Cell::Prey);
        board.set(Pos::new(2, 3), Cell::Prey);

        let chains = capture_chains(&board, &conn, Pos::new(2, 0));
        // The one-jump prefix stopping at (2,2) is a chain in its own right
        assert!(chains
            .iter()
            .any(|c| c.landings == vec![Pos::new(2, 2)] && c.captured.len() == 1));
    }

    #[test]
    fn test_explorer_restores_board() {
        let conn = Connectivity::new();
        let mut board = Board::new();
        board.set(Pos::new(2, 0), Cell::Hunter);
        board.set(Pos::new(2, 1), Cell::Prey);
        board.set(Pos::new(2, 3), Cell::Prey);
        let before = board.clone();

        let _ = capture_chains(&board, &conn, Pos::new(2, 0));
        assert_eq!(board, before);
    }

    #[test]
    fn test_chain_to_prefers_most_captures() {
        let conn = Connectivity::new();
        let mut board = Board::new();
        board.set(Pos::new(2, 0), Cell::Hunter);
        board.set(Pos::new(2, 1), Cell::Prey);
        board.set(Pos::new(2, 3), Cell::Prey);

        let chain = chain_to(&board, &conn, Pos::new(2, 0), Pos::new(2, 4)).unwrap();
        assert_eq!(chain.captured.len(), 2);

        assert!(chain_to(&board, &conn, Pos::new(2, 0), Pos::new(4, 4)).is_none());
    }
}
