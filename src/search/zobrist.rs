//! Zobrist position hashing
//!
//! One random constant per (cell, piece kind) pair plus a side-to-move
//! constant. The table is an explicitly constructed, deterministically
//! seeded value owned by its searcher, so independent engine instances
//! and tests never depend on global initialization order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Cell, Pos, Position, Side, TOTAL_CELLS};

const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Hash constants for the 25 cells and the side to move.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    hunter: [u64; TOTAL_CELLS],
    prey: [u64; TOTAL_CELLS],
    hunter_to_move: u64,
}

impl ZobristTable {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut hunter = [0u64; TOTAL_CELLS];
        let mut prey = [0u64; TOTAL_CELLS];
        for idx in 0..TOTAL_CELLS {
            hunter[idx] = rng.gen();
            prey[idx] = rng.gen();
        }
        Self {
            hunter,
            prey,
            hunter_to_move: rng.gen(),
        }
    }

    /// Full hash over (board, side to move).
    #[must_use]
    pub fn hash(&self, pos: &Position) -> u64 {
        let mut h = 0u64;
        for idx in 0..TOTAL_CELLS {
            match pos.board.get(Pos::from_index(idx)) {
                Cell::Hunter => h ^= self.hunter[idx],
                Cell::Prey => h ^= self.prey[idx],
                Cell::Empty => {}
            }
        }
        if pos.current_side == Side::Hunter {
            h ^= self.hunter_to_move;
        }
        h
    }

    /// Incremental update: add or remove one piece. No-op for `Empty`.
    #[inline]
    #[must_use]
    pub fn toggle_piece(&self, hash: u64, pos: Pos, cell: Cell) -> u64 {
        match cell {
            Cell::Hunter => hash ^ self.hunter[pos.to_index()],
            Cell::Prey => hash ^ self.prey[pos.to_index()],
            Cell::Empty => hash,
        }
    }

    /// Incremental update: flip the side to move.
    #[inline]
    #[must_use]
    pub fn toggle_side(&self, hash: u64) -> u64 {
        hash ^ self.hunter_to_move
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
