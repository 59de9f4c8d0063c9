//! Transposition table
//!
//! Direct-mapped, bounded cache from position hash to search results. A
//! pruning aid only, never authoritative: entries are hash-verified on
//! probe, and the stored bound kind tells the search how much of the
//! score it may trust.

use crate::board::Move;

/// How the stored score relates to the true value of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Searched inside the window: the score is exact
    Exact,
    /// Beta cutoff: the true score is at least this
    LowerBound,
    /// Failed low: the true score is at most this
    UpperBound,
}

#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub hash: u64,
    pub depth: i8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Fixed-size hash-indexed store with depth-preferred replacement.
#[derive(Debug)]
pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    mask: usize,
}

impl TranspositionTable {
    pub const DEFAULT_ENTRIES: usize = 1 << 16;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_ENTRIES)
    }

    /// `entries` is rounded up to a power of two so indexing is a mask.
    #[must_use]
    pub fn with_capacity(entries: usize) -> Self {
        let size = entries.next_power_of_two().max(2);
        Self {
            entries: vec![None; size],
            mask: size - 1,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        hash as usize & self.mask
    }

    /// Look up an entry. `None` on a miss or a slot held by another hash.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<&TtEntry> {
        self.entries[self.index(hash)]
            .as_ref()
            .filter(|e| e.hash == hash)
    }

    /// Store an entry. An occupied slot is only evicted for the same hash
    /// or a search at least as deep.
    pub fn store(&mut self, entry: TtEntry) {
        let idx = self.index(entry.hash);
        match &self.entries[idx] {
            Some(existing) if existing.hash != entry.hash && existing.depth > entry.depth => {}
            _ => self.entries[idx] = Some(entry),
        }
    }

    /// Recorded best move for a hash, for move ordering.
    #[must_use]
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.probe(hash).and_then(|e| e.best_move)
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn entry(hash: u64, depth: i8, score: i32) -> TtEntry {
        TtEntry {
            hash,
            depth,
            score,
            bound: Bound::Exact,
            best_move: Some(Move::Place { to: Pos::new(2, 2) }),
        }
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::with_capacity(64);
        tt.store(entry(0xABCD, 4, 120));

        let hit = tt.probe(0xABCD).unwrap();
        assert_eq!(hit.depth, 4);
        assert_eq!(hit.score, 120);
        assert!(tt.probe(0x1234).is_none());
    }

    #[test]
    fn test_colliding_hash_is_not_returned() {
        let mut tt = TranspositionTable::with_capacity(64);
        tt.store(entry(0x40, 4, 120));
        // Same slot (capacity 64), different hash
        assert!(tt.probe(0x40 + 64).is_none());
    }

    #[test]
    fn test_depth_preferred_replacement() {
        let mut tt = TranspositionTable::with_capacity(64);
        tt.store(entry(0x40, 6, 1));
        // Shallower search for a colliding hash loses
        tt.store(entry(0x40 + 64, 2, 2));
        assert_eq!(tt.probe(0x40).unwrap().score, 1);

        // Deeper colliding search wins the slot
        tt.store(entry(0x40 + 64, 8, 3));
        assert!(tt.probe(0x40).is_none());
        assert_eq!(tt.probe(0x40 + 64).unwrap().score, 3);
    }

    #[test]
    fn test_same_hash_always_replaces() {
        let mut tt = TranspositionTable::with_capacity(64);
        tt.store(entry(0x40, 6, 1));
        tt.store(entry(0x40, 2, 9));
        assert_eq!(tt.probe(0x40).unwrap().score, 9);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::with_capacity(64);
        tt.store(entry(0x40, 4, 1));
        tt.clear();
        assert!(tt.probe(0x40).is_none());
    }
}
