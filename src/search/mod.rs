//! Adversarial search: Zobrist hashing, transposition table, negamax

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchConfig, SearchResult, Searcher};
pub use tt::{Bound, TranspositionTable, TtEntry};
pub use zobrist::ZobristTable;
