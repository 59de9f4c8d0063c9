//! Rule engine and adversarial-search AI for a 5x5 hunt game.
//!
//! Four hunters face twenty prey tokens on a 5x5 intersection board with
//! orthogonal lines everywhere and diagonal lines at even-parity points.
//! Prey enter one per turn during the placement phase, then every piece
//! moves along connectivity; hunters capture by jumping, including chained
//! jumps. Hunters win on the fifth capture, prey win by immobilizing every
//! hunter, and a long run without capture or placement is a draw.
//!
//! The crate exposes the rules (move generation, validated application,
//! terminal detection) and an AI built on fail-soft negamax with
//! alpha-beta pruning, Zobrist hashing, a transposition table,
//! killer/history move ordering, iterative deepening, and a capture-only
//! quiescence extension, wrapped in three difficulty tiers.
//!
//! ```
//! use shikar::{request_ai_move, Difficulty, Position, Side};
//!
//! let pos = Position::initial();
//! let mv = request_ai_move(&pos, Difficulty::Easy, Side::Prey);
//! assert!(mv.is_some());
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;

pub use board::{
    Board, Cell, Connectivity, Move, Phase, Pos, Position, Side, Status, BOARD_SIZE, CAPTURE_WIN,
    HUNTER_COUNT, PREY_COUNT,
};
pub use engine::{request_ai_move, Difficulty, Engine};
pub use eval::evaluate;
pub use rules::{
    apply_validated_move, capture_chains, check_terminal_status, legal_moves, moves_for_piece,
};
pub use search::{SearchConfig, SearchResult, Searcher};
