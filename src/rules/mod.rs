//! Game rules: move generation, capture chains, make/undo, terminal status

pub mod apply;
pub mod capture;
pub mod movegen;
pub mod win;

pub use apply::{apply_move, apply_validated_move, undo_move, UndoToken};
pub use capture::{capture_chains, chain_to, CaptureChain};
pub use movegen::{legal_moves, moves_for_piece};
pub use win::check_terminal_status;
