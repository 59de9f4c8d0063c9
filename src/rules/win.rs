//! Terminal status detection

use crate::board::{Connectivity, Phase, Position, Status, CAPTURE_WIN, DRAW_PLY_LIMIT};

use super::movegen::hunters_immobile;

/// Outcome of a position. Hunters win on the fifth capture; prey win when
/// every hunter is immobilized in the movement phase; a long run without
/// capture or placement is a draw.
#[must_use]
pub fn check_terminal_status(pos: &Position, conn: &Connectivity) -> Status {
    if pos.prey_captured >= CAPTURE_WIN {
        return Status::HunterWon;
    }
    if pos.phase == Phase::Movement && hunters_immobile(&pos.board, conn) {
        return Status::PreyWon;
    }
    if pos.moves_since_progress >= DRAW_PLY_LIMIT {
        return Status::Draw;
    }
    Status::InProgress
}
