//! Static position evaluation
//!
//! Scores are returned from the side-to-move's perspective (negamax
//! convention): the heuristic sum is hunter-positive and negated when
//! prey is to move. Terminal states short-circuit the heuristic terms.
//!
//! The weights are design parameters tuned by play, not derived values.

use crate::board::{Cell, Connectivity, Phase, Pos, Position, Side, Status, PREY_COUNT};
use crate::rules::movegen::single_jumps;

/// Score of a decided game, far above any heuristic sum.
pub const WIN: i32 = 100_000;

const CAPTURE_WEIGHT: i32 = 5000;
const THREAT_WEIGHT: i32 = 3000;
const MOBILITY_WEIGHT: i32 = 20;
const CENTER_WEIGHT: i32 = 15;
const TRAPPED_PENALTY: i32 = 500;
const PREY_MOBILITY_PENALTY: i32 = 10;
const BREATHING_WEIGHT: i32 = 40;
const UNPLACED_PENALTY: i32 = 10;

/// Prey count below which hunter centralization still matters.
const EARLY_GAME_PREY: u8 = 15;

/// Evaluate a position for the side to move.
#[must_use]
pub fn evaluate(pos: &Position, conn: &Connectivity) -> i32 {
    let hunter_view = match pos.status {
        Status::HunterWon => WIN,
        Status::PreyWon => -WIN,
        Status::Draw => 0,
        Status::InProgress => heuristic(pos, conn),
    };

    match pos.current_side {
        Side::Hunter => hunter_view,
        Side::Prey => -hunter_view,
    }
}

fn heuristic(pos: &Position, conn: &Connectivity) -> i32 {
    let board = &pos.board;
    let early = pos.phase == Phase::Placement || pos.prey_placed < EARLY_GAME_PREY;

    let mut score = i32::from(pos.prey_captured) * CAPTURE_WEIGHT;

    // Distinct prey a hunter could take on its next turn
    let mut threatened = 0u32;

    for h in board.positions_of(Cell::Hunter) {
        let empty_neighbors = conn.neighbors(h).filter(|&n| board.is_empty(n)).count() as i32;
        let jumps = single_jumps(board, conn, h);
        for &(mid, _) in &jumps {
            threatened |= 1 << mid.to_index();
        }

        score += (empty_neighbors + jumps.len() as i32) * MOBILITY_WEIGHT;
        score += empty_neighbors * BREATHING_WEIGHT;

        if empty_neighbors == 0 && jumps.is_empty() {
            score -= TRAPPED_PENALTY;
        }

        if early {
            score += (4 - center_distance(h)) * CENTER_WEIGHT;
        }
    }

    score += threatened.count_ones() as i32 * THREAT_WEIGHT;

    if pos.phase == Phase::Movement {
        let prey_moves: i32 = board
            .positions_of(Cell::Prey)
            .map(|p| conn.neighbors(p).filter(|&n| board.is_empty(n)).count() as i32)
            .sum();
        score -= prey_moves * PREY_MOBILITY_PENALTY;
    }

    score -= i32::from(PREY_COUNT - pos.prey_placed) * UNPLACED_PENALTY;

    score
}

fn center_distance(pos: Pos) -> i32 {
    (i32::from(pos.row) - 2).abs() + (i32::from(pos.col) - 2).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Position, Connectivity) {
        (Position::initial(), Connectivity::new())
    }

    #[test]
    fn test_terminal_scores_dominate() {
        let (mut pos, conn) = setup();
        pos.current_side = Side::Hunter;

        pos.status = Status::HunterWon;
        assert_eq!(evaluate(&pos, &conn), WIN);

        pos.status = Status::PreyWon;
        assert_eq!(evaluate(&pos, &conn), -WIN);

        pos.status = Status::Draw;
        assert_eq!(evaluate(&pos, &conn), 0);
    }

    #[test]
    fn test_negamax_sign_convention() {
        let (mut pos, conn) = setup();

        pos.current_side = Side::Hunter;
        let hunter_view = evaluate(&pos, &conn);
        pos.current_side = Side::Prey;
        let prey_view = evaluate(&pos, &conn);
        assert_eq!(hunter_view, -prey_view);

        pos.current_side = Side::Hunter;
        pos.status = Status::PreyWon;
        assert_eq!(evaluate(&pos, &conn), -WIN);
        pos.current_side = Side::Prey;
        assert_eq!(evaluate(&pos, &conn), WIN);
    }

    #[test]
    fn test_captures_raise_hunter_score() {
        let (mut pos, conn) = setup();
        pos.current_side = Side::Hunter;
        pos.prey_placed = 6;

        let base = evaluate(&pos, &conn);
        pos.prey_captured = 1;
        pos.prey_placed = 7;
        assert!(evaluate(&pos, &conn) > base);
    }

    #[test]
    fn test_capturable_prey_raises_hunter_score() {
        let (mut pos, conn) = setup();
        pos.current_side = Side::Hunter;
        pos.prey_placed = 1;

        let base = evaluate(&pos, &conn);
        // Prey next to the (0,0) hunter with an open landing behind it
        pos.board.set(Pos::new(0, 1), Cell::Prey);
        assert!(evaluate(&pos, &conn) > base + THREAT_WEIGHT / 2);
    }

    #[test]
    fn test_trapped_hunter_is_penalized() {
        let conn = Connectivity::new();
        let mut open = Position::initial();
        open.current_side = Side::Hunter;
        open.prey_placed = 6;

        let mut boxed = open.clone();
        // Box in the (0,0) hunter: no shift, no landing
        for p in [
            Pos::new(0, 1),
            Pos::new(1, 0),
            Pos::new(1, 1),
            Pos::new(0, 2),
            Pos::new(2, 0),
            Pos::new(2, 2),
        ] {
            boxed.board.set(p, Cell::Prey);
        }
        assert!(evaluate(&boxed, &conn) < evaluate(&open, &conn));
    }
}
