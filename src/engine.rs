//! Difficulty controller
//!
//! Maps a difficulty tier to a search configuration and owns the two
//! special-cased decisions: the one-ply randomized Easy tier and the
//! opening bias for prey's very first placement.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Connectivity, Move, Phase, Pos, Position, Side, Status};
use crate::eval::evaluate;
use crate::rules::{apply_move, legal_moves, undo_move};
use crate::search::{SearchConfig, Searcher};

/// Cells favored for prey's first placement, searched in isolation.
const OPENING_CELLS: [(u8, u8); 5] = [(0, 2), (2, 0), (2, 2), (2, 4), (4, 2)];

/// Wide tolerance for the opening pick, for variety between games.
const OPENING_TOLERANCE: i32 = 1000;

/// Easy picks uniformly among this many top one-ply moves.
const EASY_TOP_MOVES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Search knobs for the full-search tiers. Easy never reaches the
    /// searcher and has no configuration.
    fn search_config(self) -> SearchConfig {
        match self {
            Difficulty::Easy | Difficulty::Medium => SearchConfig {
                max_depth: 4,
                time_budget: Duration::from_millis(1000),
                use_tt: true,
                use_quiescence: false,
                use_ordering: true,
                iterative: false,
                root_tolerance: Some(500),
            },
            Difficulty::Hard => SearchConfig {
                max_depth: 8,
                time_budget: Duration::from_millis(2500),
                use_tt: true,
                use_quiescence: true,
                use_ordering: true,
                iterative: true,
                root_tolerance: None,
            },
        }
    }
}

/// AI engine for one seat: a searcher plus the difficulty mapping. Holds
/// no game state across turns beyond the search caches, which are dropped
/// whenever the difficulty changes.
pub struct Engine {
    conn: Connectivity,
    searcher: Searcher,
    difficulty: Difficulty,
}

impl Engine {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            conn: Connectivity::new(),
            searcher: Searcher::new(),
            difficulty,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Change the tier. Cached search results describe a different
    /// configuration, so they are invalidated.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.difficulty {
            self.searcher.clear_caches();
            self.difficulty = difficulty;
        }
    }

    #[must_use]
    pub fn connectivity(&self) -> &Connectivity {
        &self.conn
    }

    /// Compute a move for `side`. Returns `None` when the game is over,
    /// when no legal move exists, or when it is not that side's turn (the
    /// latter logs a warning; the caller must not apply a `None`).
    pub fn request_ai_move(&mut self, pos: &Position, side: Side) -> Option<Move> {
        if pos.status != Status::InProgress {
            return None;
        }
        if pos.current_side != side {
            log::warn!(
                "AI move requested for {:?} but {:?} is to move",
                side,
                pos.current_side
            );
            return None;
        }

        let moves = legal_moves(pos, &self.conn);
        if moves.is_empty() {
            return None;
        }

        if side == Side::Prey && pos.phase == Phase::Placement && pos.prey_placed == 0 {
            if let Some(mv) = self.opening_placement(pos) {
                return Some(mv);
            }
        }

        match self.difficulty {
            Difficulty::Easy => self.one_ply_pick(pos, &moves),
            Difficulty::Medium | Difficulty::Hard => {
                let config = self.difficulty.search_config();
                let result = self.searcher.search(pos, &self.conn, &config);
                result.best_move.or(Some(moves[0]))
            }
        }
    }

    /// Easy tier: score each move by the static evaluation one ply ahead
    /// and pick at random among the top few.
    fn one_ply_pick(&self, pos: &Position, moves: &[Move]) -> Option<Move> {
        let mut work = pos.clone();
        let mut scored: Vec<(Move, i32)> = moves
            .iter()
            .map(|&mv| {
                let token = apply_move(&mut work, &self.conn, mv);
                let score = -evaluate(&work, &self.conn);
                undo_move(&mut work, mv, token);
                (mv, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let top = scored.len().min(EASY_TOP_MOVES);
        let pick = rand::thread_rng().gen_range(0..top);
        Some(scored[pick].0)
    }

    /// First prey placement: evaluate only the fixed opening cells and
    /// pick at random among those within a wide tolerance of the best.
    fn opening_placement(&self, pos: &Position) -> Option<Move> {
        let mut work = pos.clone();
        let mut scored = Vec::new();
        for &(row, col) in &OPENING_CELLS {
            let to = Pos::new(row, col);
            if !pos.board.is_empty(to) {
                continue;
            }
            let mv = Move::Place { to };
            let token = apply_move(&mut work, &self.conn, mv);
            scored.push((mv, -evaluate(&work, &self.conn)));
            undo_move(&mut work, mv, token);
        }

        let best = scored.iter().map(|&(_, s)| s).max()?;
        let near: Vec<Move> = scored
            .iter()
            .filter(|&&(_, s)| s >= best - OPENING_TOLERANCE)
            .map(|&(mv, _)| mv)
            .collect();
        let pick = rand::thread_rng().gen_range(0..near.len());
        Some(near[pick])
    }
}

/// One-shot form of [`Engine::request_ai_move`] for callers that do not
/// keep an engine alive between turns (search caches start cold).
pub fn request_ai_move(pos: &Position, difficulty: Difficulty, side: Side) -> Option<Move> {
    Engine::new(difficulty).request_ai_move(pos, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::apply_validated_move;

    #[test]
    fn test_wrong_turn_returns_none() {
        let mut engine = Engine::new(Difficulty::Easy);
        let pos = Position::initial();
        // Prey to move at game start
        assert!(engine.request_ai_move(&pos, Side::Hunter).is_none());
        assert!(engine.request_ai_move(&pos, Side::Prey).is_some());
    }

    #[test]
    fn test_finished_game_returns_none() {
        let mut engine = Engine::new(Difficulty::Medium);
        let mut pos = Position::initial();
        pos.status = Status::HunterWon;
        assert!(engine.request_ai_move(&pos, Side::Prey).is_none());
    }

    #[test]
    fn test_first_placement_uses_opening_cells() {
        let mut engine = Engine::new(Difficulty::Hard);
        let pos = Position::initial();
        let openings: Vec<Pos> = OPENING_CELLS.iter().map(|&(r, c)| Pos::new(r, c)).collect();

        for _ in 0..10 {
            match engine.request_ai_move(&pos, Side::Prey) {
                Some(Move::Place { to }) => assert!(openings.contains(&to)),
                other => panic!("expected an opening placement, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_easy_moves_are_legal_across_a_game() {
        let mut engine = Engine::new(Difficulty::Easy);
        let mut pos = Position::initial();

        for _ in 0..100 {
            if pos.status != Status::InProgress {
                break;
            }
            let side = pos.current_side;
            let mv = match engine.request_ai_move(&pos, side) {
                Some(mv) => mv,
                None => break,
            };
            assert!(
                legal_moves(&pos, engine.connectivity()).contains(&mv),
                "illegal move {mv:?}"
            );
            assert!(apply_validated_move(&mut pos, &Connectivity::new(), mv));
        }
    }

    #[test]
    fn test_medium_moves_are_legal_across_a_game() {
        let mut engine = Engine::new(Difficulty::Medium);
        let mut pos = Position::initial();

        for _ in 0..20 {
            if pos.status != Status::InProgress {
                break;
            }
            let side = pos.current_side;
            let mv = match engine.request_ai_move(&pos, side) {
                Some(mv) => mv,
                None => break,
            };
            assert!(legal_moves(&pos, engine.connectivity()).contains(&mv));
            let conn = Connectivity::new();
            assert!(apply_validated_move(&mut pos, &conn, mv));
        }
    }

    #[test]
    fn test_hard_moves_are_legal_for_sampled_plies() {
        let mut engine = Engine::new(Difficulty::Hard);
        let mut pos = Position::initial();
        let conn = Connectivity::new();

        for _ in 0..4 {
            if pos.status != Status::InProgress {
                break;
            }
            let side = pos.current_side;
            let mv = match engine.request_ai_move(&pos, side) {
                Some(mv) => mv,
                None => break,
            };
            assert!(legal_moves(&pos, &conn).contains(&mv));
            assert!(apply_validated_move(&mut pos, &conn, mv));
        }
    }

    #[test]
    fn test_one_shot_wrapper_returns_legal_move() {
        let pos = Position::initial();
        let conn = Connectivity::new();
        let mv = request_ai_move(&pos, Difficulty::Easy, Side::Prey).unwrap();
        assert!(legal_moves(&pos, &conn).contains(&mv));
    }

    #[test]
    fn test_difficulty_change_keeps_engine_usable() {
        let mut engine = Engine::new(Difficulty::Medium);
        let pos = Position::initial();

        assert!(engine.request_ai_move(&pos, Side::Prey).is_some());
        engine.set_difficulty(Difficulty::Easy);
        assert_eq!(engine.difficulty(), Difficulty::Easy);
        assert!(engine.request_ai_move(&pos, Side::Prey).is_some());
    }
}
