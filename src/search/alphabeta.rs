//! Negamax search with alpha-beta pruning
//!
//! Fail-soft negamax over the in-place mutator, with a transposition
//! table, killer-move and history-heuristic ordering, optional iterative
//! deepening under a wall-clock budget, and a capture-only quiescence
//! extension. Single search in flight per `Searcher`; the caches it owns
//! are unsynchronized by design.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::board::{Connectivity, Move, Pos, Position, Side, Status, TOTAL_CELLS};
use crate::eval::{evaluate, WIN};
use crate::rules::{apply_move, legal_moves, undo_move, UndoToken};

use super::tt::{Bound, TranspositionTable, TtEntry};
use super::zobrist::ZobristTable;

/// Above any reachable score, so negation stays in range.
const INF: i32 = 1_000_000;

/// Upper bound on search ply for the killer table.
const MAX_PLY: usize = 32;

/// Extra capture-only plies the quiescence extension may add.
const QUIESCENCE_DEPTH: i8 = 4;

/// Iterative deepening engages above this requested depth.
const DEEPENING_THRESHOLD: i8 = 3;

/// History table rows: one per origin cell plus one for placements.
const HISTORY_FROM: usize = TOTAL_CELLS + 1;

// Move-ordering bonuses, largest first
const ORDER_TT_MOVE: i32 = 1_000_000;
const ORDER_CAPTURE: i32 = 900_000;
const ORDER_KILLER_0: i32 = 800_000;
const ORDER_KILLER_1: i32 = 790_000;

/// Knobs for one search call. Difficulty tiers map onto these.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: i8,
    pub time_budget: Duration,
    pub use_tt: bool,
    pub use_quiescence: bool,
    pub use_ordering: bool,
    pub iterative: bool,
    /// When set, the root picks uniformly among moves scoring within this
    /// tolerance of the best.
    pub root_tolerance: Option<i32>,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: i8,
    pub nodes: u64,
}

/// Search state: hash context plus the caches that persist across turns.
pub struct Searcher {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    killers: [[Option<Move>; 2]; MAX_PLY],
    history: [[i32; TOTAL_CELLS]; HISTORY_FROM],
    nodes: u64,
    started: Instant,
    deadline: Instant,
    aborted: bool,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::new(),
            killers: [[None; 2]; MAX_PLY],
            history: [[0; TOTAL_CELLS]; HISTORY_FROM],
            nodes: 0,
            started: now,
            deadline: now,
            aborted: false,
        }
    }

    /// Drop everything learned from previous searches.
    pub fn clear_caches(&mut self) {
        self.tt.clear();
        self.killers = [[None; 2]; MAX_PLY];
        self.history = [[0; TOTAL_CELLS]; HISTORY_FROM];
    }

    #[must_use]
    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }

    /// Find the best move under the configured depth and time budget. The
    /// caller's position is never mutated.
    pub fn search(
        &mut self,
        pos: &Position,
        conn: &Connectivity,
        config: &SearchConfig,
    ) -> SearchResult {
        let mut work = pos.clone();
        self.nodes = 0;
        self.aborted = false;
        self.started = Instant::now();
        self.deadline = self.started + config.time_budget;

        if config.iterative && config.max_depth > DEEPENING_THRESHOLD {
            return self.deepening_search(&mut work, conn, config);
        }

        self.root_search(&mut work, conn, config.max_depth, config)
    }

    /// Iterative deepening: increasing depths, keeping only the last fully
    /// completed one. A partially explored deeper iteration never
    /// overrides a complete shallower result.
    fn deepening_search(
        &mut self,
        pos: &mut Position,
        conn: &Connectivity,
        config: &SearchConfig,
    ) -> SearchResult {
        let soft_limit = config.time_budget.mul_f64(0.8);
        let mut best: Option<SearchResult> = None;

        for depth in 1..=config.max_depth {
            let result = self.root_search(pos, conn, depth, config);
            if self.aborted {
                break;
            }
            log::debug!(
                "depth {} complete: score {} after {} nodes",
                depth,
                result.score,
                result.nodes
            );
            best = Some(result);
            if result.score.abs() >= WIN {
                break;
            }
            if self.started.elapsed() >= soft_limit {
                break;
            }
        }

        best.unwrap_or_else(|| {
            // Not even depth 1 finished inside the budget. A one-ply pass
            // is near-instant, so rerun it with a fresh deadline rather
            // than return no move.
            self.aborted = false;
            self.deadline = Instant::now() + config.time_budget;
            self.root_search(pos, conn, 1, config)
        })
    }

    fn root_search(
        &mut self,
        pos: &mut Position,
        conn: &Connectivity,
        depth: i8,
        config: &SearchConfig,
    ) -> SearchResult {
        let mut moves = legal_moves(pos, conn);
        if moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: evaluate(pos, conn),
                depth,
                nodes: self.nodes,
            };
        }

        let hash = self.zobrist.hash(pos);
        if config.use_ordering {
            let tt_move = if config.use_tt {
                self.tt.best_move(hash)
            } else {
                None
            };
            self.order_moves(&mut moves, conn, tt_move, 0);
        }

        let mut scored: Vec<(Move, i32)> = Vec::with_capacity(moves.len());
        let mut best_score = -INF;
        let mut best_move = moves[0];
        let mut alpha = -INF;

        for mv in moves {
            let mover = pos.current_side;
            let token = apply_move(pos, conn, mv);
            let child_hash = self.child_hash(hash, mover, mv, &token);
            let score = -self.negamax(pos, conn, child_hash, depth - 1, 1, -INF, -alpha, config);
            undo_move(pos, mv, token);

            if self.aborted {
                break;
            }

            scored.push((mv, score));
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            // A root tolerance needs true scores for every move, so the
            // window only tightens when no randomized pick is wanted.
            if config.root_tolerance.is_none() && score > alpha {
                alpha = score;
            }
        }

        if let Some(tolerance) = config.root_tolerance {
            if let Some(mv) = pick_within_tolerance(&scored, best_score, tolerance) {
                best_move = mv;
            }
        }

        if config.use_tt && !self.aborted {
            self.tt.store(TtEntry {
                hash,
                depth,
                score: best_score,
                bound: Bound::Exact,
                best_move: Some(best_move),
            });
        }

        SearchResult {
            best_move: Some(best_move),
            score: best_score,
            depth,
            nodes: self.nodes,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        pos: &mut Position,
        conn: &Connectivity,
        hash: u64,
        depth: i8,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
        config: &SearchConfig,
    ) -> i32 {
        self.nodes += 1;

        // Budget overrun degrades to the static evaluation, never an error
        if Instant::now() >= self.deadline {
            self.aborted = true;
            return evaluate(pos, conn);
        }

        if pos.status != Status::InProgress {
            return evaluate(pos, conn);
        }

        if depth <= 0 {
            if config.use_quiescence && pos.current_side == Side::Hunter {
                return self.quiescence(pos, conn, alpha, beta, QUIESCENCE_DEPTH);
            }
            return evaluate(pos, conn);
        }

        let mut tt_move = None;
        if config.use_tt {
            if let Some(entry) = self.tt.probe(hash) {
                tt_move = entry.best_move;
                if entry.depth >= depth {
                    match entry.bound {
                        Bound::Exact => return entry.score,
                        Bound::LowerBound => alpha = alpha.max(entry.score),
                        Bound::UpperBound => beta = beta.min(entry.score),
                    }
                    if alpha >= beta {
                        return entry.score;
                    }
                }
            }
        }

        let mut moves = legal_moves(pos, conn);
        if moves.is_empty() {
            return evaluate(pos, conn);
        }
        if config.use_ordering {
            self.order_moves(&mut moves, conn, tt_move, ply);
        }

        let original_alpha = alpha;
        let mut best_score = -INF;
        let mut best_move = None;

        for mv in moves {
            let mover = pos.current_side;
            let token = apply_move(pos, conn, mv);
            let child_hash = self.child_hash(hash, mover, mv, &token);
            let score =
                -self.negamax(pos, conn, child_hash, depth - 1, ply + 1, -beta, -alpha, config);
            undo_move(pos, mv, token);

            if self.aborted {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                if !is_capture(mv, conn) {
                    self.record_cutoff(mv, depth, ply);
                }
                break;
            }
        }

        if self.aborted {
            return if best_score > -INF {
                best_score
            } else {
                evaluate(pos, conn)
            };
        }

        if config.use_tt {
            let bound = if best_score <= original_alpha {
                Bound::UpperBound
            } else if best_score >= beta {
                Bound::LowerBound
            } else {
                Bound::Exact
            };
            self.tt.store(TtEntry {
                hash,
                depth,
                score: best_score,
                bound,
                best_move,
            });
        }

        best_score
    }

    /// Capture-only extension with a stand-pat floor. The non-capturing
    /// side has no jumps, so its nodes fall through to stand-pat.
    fn quiescence(
        &mut self,
        pos: &mut Position,
        conn: &Connectivity,
        mut alpha: i32,
        beta: i32,
        depth: i8,
    ) -> i32 {
        self.nodes += 1;

        let stand_pat = evaluate(pos, conn);
        if Instant::now() >= self.deadline {
            self.aborted = true;
            return stand_pat;
        }
        if depth <= 0 || pos.status != Status::InProgress || stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);

        let mut best = stand_pat;
        let captures: Vec<Move> = legal_moves(pos, conn)
            .into_iter()
            .filter(|&mv| is_capture(mv, conn))
            .collect();

        for mv in captures {
            let token = apply_move(pos, conn, mv);
            let score = -self.quiescence(pos, conn, -beta, -alpha, depth - 1);
            undo_move(pos, mv, token);

            if self.aborted {
                break;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        best
    }

    /// Child hash from the parent hash via incremental toggles.
    fn child_hash(&self, hash: u64, mover: Side, mv: Move, token: &UndoToken) -> u64 {
        let mut h = self.zobrist.toggle_side(hash);
        match mv {
            Move::Place { to } => {
                h = self.zobrist.toggle_piece(h, to, Side::Prey.cell());
            }
            Move::Shift { from, to } => {
                let cell = mover.cell();
                h = self.zobrist.toggle_piece(h, from, cell);
                h = self.zobrist.toggle_piece(h, to, cell);
                for &c in token.captured() {
                    h = self.zobrist.toggle_piece(h, c, Side::Prey.cell());
                }
            }
        }
        h
    }

    /// Order: TT move, captures, killers for this ply, then history.
    fn order_moves(&self, moves: &mut [Move], conn: &Connectivity, tt_move: Option<Move>, ply: usize) {
        let killers = self.killers[ply.min(MAX_PLY - 1)];
        moves.sort_by_cached_key(|&mv| {
            let score = if tt_move == Some(mv) {
                ORDER_TT_MOVE
            } else if is_capture(mv, conn) {
                ORDER_CAPTURE
            } else if killers[0] == Some(mv) {
                ORDER_KILLER_0
            } else if killers[1] == Some(mv) {
                ORDER_KILLER_1
            } else {
                self.history[history_from(mv)][mv.to().to_index()]
            };
            -score
        });
    }

    /// Killer and history updates for a quiet move that caused a cutoff.
    fn record_cutoff(&mut self, mv: Move, depth: i8, ply: usize) {
        let slot = &mut self.killers[ply.min(MAX_PLY - 1)];
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
        let bonus = i32::from(depth) * i32::from(depth);
        self.history[history_from(mv)][mv.to().to_index()] += bonus;
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// A shift to a non-adjacent cell is the landing of a jump chain.
#[inline]
fn is_capture(mv: Move, conn: &Connectivity) -> bool {
    match mv {
        Move::Place { .. } => false,
        Move::Shift { from, to } => !conn.is_adjacent(from, to),
    }
}

/// History row: origin cell for shifts, the extra row for placements.
#[inline]
fn history_from(mv: Move) -> usize {
    mv.from().map_or(TOTAL_CELLS, Pos::to_index)
}

fn pick_within_tolerance(scored: &[(Move, i32)], best: i32, tolerance: i32) -> Option<Move> {
    let near: Vec<Move> = scored
        .iter()
        .filter(|&&(_, s)| s >= best - tolerance)
        .map(|&(mv, _)| mv)
        .collect();
    if near.is_empty() {
        return None;
    }
    let pick = rand::thread_rng().gen_range(0..near.len());
    Some(near[pick])
}
