//! Fail-soft alpha-beta minimax over White-positive scores.
//!
//! White maximizes and Black minimizes; there is no negation between plies.
//! Every interior node and every horizon evaluation is recorded in the
//! shared transposition table.

use chess_core::{pseudo_moves_into, Color, Evaluator, Move, Position};

use crate::tt::{Bound, TranspositionTable, TtEntry};

/// Magnitude of a mate found with no remaining depth. Deeper remaining depth
/// scales it up, so nearer mates score further from zero.
pub const MATE_SCORE: f32 = 1_000_000.0;

/// Score of a drawn position.
pub const DRAW_SCORE: f32 = 0.0;

/// Score of the side to move being mated with `depth` plies left.
pub fn mate_score(loser: Color, depth: u8) -> f32 {
    let magnitude = MATE_SCORE * (f32::from(depth) + 1.0);
    match loser {
        Color::White => -magnitude,
        Color::Black => magnitude,
    }
}

/// One thread's view of a search: the shared table plus local counters.
pub(crate) struct Searcher<'a> {
    tt: &'a TranspositionTable,
    evaluator: &'a dyn Evaluator,
    pub(crate) nodes: u64,
    /// Move lists per ply, reused across siblings
    buffers: Vec<Vec<Move>>,
}

impl<'a> Searcher<'a> {
    pub(crate) fn new(tt: &'a TranspositionTable, evaluator: &'a dyn Evaluator) -> Self {
        Self {
            tt,
            evaluator,
            nodes: 0,
            buffers: Vec::new(),
        }
    }

    /// Minimax value of `pos` searched `depth` plies deep, bounded by the
    /// window: a result <= alpha only proves the value is <= result, and a
    /// result >= beta only proves it is >= result.
    ///
    /// `pos` is used as scratch space and is restored before returning.
    pub(crate) fn alpha_beta(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: f32,
        mut beta: f32,
    ) -> f32 {
        self.nodes += 1;
        let hash = pos.hash();

        let mut hint = None;
        if let Some(entry) = self.tt.get(hash) {
            hint = entry.best_move;
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return alpha;
                }
            }
        }

        if depth == 0 {
            let score = self.evaluator.score(pos);
            self.tt.add(
                hash,
                TtEntry {
                    bound: Bound::classify(score, alpha, beta),
                    best_move: None,
                    score,
                    depth: 0,
                },
            );
            return score;
        }

        // The horizon is evaluated even on an exhausted clock
        if pos.is_no_progress_draw() {
            return DRAW_SCORE;
        }

        let (window_alpha, window_beta) = (alpha, beta);
        let mut moves = self.take_buffer(depth);
        pseudo_moves_into(pos, &mut moves);
        if let Some(i) = hint.and_then(|h| moves.iter().position(|&mv| mv == h)) {
            moves.swap(0, i);
        }

        let side = pos.side_to_move();
        let maximizing = side == Color::White;
        let snapshot = pos.snapshot();
        let mut best: Option<(Move, f32)> = None;

        for &mv in moves.iter() {
            if !pos.try_apply_move(mv) {
                pos.restore(&snapshot);
                continue;
            }
            let score = self.alpha_beta(pos, depth - 1, alpha, beta);
            pos.restore(&snapshot);

            let improves = match best {
                None => true,
                Some((_, b)) if maximizing => score > b,
                Some((_, b)) => score < b,
            };
            if improves {
                best = Some((mv, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }
        self.return_buffer(depth, moves);

        let Some((best_move, best_score)) = best else {
            return if pos.in_check(side) {
                mate_score(side, depth)
            } else {
                DRAW_SCORE
            };
        };

        self.tt.add(
            hash,
            TtEntry {
                bound: Bound::classify(best_score, window_alpha, window_beta),
                best_move: Some(best_move),
                score: best_score,
                depth,
            },
        );
        best_score
    }

    fn take_buffer(&mut self, depth: u8) -> Vec<Move> {
        let idx = depth as usize;
        if self.buffers.len() <= idx {
            self.buffers.resize_with(idx + 1, || Vec::with_capacity(64));
        }
        let mut buf = std::mem::take(&mut self.buffers[idx]);
        buf.clear();
        buf
    }

    fn return_buffer(&mut self, depth: u8, buf: Vec<Move>) {
        self.buffers[depth as usize] = buf;
    }
}

/// Orders root results best-first for `mover`: descending for White,
/// ascending for Black.
pub fn sort_for_mover(moves: &mut [chess_core::ScoredMove], mover: Color) {
    match mover {
        Color::White => moves.sort_by(|a, b| b.score.total_cmp(&a.score)),
        Color::Black => moves.sort_by(|a, b| a.score.total_cmp(&b.score)),
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
