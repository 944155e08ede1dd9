//! Alpha-Beta Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning. Root moves are searched in
//! parallel on a dedicated thread pool, all threads sharing one lock-free
//! transposition table.

mod config;
mod error;
mod eval;
mod search;
pub mod tt;

use std::time::{Duration, Instant};

use chess_core::{legal_moves, Engine, Evaluator, Position, ScoredMove};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

pub use config::{SearchConfig, DEFAULT_TT_SLOTS};
pub use error::EngineError;
pub use eval::MaterialEvaluator;
pub use search::{mate_score, sort_for_mover, DRAW_SCORE, MATE_SCORE};
pub use tt::{Bound, TranspositionTable, TtEntry};

use search::Searcher;

/// Outcome of one root search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Every legal root move with its score, best first for the side to move
    pub moves: Vec<ScoredMove>,
    /// Requested depth
    pub depth: u8,
    /// Nodes visited across all threads
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn best(&self) -> Option<ScoredMove> {
        self.moves.first().copied()
    }
}

/// Alpha-beta engine with a shared transposition table.
///
/// The table persists across searches; call [`SearchEngine::clear`] (or
/// [`Engine::new_game`]) to forget it.
pub struct SearchEngine {
    config: SearchConfig,
    tt: TranspositionTable,
    evaluator: Box<dyn Evaluator>,
    pool: ThreadPool,
}

impl SearchEngine {
    /// Engine scoring leaves with [`MaterialEvaluator`].
    pub fn new(config: SearchConfig) -> Result<Self, EngineError> {
        Self::with_evaluator(config, MaterialEvaluator)
    }

    pub fn with_evaluator(
        config: SearchConfig,
        evaluator: impl Evaluator + 'static,
    ) -> Result<Self, EngineError> {
        if config.tt_slots == 0 {
            return Err(EngineError::EmptyTable);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("alphabeta-{i}"))
            .build()?;
        let tt = TranspositionTable::new(config.tt_slots);
        info!(
            tt_slots = tt.len(),
            threads = pool.current_num_threads(),
            "search engine ready"
        );

        Ok(Self {
            config,
            tt,
            evaluator: Box::new(evaluator),
            pool,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Scores every legal move of `pos`, searching each resulting position
    /// `depth` plies deep. At depth 0 each child is scored by the evaluator.
    pub fn search(&self, pos: &Position, depth: u8) -> SearchReport {
        let start = Instant::now();
        let roots = legal_moves(pos);
        debug!(fen = %pos, depth, roots = roots.len(), "search started");

        let results: Vec<(ScoredMove, u64)> = self.pool.install(|| {
            roots
                .par_iter()
                .map(|&mv| {
                    let mut child = *pos;
                    child.apply_move(mv);
                    let mut searcher = Searcher::new(&self.tt, self.evaluator.as_ref());
                    let score = searcher.alpha_beta(
                        &mut child,
                        depth,
                        f32::NEG_INFINITY,
                        f32::INFINITY,
                    );
                    debug!(%mv, score, nodes = searcher.nodes, "root move scored");
                    (ScoredMove { mv, score }, searcher.nodes)
                })
                .collect()
        });

        let nodes: u64 = results.iter().map(|(_, n)| n).sum();
        let mut moves: Vec<ScoredMove> = results.into_iter().map(|(m, _)| m).collect();
        sort_for_mover(&mut moves, pos.side_to_move());

        let elapsed = start.elapsed();
        info!(
            depth,
            moves = moves.len(),
            nodes,
            elapsed_ms = elapsed.as_millis() as u64,
            best = ?moves.first().map(|m| (m.mv.to_string(), m.score)),
            "search finished"
        );
        SearchReport {
            moves,
            depth,
            nodes,
            elapsed,
        }
    }

    /// All legal moves with scores, best first for the side to move.
    pub fn find_best_moves(&self, pos: &Position, depth: u8) -> Vec<ScoredMove> {
        self.search(pos, depth).moves
    }

    /// Best move at the configured default depth.
    pub fn best_move(&self, pos: &Position) -> Option<ScoredMove> {
        self.search(pos, self.config.default_depth).best()
    }

    pub fn clear(&mut self) {
        self.tt.clear();
    }
}

impl Engine for SearchEngine {
    fn find_best_moves(&mut self, pos: &Position, depth: u8) -> Vec<ScoredMove> {
        SearchEngine::find_best_moves(self, pos, depth)
    }

    fn name(&self) -> &str {
        "AlphaBeta v1.0"
    }

    fn new_game(&mut self) {
        self.clear();
    }
}
