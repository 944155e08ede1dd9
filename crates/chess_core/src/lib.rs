pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod eval;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use error::{FenError, MoveError};
pub use eval::Evaluator;
pub use fen::STARTPOS_FEN;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use types::*;
pub use zobrist::{ZOBRIST, ZobristKeys};

use serde::{Deserialize, Serialize};

// =============================================================================
// Engine trait: implemented by every search engine
// =============================================================================

/// A root move with the score of the position it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub mv: Move,
    /// White-positive evaluation of the position after `mv`
    pub score: f32,
}

/// Trait that all chess engines must implement.
pub trait Engine: Send {
    /// Score every legal move of `pos`.
    ///
    /// # Arguments
    /// * `pos` - The position to analyze
    /// * `depth` - Search depth in plies below each root move
    ///
    /// # Returns
    /// One entry per legal move, best first for the side to move. Empty when
    /// the side to move has no legal move.
    fn find_best_moves(&mut self, pos: &Position, depth: u8) -> Vec<ScoredMove>;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) {}
}
