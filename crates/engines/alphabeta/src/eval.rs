//! Material-based position evaluation using bitboards.

use chess_core::{Color, Evaluator, Piece, PieceKind, Position};

/// Material values in pawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [f32; 6] = [1.0, 3.0, 3.0, 5.0, 9.0, 0.0];

/// Counts material.
///
/// Returns a White-positive score in pawns:
/// - Positive = White is ahead
/// - Negative = Black is ahead
/// - 0 = material is level
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn score(&self, pos: &Position) -> f32 {
        PieceKind::ALL
            .into_iter()
            .map(|kind| {
                let white = pos.pieces(Piece::new(Color::White, kind)).popcount() as f32;
                let black = pos.pieces(Piece::new(Color::Black, kind)).popcount() as f32;
                PIECE_VALUES[kind.idx()] * (white - black)
            })
            .sum()
    }
}
