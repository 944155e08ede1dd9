use crate::board::Position;

/// Static evaluation used at the search horizon.
///
/// Scores are in pawns and White-positive: greater is better for White
/// regardless of who is to move. Implementations are shared between search
/// threads, hence `Send + Sync`.
pub trait Evaluator: Send + Sync {
    fn score(&self, pos: &Position) -> f32;
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> f32 + Send + Sync,
{
    fn score(&self, pos: &Position) -> f32 {
        self(pos)
    }
}
