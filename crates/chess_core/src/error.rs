use crate::types::{Color, Move};
use thiserror::Error;

/// Reasons a FEN string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 to 6 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankLength { rank: u8 },
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),
    #[error("invalid castling field '{0}'")]
    InvalidCastling(String),
    #[error("invalid en-passant target '{0}'")]
    InvalidEnPassant(String),
    #[error("invalid {field} '{value}'")]
    InvalidCounter { field: &'static str, value: String },
    #[error("{color:?} must have exactly one king, found {count}")]
    KingCount { color: Color, count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move {0}")]
    Illegal(Move),
    #[error("cannot parse move '{0}'")]
    Unparseable(String),
}
