//! Pseudo-legal destination masks and the legality filter built on them.

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::{CastlingRights, Position};
use crate::error::MoveError;
use crate::types::*;

/// What a king needs to castle to one side.
struct CastleRule {
    color: Color,
    right: CastlingRights,
    king_from: u8,
    king_to: u8,
    rook_from: u8,
    /// Squares that must be empty.
    between: Bitboard,
    /// Squares the king passes over or lands on; none may be attacked.
    path: [u8; 2],
}

const CASTLE_RULES: [CastleRule; 4] = [
    CastleRule {
        color: Color::White,
        right: CastlingRights::WHITE_KING,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        between: Bitboard::from_squares(&[5, 6]),
        path: [5, 6],
    },
    CastleRule {
        color: Color::White,
        right: CastlingRights::WHITE_QUEEN,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        between: Bitboard::from_squares(&[1, 2, 3]),
        path: [3, 2],
    },
    CastleRule {
        color: Color::Black,
        right: CastlingRights::BLACK_KING,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        between: Bitboard::from_squares(&[61, 62]),
        path: [61, 62],
    },
    CastleRule {
        color: Color::Black,
        right: CastlingRights::BLACK_QUEEN,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        between: Bitboard::from_squares(&[57, 58, 59]),
        path: [59, 58],
    },
];

/// Squares `piece` standing on `from` may move to, ignoring whether the move
/// would leave its own king attacked.
pub fn piece_destinations(pos: &Position, piece: Piece, from: u8) -> Bitboard {
    let own = pos.color_occupancy(piece.color);
    let enemy = pos.color_occupancy(piece.color.other());
    let occupied = own | enemy;

    match piece.kind {
        PieceKind::Pawn => pawn_destinations(pos, piece.color, from, occupied, enemy),
        PieceKind::Knight => knight_attacks(from) & !own,
        PieceKind::Bishop => bishop_attacks(from, occupied) & !own,
        PieceKind::Rook => rook_attacks(from, occupied) & !own,
        PieceKind::Queen => queen_attacks(from, occupied) & !own,
        PieceKind::King => {
            (king_attacks(from) & !own) | castle_destinations(pos, piece.color, from, occupied)
        }
    }
}

fn pawn_destinations(
    pos: &Position,
    color: Color,
    from: u8,
    occupied: Bitboard,
    enemy: Bitboard,
) -> Bitboard {
    let empty = !occupied;
    let single = Bitboard::from_square(from).forward(color) & empty;
    let double = if rank_of(from) == color.pawn_start_rank() {
        single.forward(color) & empty
    } else {
        Bitboard::EMPTY
    };

    let mut targets = enemy;
    if color == pos.side_to_move() {
        if let Some(ep) = pos.en_passant() {
            targets.set(ep);
        }
    }
    single | double | (pawn_attacks(from, color) & targets)
}

fn castle_destinations(pos: &Position, color: Color, from: u8, occupied: Bitboard) -> Bitboard {
    let enemy = color.other();
    let rook = pos.pieces(Piece::new(color, PieceKind::Rook));
    let mut out = Bitboard::EMPTY;

    for rule in CASTLE_RULES.iter().filter(|r| r.color == color) {
        let available = from == rule.king_from
            && pos.castling().contains(rule.right)
            && rook.contains(rule.rook_from)
            && (occupied & rule.between).is_empty();
        if !available || pos.is_square_attacked(from, enemy) {
            continue;
        }
        if rule.path.iter().any(|&sq| pos.is_square_attacked(sq, enemy)) {
            continue;
        }
        out.set(rule.king_to);
    }
    out
}

/// Appends every pseudo-legal move of the side to move.
pub fn pseudo_moves_into(pos: &Position, out: &mut Vec<Move>) {
    let color = pos.side_to_move();
    for kind in PieceKind::ALL {
        let piece = Piece::new(color, kind);
        for from in pos.pieces(piece) {
            out.extend(
                piece_destinations(pos, piece, from).map(|to| Move::new(piece, from, to)),
            );
        }
    }
}

pub fn pseudo_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = *pos;
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// `pos` is used as scratch space and is left as it was on return.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves_into(pos, out);

    let snapshot = pos.snapshot();
    out.retain(|&mv| {
        let legal = pos.try_apply_move(mv);
        pos.restore(&snapshot);
        legal
    });
}

/// Terminal classification of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { loser: Color },
    Stalemate,
    /// Drawn by the halfmove clock.
    NoProgressDraw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    pub fn is_draw(self) -> bool {
        matches!(self, GameStatus::Stalemate | GameStatus::NoProgressDraw)
    }
}

impl Position {
    /// Mate and stalemate take precedence over the halfmove clock.
    pub fn game_status(&self) -> GameStatus {
        let side = self.side_to_move();
        if legal_moves(self).is_empty() {
            if self.in_check(side) {
                GameStatus::Checkmate { loser: side }
            } else {
                GameStatus::Stalemate
            }
        } else if self.is_no_progress_draw() {
            GameStatus::NoProgressDraw
        } else {
            GameStatus::Ongoing
        }
    }

    /// Plays `mv` if it is legal here.
    pub fn play(&mut self, mv: Move) -> Result<(), MoveError> {
        if !legal_moves(self).contains(&mv) {
            return Err(MoveError::Illegal(mv));
        }
        self.apply_move(mv);
        Ok(())
    }

    /// Finds the legal move written in coordinate notation (`e2e4`, `e7e8q`).
    /// The promotion suffix is optional.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveError> {
        let unparseable = || MoveError::Unparseable(text.to_string());
        let (Some(from), Some(to), Some(suffix)) = (
            text.get(..2).and_then(coord_to_sq),
            text.get(2..4).and_then(coord_to_sq),
            text.get(4..),
        ) else {
            return Err(unparseable());
        };
        if !matches!(suffix, "" | "q") {
            return Err(unparseable());
        }

        let piece = self.piece_at(from).ok_or_else(unparseable)?;
        let mv = Move::new(piece, from, to);
        if suffix == "q" && !mv.is_promotion() {
            return Err(unparseable());
        }
        if legal_moves(self).contains(&mv) {
            Ok(mv)
        } else {
            Err(MoveError::Illegal(mv))
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
