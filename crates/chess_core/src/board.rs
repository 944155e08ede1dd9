//! Bitboard position with an incrementally maintained Zobrist hash.

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::types::*;
use crate::zobrist::ZOBRIST;
use std::ops::BitOr;

/// Halfmove count at which the game is drawn for lack of progress.
pub const NO_PROGRESS_LIMIT: u32 = 100;

/// Castling rights as a 4-bit set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KING: CastlingRights = CastlingRights(1);
    pub const WHITE_QUEEN: CastlingRights = CastlingRights(2);
    pub const BLACK_KING: CastlingRights = CastlingRights(4);
    pub const BLACK_QUEEN: CastlingRights = CastlingRights(8);
    pub const ALL: CastlingRights = CastlingRights(15);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: CastlingRights) {
        self.0 &= !other.0;
    }

    /// Both rights of one side.
    pub const fn for_color(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights(3),
            Color::Black => CastlingRights(12),
        }
    }

    /// The right tied to `color`'s rook starting on `sq`, if `sq` is one of
    /// that side's corners.
    pub const fn for_rook_home(color: Color, sq: u8) -> CastlingRights {
        match (color, sq) {
            (Color::White, 0) => Self::WHITE_QUEEN,
            (Color::White, 7) => Self::WHITE_KING,
            (Color::Black, 56) => Self::BLACK_QUEEN,
            (Color::Black, 63) => Self::BLACK_KING,
            _ => Self::NONE,
        }
    }
}

impl BitOr for CastlingRights {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        CastlingRights(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: [Bitboard; 12],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) king_squares: [u8; 2],
    pub(crate) hash: u64,
}

/// Saved copy of a [`Position`], restored after trying a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot(Position);

impl Position {
    /// Board with no pieces, White to move, and no rights.
    pub(crate) fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 12],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [0; 2],
            hash: 0,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();

        for f in 0..8 {
            p.toggle_piece(Piece::new(Color::White, PieceKind::Pawn), 8 + f);
            p.toggle_piece(Piece::new(Color::Black, PieceKind::Pawn), 48 + f);
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.toggle_piece(Piece::new(Color::White, kind), f as u8);
            p.toggle_piece(Piece::new(Color::Black, kind), 56 + f as u8);
        }
        p.king_squares = [4, 60];
        p.set_castling(CastlingRights::ALL);
        p
    }

    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        let base = color.idx() * 6;
        self.pieces[base..base + 6]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    pub fn occupied(&self) -> Bitboard {
        self.pieces.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[piece.index()].contains(sq))
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn king_square(&self, color: Color) -> u8 {
        self.king_squares[color.idx()]
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Hash recomputed from scratch. Always equals [`Position::hash`].
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for piece in Piece::ALL {
            for sq in self.pieces(piece) {
                hash ^= ZOBRIST.piece_key(piece, sq);
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side_to_move;
        }
        hash ^= ZOBRIST.castling_key(self.castling);
        if let Some(ep) = self.en_passant {
            hash ^= ZOBRIST.ep_key(ep % 8);
        }
        hash
    }

    pub fn is_no_progress_draw(&self) -> bool {
        self.halfmove_clock >= NO_PROGRESS_LIMIT
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(*self)
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        *self = snapshot.0;
    }

    /// Adds or removes `piece` on `sq`, keeping the hash in step.
    #[inline]
    pub(crate) fn toggle_piece(&mut self, piece: Piece, sq: u8) {
        self.pieces[piece.index()] ^= Bitboard::from_square(sq);
        self.hash ^= ZOBRIST.piece_key(piece, sq);
    }

    pub(crate) fn set_castling(&mut self, rights: CastlingRights) {
        self.hash ^= ZOBRIST.castling_key(self.castling) ^ ZOBRIST.castling_key(rights);
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, target: Option<u8>) {
        if let Some(old) = self.en_passant {
            self.hash ^= ZOBRIST.ep_key(old % 8);
        }
        if let Some(new) = target {
            self.hash ^= ZOBRIST.ep_key(new % 8);
        }
        self.en_passant = target;
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.hash ^= ZOBRIST.side_to_move;
            self.side_to_move = color;
        }
    }

    /// Pieces of color `by` that attack `target`.
    pub fn square_attackers(&self, target: u8, by: Color) -> Bitboard {
        let occupied = self.occupied();
        let of = |kind| self.pieces(Piece::new(by, kind));
        let queens = of(PieceKind::Queen);

        // A `by` pawn attacks target iff a pawn of the other color on target
        // would attack that pawn's square.
        (pawn_attacks(target, by.other()) & of(PieceKind::Pawn))
            | (knight_attacks(target) & of(PieceKind::Knight))
            | (king_attacks(target) & of(PieceKind::King))
            | (bishop_attacks(target, occupied) & (of(PieceKind::Bishop) | queens))
            | (rook_attacks(target, occupied) & (of(PieceKind::Rook) | queens))
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        !self.square_attackers(target, by).is_empty()
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.other())
    }

    /// Plays a pseudo-legal move without checking whether it leaves the
    /// mover's king attacked.
    pub fn apply_move(&mut self, mv: Move) {
        let Move { piece, from, to } = mv;
        let us = piece.color;
        let them = us.other();
        let mut rights = self.castling;
        let mut resets_clock = piece.kind == PieceKind::Pawn;

        if let Some(captured) = self.piece_at(to) {
            self.toggle_piece(captured, to);
            if captured.kind == PieceKind::Rook {
                rights.remove(CastlingRights::for_rook_home(captured.color, to));
            }
            resets_clock = true;
        } else if piece.kind == PieceKind::Pawn
            && self.en_passant == Some(to)
            && file_of(from) != file_of(to)
        {
            let victim = match us {
                Color::White => to - 8,
                Color::Black => to + 8,
            };
            self.toggle_piece(Piece::new(them, PieceKind::Pawn), victim);
        }

        self.toggle_piece(piece, from);
        let landed = if mv.is_promotion() {
            Piece::new(us, PieceKind::Queen)
        } else {
            piece
        };
        self.toggle_piece(landed, to);

        match piece.kind {
            PieceKind::King => {
                self.king_squares[us.idx()] = to;
                rights.remove(CastlingRights::for_color(us));
                if mv.is_castle() {
                    let (rook_from, rook_to) = if to > from {
                        (from + 3, from + 1)
                    } else {
                        (from - 4, from - 1)
                    };
                    let rook = Piece::new(us, PieceKind::Rook);
                    self.toggle_piece(rook, rook_from);
                    self.toggle_piece(rook, rook_to);
                }
            }
            PieceKind::Rook => rights.remove(CastlingRights::for_rook_home(us, from)),
            _ => {}
        }
        self.set_castling(rights);

        let double_push = piece.kind == PieceKind::Pawn && from.abs_diff(to) == 16;
        self.set_en_passant(double_push.then(|| (from + to) / 2));

        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.set_side_to_move(them);
    }

    /// Applies `mv` and reports whether the mover's king is safe afterwards.
    ///
    /// The move stays applied either way; callers restore a snapshot when it
    /// returns false.
    #[must_use]
    pub fn try_apply_move(&mut self, mv: Move) -> bool {
        let mover = mv.piece.color;
        self.apply_move(mv);
        !self.in_check(mover)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
