//! Forsyth-Edwards Notation.

use crate::board::{CastlingRights, Position};
use crate::error::FenError;
use crate::types::*;
use std::fmt;
use std::str::FromStr;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASTLING_LETTERS: [(char, CastlingRights); 4] = [
    ('K', CastlingRights::WHITE_KING),
    ('Q', CastlingRights::WHITE_QUEEN),
    ('k', CastlingRights::BLACK_KING),
    ('q', CastlingRights::BLACK_QUEEN),
];

impl Position {
    /// Parses a FEN string. The two clock fields may be omitted and default
    /// to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::FieldCount(parts.len()));
        }

        let mut pos = Position::empty();
        parse_placement(&mut pos, parts[0])?;

        for color in Color::ALL {
            let kings = pos.pieces(Piece::new(color, PieceKind::King));
            match (kings.popcount(), kings.lsb()) {
                (1, Some(sq)) => pos.king_squares[color.idx()] = sq,
                (count, _) => return Err(FenError::KingCount { color, count }),
            }
        }

        let side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };
        pos.set_side_to_move(side);

        pos.set_castling(parse_castling(parts[2])?);
        pos.set_en_passant(parse_en_passant(parts[3], side)?);

        pos.halfmove_clock = parse_counter(parts.get(4).copied().unwrap_or("0"), "halfmove clock")?;
        pos.fullmove_number =
            parse_counter(parts.get(5).copied().unwrap_or("1"), "fullmove number")?;

        Ok(pos)
    }

    /// Six-field FEN.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(rank * 8 + file) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        for (letter, right) in CASTLING_LETTERS {
            if self.castling.contains(right) {
                out.push(letter);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

fn parse_placement(pos: &mut Position, board: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = board.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
        let too_long = FenError::RankLength { rank: rank as u8 + 1 };
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += d as i8;
                if file > 8 {
                    return Err(too_long);
                }
                continue;
            }
            let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
            let sq = sq(file, rank).ok_or_else(|| too_long.clone())?;
            pos.toggle_piece(piece, sq);
            file += 1;
        }
        if file != 8 {
            return Err(too_long);
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let invalid = || FenError::InvalidCastling(field.to_string());
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for ch in field.chars() {
        let (_, right) = CASTLING_LETTERS
            .iter()
            .find(|(letter, _)| *letter == ch)
            .ok_or_else(invalid)?;
        if rights.contains(*right) {
            return Err(invalid());
        }
        rights.insert(*right);
    }
    Ok(rights)
}

/// The target sits behind a pawn of the side that just moved, so its rank is
/// fixed by the side to move.
fn parse_en_passant(field: &str, side: Color) -> Result<Option<u8>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let expected_rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    coord_to_sq(field)
        .filter(|&sq| rank_of(sq) == expected_rank)
        .map(Some)
        .ok_or_else(|| FenError::InvalidEnPassant(field.to_string()))
}

fn parse_counter(value: &str, field: &'static str) -> Result<u32, FenError> {
    value.parse().map_err(|_| FenError::InvalidCounter {
        field,
        value: value.to_string(),
    })
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
