//! Static attack tables, built at compile time.
//!
//! Leapers (knight, king, pawn captures) are plain per-square lookups.
//! Sliders walk one precomputed ray per direction and cut it at the nearest
//! blocker found by bit-scan: the lowest set bit for rays that run toward
//! higher squares, the highest set bit for the others. The blocker square
//! itself stays in the result; callers mask out their own pieces.

use crate::bitboard::Bitboard;
use crate::types::Color;

/// The eight ray directions, clockwise from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// (file, rank) step.
    const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// Whether square indices grow along this ray.
    pub const fn is_positive(self) -> bool {
        let (df, dr) = self.delta();
        dr * 8 + df > 0
    }
}

const fn offset(sq: u8, df: i8, dr: i8) -> Option<u8> {
    let file = (sq % 8) as i8 + df;
    let rank = (sq / 8) as i8 + dr;
    if file >= 0 && file < 8 && rank >= 0 && rank < 8 {
        Some((rank * 8 + file) as u8)
    } else {
        None
    }
}

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let (df, dr) = deltas[i];
            if let Some(to) = offset(sq as u8, df, dr) {
                bits |= 1u64 << to;
            }
            i += 1;
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

const fn ray_table(dir: Direction) -> [Bitboard; 64] {
    let (df, dr) = dir.delta();
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let mut bits = 0u64;
        let mut cur = offset(sq as u8, df, dr);
        while let Some(to) = cur {
            bits |= 1u64 << to;
            cur = offset(to, df, dr);
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

pub static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&[
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
]);

pub static KING_ATTACKS: [Bitboard; 64] = leaper_table(&[
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
]);

/// Squares a pawn of each color attacks, indexed by `Color::idx()`.
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&[(-1, 1), (1, 1)]),
    leaper_table(&[(-1, -1), (1, -1)]),
];

/// Empty-board rays, indexed by `Direction as usize` then square.
pub static RAYS: [[Bitboard; 64]; 8] = [
    ray_table(Direction::North),
    ray_table(Direction::NorthEast),
    ray_table(Direction::East),
    ray_table(Direction::SouthEast),
    ray_table(Direction::South),
    ray_table(Direction::SouthWest),
    ray_table(Direction::West),
    ray_table(Direction::NorthWest),
];

#[inline]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.idx()][sq as usize]
}

#[inline]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[inline]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

/// Ray from `sq` in `dir`, up to and including the first occupied square.
#[inline]
pub fn ray_attacks(sq: u8, dir: Direction, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir as usize][sq as usize];
    let blockers = ray & occupied;
    let nearest = if dir.is_positive() {
        blockers.lsb()
    } else {
        blockers.msb()
    };
    match nearest {
        Some(blocker) => ray ^ RAYS[dir as usize][blocker as usize],
        None => ray,
    }
}

fn slider_attacks(sq: u8, dirs: &[Direction], occupied: Bitboard) -> Bitboard {
    dirs.iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(sq, dir, occupied))
}

pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    slider_attacks(sq, &Direction::DIAGONAL, occupied)
}

pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    slider_attacks(sq, &Direction::ORTHOGONAL, occupied)
}

pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
