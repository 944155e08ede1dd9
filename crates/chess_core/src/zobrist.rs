//! Zobrist hashing keys.
//!
//! A position's hash is the XOR of:
//! - one key per (piece, square) occupied (12 × 64 = 768 keys)
//! - the side-to-move key, when Black is to move
//! - one key per castling right still held (4 keys)
//! - the file key of the en-passant target, when there is one (8 keys)
//!
//! Keys are drawn once per process from an OS-seeded CSPRNG, so hashes are
//! stable within a run but not across runs.

use crate::board::CastlingRights;
use crate::types::Piece;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::LazyLock;

/// Total number of random keys in a table.
pub const KEY_COUNT: usize = 12 * 64 + 1 + 4 + 8;

pub struct ZobristKeys {
    /// Indexed by [`Piece::index`] then square.
    pub pieces: [[u64; 64]; 12],
    /// XORed in while Black is to move.
    pub side_to_move: u64,
    /// One per right, in [`CastlingRights`] bit order.
    pub castling: [u64; 4],
    /// One per en-passant file.
    pub en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Draws every key from `rng`, in a fixed order.
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut keys = ZobristKeys {
            pieces: [[0; 64]; 12],
            side_to_move: 0,
            castling: [0; 4],
            en_passant: [0; 8],
        };
        for table in keys.pieces.iter_mut() {
            for key in table.iter_mut() {
                *key = rng.next_u64();
            }
        }
        keys.side_to_move = rng.next_u64();
        for key in keys.castling.iter_mut().chain(keys.en_passant.iter_mut()) {
            *key = rng.next_u64();
        }
        keys
    }

    pub fn from_entropy() -> Self {
        Self::generate(&mut StdRng::from_entropy())
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.index()][sq as usize]
    }

    /// XOR of the keys of every right held in `rights`.
    #[inline]
    pub fn castling_key(&self, rights: CastlingRights) -> u64 {
        self.castling
            .iter()
            .enumerate()
            .filter(|(bit, _)| rights.bits() & (1 << bit) != 0)
            .fold(0, |acc, (_, key)| acc ^ key)
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

/// Process-wide keys, drawn on first use.
pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::from_entropy);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
