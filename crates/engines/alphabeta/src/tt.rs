//! Lock-free transposition table shared by all search threads.
//!
//! Each slot holds two atomic words: the packed entry, and the entry XORed
//! with the full position hash. A reader accepts a slot only if the two words
//! XOR back to its own hash, so a slot torn by a concurrent writer (or owned
//! by another position) reads as a miss rather than as a wrong entry.

use std::sync::atomic::{AtomicU64, Ordering};

use chess_core::{Move, Piece};

/// How a stored score relates to the true minimax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Bound {
    /// True value >= score (the search failed high)
    Lower = 1,
    /// Score is the minimax value
    Exact = 2,
    /// True value <= score (the search failed low)
    Upper = 3,
}

impl Bound {
    /// Classifies a score returned from a search over `[alpha, beta]`.
    #[inline]
    pub fn classify(score: f32, alpha: f32, beta: f32) -> Bound {
        if score <= alpha {
            Bound::Upper
        } else if score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }

    fn from_bits(bits: u64) -> Option<Bound> {
        match bits {
            1 => Some(Bound::Lower),
            2 => Some(Bound::Exact),
            3 => Some(Bound::Upper),
            _ => None,
        }
    }
}

/// A search result for one position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TtEntry {
    pub bound: Bound,
    /// Best move found, tried first when the position is searched again
    pub best_move: Option<Move>,
    pub score: f32,
    /// Remaining depth the score was searched to. Stored saturated at 63.
    pub depth: u8,
}

/// Packed entry layout (low bit first):
///
/// | bits  | field                                     |
/// |-------|-------------------------------------------|
/// | 0-1   | bound (0 marks an empty slot)             |
/// | 2-5   | move piece, `Piece::index() + 1` (0 none) |
/// | 6-11  | move from-square                          |
/// | 12-17 | move to-square                            |
/// | 18-49 | score, `f32` bit pattern                  |
/// | 50-55 | depth                                     |
impl TtEntry {
    const BOUND_SIZE: u32 = 2;
    const BOUND_SHIFT: u32 = 0;
    const BOUND_MASK: u64 = (1 << Self::BOUND_SIZE) - 1;

    const PIECE_SIZE: u32 = 4;
    const PIECE_SHIFT: u32 = Self::BOUND_SHIFT + Self::BOUND_SIZE;
    const PIECE_MASK: u64 = (1 << Self::PIECE_SIZE) - 1;

    const SQUARE_SIZE: u32 = 6;
    const SQUARE_MASK: u64 = (1 << Self::SQUARE_SIZE) - 1;
    const FROM_SHIFT: u32 = Self::PIECE_SHIFT + Self::PIECE_SIZE;
    const TO_SHIFT: u32 = Self::FROM_SHIFT + Self::SQUARE_SIZE;

    const SCORE_SIZE: u32 = 32;
    const SCORE_SHIFT: u32 = Self::TO_SHIFT + Self::SQUARE_SIZE;
    const SCORE_MASK: u64 = (1 << Self::SCORE_SIZE) - 1;

    const DEPTH_SIZE: u32 = 6;
    const DEPTH_SHIFT: u32 = Self::SCORE_SHIFT + Self::SCORE_SIZE;
    const DEPTH_MASK: u64 = (1 << Self::DEPTH_SIZE) - 1;

    pub const MAX_DEPTH: u8 = Self::DEPTH_MASK as u8;

    /// Packs the entry into one word. The result is never zero.
    pub fn pack(&self) -> u64 {
        let (piece, from, to) = match self.best_move {
            Some(mv) => (mv.piece.index() as u64 + 1, mv.from as u64, mv.to as u64),
            None => (0, 0, 0),
        };
        let depth = self.depth.min(Self::MAX_DEPTH) as u64;

        ((self.bound as u64) << Self::BOUND_SHIFT)
            | (piece << Self::PIECE_SHIFT)
            | (from << Self::FROM_SHIFT)
            | (to << Self::TO_SHIFT)
            | ((self.score.to_bits() as u64) << Self::SCORE_SHIFT)
            | (depth << Self::DEPTH_SHIFT)
    }

    /// Inverse of [`TtEntry::pack`]. Returns None for an empty slot.
    pub fn unpack(data: u64) -> Option<TtEntry> {
        let bound = Bound::from_bits((data >> Self::BOUND_SHIFT) & Self::BOUND_MASK)?;
        let piece_bits = ((data >> Self::PIECE_SHIFT) & Self::PIECE_MASK) as usize;
        let best_move = piece_bits.checked_sub(1).and_then(Piece::from_index).map(|piece| {
            Move::new(
                piece,
                ((data >> Self::FROM_SHIFT) & Self::SQUARE_MASK) as u8,
                ((data >> Self::TO_SHIFT) & Self::SQUARE_MASK) as u8,
            )
        });

        Some(TtEntry {
            bound,
            best_move,
            score: f32::from_bits(((data >> Self::SCORE_SHIFT) & Self::SCORE_MASK) as u32),
            depth: ((data >> Self::DEPTH_SHIFT) & Self::DEPTH_MASK) as u8,
        })
    }
}

#[derive(Default)]
struct Slot {
    /// hash ^ data
    check: AtomicU64,
    data: AtomicU64,
}

/// Fixed-size, always-replace table indexed by `hash % slots`.
pub struct TranspositionTable {
    slots: Box<[Slot]>,
}

impl TranspositionTable {
    /// Allocates `slots` empty slots. At least one slot is always allocated.
    pub fn new(slots: usize) -> Self {
        let slots = (0..slots.max(1)).map(|_| Slot::default()).collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    fn slot(&self, hash: u64) -> &Slot {
        &self.slots[(hash % self.slots.len() as u64) as usize]
    }

    /// Entry stored for exactly this hash, if any.
    #[inline]
    pub fn get(&self, hash: u64) -> Option<TtEntry> {
        let slot = self.slot(hash);
        let data = slot.data.load(Ordering::Relaxed);
        let check = slot.check.load(Ordering::Relaxed);
        if check ^ data != hash {
            return None;
        }
        TtEntry::unpack(data)
    }

    /// Stores `entry` for `hash`, replacing whatever the slot held.
    #[inline]
    pub fn add(&self, hash: u64, entry: TtEntry) {
        let slot = self.slot(hash);
        let data = entry.pack();
        slot.check.store(hash ^ data, Ordering::Relaxed);
        slot.data.store(data, Ordering::Relaxed);
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot.check.get_mut() = 0;
            *slot.data.get_mut() = 0;
        }
    }

    /// Number of occupied slots among the first `sample` (for diagnostics).
    pub fn occupancy(&self, sample: usize) -> usize {
        self.slots
            .iter()
            .take(sample)
            .filter(|slot| slot.data.load(Ordering::Relaxed) != 0)
            .count()
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
