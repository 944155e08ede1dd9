use super::*;
use chess_core::{Color, PieceKind};

fn knight_move() -> Move {
    Move::new(Piece::new(Color::Black, PieceKind::Knight), 62, 45)
}

#[test]
fn pack_keeps_every_field() {
    let entry = TtEntry {
        bound: Bound::Lower,
        best_move: Some(knight_move()),
        score: -3.25,
        depth: 7,
    };
    assert_eq!(TtEntry::unpack(entry.pack()), Some(entry));

    let leaf = TtEntry {
        bound: Bound::Exact,
        best_move: None,
        score: 0.0,
        depth: 0,
    };
    assert_ne!(leaf.pack(), 0);
    assert_eq!(TtEntry::unpack(leaf.pack()), Some(leaf));
}

#[test]
fn pack_preserves_extreme_scores() {
    for score in [2_000_000.0_f32, -1_000_000.0, f32::MIN_POSITIVE, -0.0] {
        let entry = TtEntry {
            bound: Bound::Upper,
            best_move: None,
            score,
            depth: 3,
        };
        let back = TtEntry::unpack(entry.pack()).unwrap();
        assert_eq!(back.score.to_bits(), score.to_bits());
    }
}

#[test]
fn depth_saturates() {
    let entry = TtEntry {
        bound: Bound::Exact,
        best_move: None,
        score: 1.0,
        depth: 200,
    };
    assert_eq!(TtEntry::unpack(entry.pack()).unwrap().depth, TtEntry::MAX_DEPTH);
}

#[test]
fn empty_word_is_not_an_entry() {
    assert_eq!(TtEntry::unpack(0), None);
}

#[test]
fn store_then_probe() {
    let tt = TranspositionTable::new(1024);
    let entry = TtEntry {
        bound: Bound::Exact,
        best_move: Some(knight_move()),
        score: 1.5,
        depth: 4,
    };
    let hash = 0xDEAD_BEEF_1234_5678;
    tt.add(hash, entry);
    assert_eq!(tt.get(hash), Some(entry));
    assert_eq!(tt.occupancy(tt.len()), 1);
}

#[test]
fn unwritten_slots_miss_even_for_zero_hash() {
    let tt = TranspositionTable::new(16);
    assert_eq!(tt.get(0), None);
    assert_eq!(tt.get(5), None);
}

#[test]
fn colliding_hash_does_not_match() {
    let tt = TranspositionTable::new(4);
    let entry = TtEntry {
        bound: Bound::Lower,
        best_move: None,
        score: 2.0,
        depth: 1,
    };
    tt.add(1, entry);
    // 5 maps to the same slot but is a different position
    assert_eq!(tt.get(5), None);

    // Always replace
    let newer = TtEntry { score: -2.0, ..entry };
    tt.add(5, newer);
    assert_eq!(tt.get(5), Some(newer));
    assert_eq!(tt.get(1), None);
}

#[test]
fn clear_empties_the_table() {
    let mut tt = TranspositionTable::new(8);
    let entry = TtEntry {
        bound: Bound::Upper,
        best_move: None,
        score: 0.5,
        depth: 2,
    };
    tt.add(3, entry);
    tt.clear();
    assert_eq!(tt.get(3), None);
    assert_eq!(tt.occupancy(8), 0);
}

#[test]
fn zero_slots_rounds_up_to_one() {
    let tt = TranspositionTable::new(0);
    assert_eq!(tt.len(), 1);
    assert!(!tt.is_empty());
}

#[test]
fn classify_against_window() {
    assert_eq!(Bound::classify(-1.0, -1.0, 1.0), Bound::Upper);
    assert_eq!(Bound::classify(1.0, -1.0, 1.0), Bound::Lower);
    assert_eq!(Bound::classify(0.0, -1.0, 1.0), Bound::Exact);
    assert_eq!(
        Bound::classify(3.0, f32::NEG_INFINITY, f32::INFINITY),
        Bound::Exact
    );
}

#[test]
fn concurrent_writers_never_produce_foreign_entries() {
    let tt = TranspositionTable::new(2);
    std::thread::scope(|scope| {
        for writer in 0..4u64 {
            let tt = &tt;
            scope.spawn(move || {
                for i in 0..10_000u64 {
                    let hash = writer * 1_000_003 + i * 2;
                    let entry = TtEntry {
                        bound: Bound::Exact,
                        best_move: None,
                        score: hash as f32,
                        depth: 1,
                    };
                    tt.add(hash, entry);
                    if let Some(found) = tt.get(hash) {
                        assert_eq!(found.score, hash as f32);
                    }
                }
            });
        }
    });
}
