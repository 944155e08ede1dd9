//! Invariants checked along seeded random games.

use chess_core::{Color, Move, Piece, PieceKind, Position, ScoredMove, legal_moves, pseudo_moves};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const STARTS: [&str; 3] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

/// Plays up to `plies` random legal moves, calling `check` before each one.
fn random_walk(seed: u64, plies: usize, mut check: impl FnMut(&Position, &[Move])) {
    let mut rng = StdRng::seed_from_u64(seed);
    for fen in STARTS {
        let mut pos = Position::from_fen(fen).unwrap();
        for _ in 0..plies {
            let moves = legal_moves(&pos);
            check(&pos, &moves);
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            pos.apply_move(mv);
        }
    }
}

#[test]
fn incremental_hash_matches_recomputation() {
    random_walk(1, 120, |pos, _| {
        assert_eq!(pos.hash(), pos.compute_hash(), "{pos}");
    });
}

#[test]
fn fen_round_trips_along_games() {
    random_walk(2, 80, |pos, _| {
        let reparsed = Position::from_fen(&pos.to_fen()).unwrap();
        assert_eq!(&reparsed, pos);
    });
}

#[test]
fn snapshot_restore_is_exact() {
    random_walk(3, 60, |pos, moves| {
        let mut scratch = *pos;
        let snapshot = scratch.snapshot();
        for &mv in moves {
            scratch.apply_move(mv);
            scratch.restore(&snapshot);
            assert_eq!(&scratch, pos);
        }
    });
}

#[test]
fn legal_moves_are_exactly_the_safe_pseudo_moves() {
    random_walk(4, 60, |pos, legal| {
        let mover = pos.side_to_move();
        for mv in pseudo_moves(pos) {
            let mut after = *pos;
            after.apply_move(mv);
            assert_eq!(legal.contains(&mv), !after.in_check(mover), "{pos}: {mv}");
        }
    });
}

#[test]
fn king_cache_tracks_the_king() {
    random_walk(5, 100, |pos, _| {
        for color in Color::ALL {
            let king = pos.pieces(Piece::new(color, PieceKind::King));
            assert_eq!(king.lsb(), Some(pos.king_square(color)));
            assert_eq!(king.popcount(), 1);
        }
    });
}

#[test]
fn moves_serialize_as_plain_records() {
    let mv = Move::new(Piece::new(Color::White, PieceKind::Knight), 6, 21);
    let json = serde_json::to_value(ScoredMove { mv, score: 0.5 }).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "mv": { "piece": { "color": "White", "kind": "Knight" }, "from": 6, "to": 21 },
            "score": 0.5
        })
    );
    let back: ScoredMove = serde_json::from_value(json).unwrap();
    assert_eq!(back.mv, mv);
}
