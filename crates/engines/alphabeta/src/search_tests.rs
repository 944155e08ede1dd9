use super::*;
use crate::eval::MaterialEvaluator;
use chess_core::{Piece, PieceKind, ScoredMove};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn search(fen: &str, depth: u8) -> (f32, TranspositionTable) {
    let tt = TranspositionTable::new(1 << 14);
    let mut p = pos(fen);
    let before = p;
    let score = {
        let mut searcher = Searcher::new(&tt, &MaterialEvaluator);
        searcher.alpha_beta(&mut p, depth, f32::NEG_INFINITY, f32::INFINITY)
    };
    assert_eq!(p, before, "search must restore the position");
    (score, tt)
}

#[test]
fn mate_scores_favor_the_winner_and_shallow_mates() {
    assert_eq!(mate_score(Color::White, 0), -MATE_SCORE);
    assert_eq!(mate_score(Color::Black, 2), 3.0 * MATE_SCORE);
    assert!(mate_score(Color::Black, 3) > mate_score(Color::Black, 1));
}

#[test]
fn checkmated_side_scores_as_mate() {
    // Fool's mate, White to move and mated
    let (score, _) = search(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        2,
    );
    assert_eq!(score, mate_score(Color::White, 2));
}

#[test]
fn stalemate_scores_as_draw() {
    let (score, _) = search("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", 3);
    assert_eq!(score, DRAW_SCORE);
}

#[test]
fn no_progress_draw_short_circuits() {
    // White is a queen up but the clock has run out
    let (score, _) = search("4k3/8/8/8/8/8/8/3QK3 w - - 100 80", 3);
    assert_eq!(score, DRAW_SCORE);
}

#[test]
fn horizon_is_evaluated_on_an_exhausted_clock() {
    let fen = "4k3/8/8/8/8/8/8/3QK3 w - - 100 80";
    let (score, tt) = search(fen, 0);
    assert_eq!(score, 9.0);
    let entry = tt.get(pos(fen).hash()).unwrap();
    assert_eq!((entry.bound, entry.depth, entry.score), (Bound::Exact, 0, 9.0));

    // One ply above the horizon the clock wins
    let (score, _) = search(fen, 1);
    assert_eq!(score, DRAW_SCORE);
}

#[test]
fn horizon_returns_the_evaluation() {
    let (score, tt) = search("4k3/8/8/8/8/8/8/3QK3 w - - 0 1", 0);
    assert_eq!(score, 9.0);
    let entry = tt.get(pos("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").hash()).unwrap();
    assert_eq!(entry.bound, Bound::Exact);
    assert_eq!(entry.best_move, None);
}

#[test]
fn interior_nodes_store_a_best_move() {
    let fen = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";
    let (score, tt) = search(fen, 2);
    // Qe8# leaves Black mated with one ply of depth remaining
    assert_eq!(score, mate_score(Color::Black, 1));

    let entry = tt.get(pos(fen).hash()).unwrap();
    assert_eq!(entry.bound, Bound::Exact);
    assert_eq!(entry.depth, 2);
    assert_eq!(
        entry.best_move,
        Some(Move::new(Piece::new(Color::White, PieceKind::Queen), 4, 60))
    );
}

#[test]
fn exact_entry_is_reused() {
    let tt = TranspositionTable::new(1 << 10);
    let mut p = pos("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    tt.add(
        p.hash(),
        TtEntry {
            bound: Bound::Exact,
            best_move: None,
            score: 42.0,
            depth: 5,
        },
    );
    let mut searcher = Searcher::new(&tt, &MaterialEvaluator);
    assert_eq!(
        searcher.alpha_beta(&mut p, 3, f32::NEG_INFINITY, f32::INFINITY),
        42.0
    );
    assert_eq!(searcher.nodes, 1);

    // A shallower entry is not trusted
    let mut searcher = Searcher::new(&tt, &MaterialEvaluator);
    searcher.alpha_beta(&mut p, 6, f32::NEG_INFINITY, f32::INFINITY);
    assert!(searcher.nodes > 1);
}

#[test]
fn root_ordering_depends_on_mover() {
    let knight = Piece::new(Color::White, PieceKind::Knight);
    let scored = |to, score| ScoredMove {
        mv: Move::new(knight, 6, to),
        score,
    };
    let mut moves = vec![scored(21, 0.5), scored(23, -1.0), scored(12, 2.0)];

    sort_for_mover(&mut moves, Color::White);
    let scores: Vec<f32> = moves.iter().map(|m| m.score).collect();
    assert_eq!(scores, vec![2.0, 0.5, -1.0]);

    sort_for_mover(&mut moves, Color::Black);
    let scores: Vec<f32> = moves.iter().map(|m| m.score).collect();
    assert_eq!(scores, vec![-1.0, 0.5, 2.0]);
}
