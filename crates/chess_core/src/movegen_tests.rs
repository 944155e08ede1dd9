use super::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn has_move(moves: &[Move], text: &str) -> bool {
    moves.iter().any(|mv| mv.to_string() == text)
}

#[test]
fn test_startpos_moves() {
    let moves = legal_moves(&Position::startpos());
    assert_eq!(moves.len(), 20);
    assert!(has_move(&moves, "e2e4"));
    assert!(has_move(&moves, "g1f3"));
}

#[test]
fn test_kiwipete_moves() {
    let pos = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert!(has_move(&moves, "e1g1"));
    assert!(has_move(&moves, "e1c1"));
}

#[test]
fn pawn_destinations_include_pushes_and_captures() {
    let pos = pos("4k3/8/8/8/8/3p1p2/4P3/4K3 w - - 0 1");
    let pawn = Piece::new(Color::White, PieceKind::Pawn);
    assert_eq!(
        piece_destinations(&pos, pawn, 12),
        Bitboard::from_squares(&[19, 20, 21, 28])
    );

    // Blocked pawn cannot jump over
    let pos = pos_blocked();
    assert!(piece_destinations(&pos, pawn, 12).is_empty());
}

fn pos_blocked() -> Position {
    pos("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1")
}

#[test]
fn castling_requires_safe_path() {
    // f8 rook covers f1: kingside is out, queenside is fine
    let moves = legal_moves(&pos("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1"));
    assert!(!has_move(&moves, "e1g1"));
    assert!(has_move(&moves, "e1c1"));

    // b1 attacked does not matter, the king never crosses it
    let moves = legal_moves(&pos("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1"));
    assert!(has_move(&moves, "e1c1"));

    // No castling out of check
    let moves = legal_moves(&pos("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1"));
    assert!(!has_move(&moves, "e1g1"));
    assert!(!has_move(&moves, "e1c1"));

    // Occupied squares between king and rook
    let moves = legal_moves(&pos("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1"));
    assert!(!has_move(&moves, "e1g1"));
    assert!(!has_move(&moves, "e1c1"));
}

#[test]
fn black_castles_both_ways() {
    let moves = legal_moves(&pos("r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1"));
    assert!(has_move(&moves, "e8g8"));
    assert!(has_move(&moves, "e8c8"));
}

#[test]
fn en_passant_for_both_colors() {
    let white = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
    assert!(has_move(&legal_moves(&white), "e5d6"));

    let black = pos("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
    assert!(has_move(&legal_moves(&black), "d4e3"));
}

#[test]
fn en_passant_exposing_king_is_illegal() {
    let pos = pos("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");
    let moves = legal_moves(&pos);
    assert!(!has_move(&moves, "e5d6"));
    assert!(has_move(&moves, "e5e6"));
}

#[test]
fn promotion_is_a_single_queen_move() {
    let moves = legal_moves(&pos("8/4P3/8/8/8/8/k7/4K3 w - - 0 1"));
    let promotions: Vec<_> = moves.iter().filter(|mv| mv.is_promotion()).collect();
    assert_eq!(promotions.len(), 1);
    assert_eq!(promotions[0].to_string(), "e7e8q");
}

#[test]
fn legal_moves_never_leave_king_attacked() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1",
    ] {
        let start = pos(fen);
        let mover = start.side_to_move();
        let legal = legal_moves(&start);
        for mv in pseudo_moves(&start) {
            let mut after = start;
            after.apply_move(mv);
            assert_eq!(
                legal.contains(&mv),
                !after.in_check(mover),
                "{fen}: {mv}"
            );
        }
    }
}

#[test]
fn legal_moves_into_leaves_position_untouched() {
    let mut pos = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = pos;
    let mut buf = Vec::new();
    legal_moves_into(&mut pos, &mut buf);
    assert_eq!(pos, before);
    assert_eq!(buf.len(), 48);
}

#[test]
fn game_status_classifies_terminal_positions() {
    let mated = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(
        mated.game_status(),
        GameStatus::Checkmate {
            loser: Color::White
        }
    );

    let stalemate = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert_eq!(stalemate.game_status(), GameStatus::Stalemate);
    assert!(stalemate.game_status().is_draw());

    assert_eq!(Position::startpos().game_status(), GameStatus::Ongoing);
}

#[test]
fn play_rejects_illegal_moves() {
    let mut pos = Position::startpos();
    let e2e4 = pos.parse_move("e2e4").unwrap();
    pos.play(e2e4).unwrap();
    assert_eq!(pos.en_passant(), Some(20));

    let pawn = Piece::new(Color::Black, PieceKind::Pawn);
    let bogus = Move::new(pawn, 52, 28);
    assert_eq!(pos.play(bogus), Err(MoveError::Illegal(bogus)));
    assert_eq!(pos.side_to_move(), Color::Black);
}

#[test]
fn parse_move_checks_text_and_legality() {
    let pos = Position::startpos();
    assert!(matches!(pos.parse_move("e2"), Err(MoveError::Unparseable(_))));
    assert!(matches!(pos.parse_move("e2e4q"), Err(MoveError::Unparseable(_))));
    assert!(matches!(pos.parse_move("e3e4"), Err(MoveError::Unparseable(_))));
    assert!(matches!(pos.parse_move("e2e5"), Err(MoveError::Illegal(_))));

    let promo = self::pos("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    assert_eq!(promo.parse_move("e7e8q"), promo.parse_move("e7e8"));
}
