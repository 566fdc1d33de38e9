// Copyright 2020 The gambit developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
extern crate gambit;

use std::convert::TryInto;

use gambit::{Board, Move, MoveKind, Piece, PieceKind, Player, Square};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sq(name: &str) -> Square {
    name.try_into().expect("valid square name")
}

fn board(placements: &[(&str, PieceKind, Player)]) -> Board {
    Board::from_placements(
        placements
            .iter()
            .map(|&(name, kind, player)| (sq(name), Piece::new(kind, player))),
    )
    .expect("valid placement list")
}

fn moves_from(board: &Board, from: &str) -> Vec<Move> {
    let start = sq(from);
    board
        .possible_moves()
        .into_iter()
        .filter(|mov| mov.start() == start)
        .collect()
}

fn apply(board: &mut Board, from: &str, to: &str) {
    let wanted = Move::normal(sq(from), sq(to));
    let mov = board
        .possible_moves()
        .into_iter()
        .find(|&mov| mov == wanted)
        .unwrap_or_else(|| panic!("no legal move {}{}", from, to));
    board.apply_move(mov);
}

#[test]
fn opening_position_has_twenty_moves() {
    init();
    let board = Board::new();
    assert_eq!(20, board.possible_moves().len());
}

#[test]
fn en_passant_generated_and_applied() {
    init();
    let mut board = Board::new();
    apply(&mut board, "d2", "d4");
    apply(&mut board, "a7", "a6");
    apply(&mut board, "d4", "d5");
    apply(&mut board, "e7", "e5");

    // the advanced pawn has exactly two choices: push on, or capture the
    // double-pushed pawn in passing.
    assert_eq!(Some(sq("e6")), board.en_passant_square());
    let moves = moves_from(&board, "d5");
    assert_eq!(2, moves.len());

    let push = moves.iter().find(|m| m.end() == sq("d6")).unwrap();
    assert_eq!(MoveKind::Normal, push.kind());

    let ep = moves.iter().find(|m| m.end() == sq("e6")).unwrap();
    assert_eq!(MoveKind::EnPassant, ep.kind());

    // the captured pawn disappears from e5, not from the landing square.
    board.apply_move(*ep);
    assert!(board.piece_at(sq("e5")).is_none());
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Player::One)),
        board.piece_at(sq("e6"))
    );
}

#[test]
fn en_passant_expires_after_one_move() {
    init();
    let mut board = Board::new();
    apply(&mut board, "d2", "d4");
    apply(&mut board, "a7", "a6");
    apply(&mut board, "d4", "d5");
    apply(&mut board, "e7", "e5");
    apply(&mut board, "b2", "b3");
    apply(&mut board, "a6", "a5");

    // the opportunity was declined, so only the push remains.
    assert_eq!(None, board.en_passant_square());
    let moves = moves_from(&board, "d5");
    assert_eq!(1, moves.len());
    assert_eq!(sq("d6"), moves[0].end());
}

#[test]
fn promotion_fans_out_to_four_moves() {
    init();
    let board = board(&[
        ("a7", PieceKind::Pawn, Player::One),
        ("e1", PieceKind::King, Player::One),
        ("e8", PieceKind::King, Player::Two),
    ]);

    let moves = moves_from(&board, "a7");
    assert_eq!(4, moves.len());
    for mov in &moves {
        assert_eq!(sq("a8"), mov.end());
        assert!(mov.is_promotion());
    }

    let targets: Vec<PieceKind> = moves.iter().filter_map(|m| m.promotion()).collect();
    for kind in &[
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ] {
        assert!(targets.contains(kind), "missing promotion to {}", kind);
    }
}

#[test]
fn both_castles_generated_when_clear() {
    init();
    let board = board(&[
        ("e1", PieceKind::King, Player::One),
        ("a1", PieceKind::Rook, Player::One),
        ("h1", PieceKind::Rook, Player::One),
        ("e8", PieceKind::King, Player::Two),
    ]);
    assert!(board.can_castle_kingside(Player::One));
    assert!(board.can_castle_queenside(Player::One));

    let moves = moves_from(&board, "e1");
    let kingside = moves.iter().find(|m| m.end() == sq("g1")).unwrap();
    assert_eq!(MoveKind::CastleKingSide, kingside.kind());

    let queenside = moves.iter().find(|m| m.end() == sq("c1")).unwrap();
    assert_eq!(MoveKind::CastleQueenSide, queenside.kind());
}

#[test]
fn castle_blocked_by_attacked_transit_square() {
    init();
    // the rook on f8 sweeps f1, which the king would pass through.
    let board = board(&[
        ("e1", PieceKind::King, Player::One),
        ("a1", PieceKind::Rook, Player::One),
        ("h1", PieceKind::Rook, Player::One),
        ("e8", PieceKind::King, Player::Two),
        ("f8", PieceKind::Rook, Player::Two),
    ]);

    let moves = moves_from(&board, "e1");
    assert!(moves.iter().all(|m| m.end() != sq("g1")));
    assert!(moves.iter().any(|m| m.end() == sq("c1")));
}

#[test]
fn castle_blocked_by_intervening_piece() {
    init();
    // b1 is occupied. the king never crosses b1, but the rook does.
    let board = board(&[
        ("e1", PieceKind::King, Player::One),
        ("a1", PieceKind::Rook, Player::One),
        ("h1", PieceKind::Rook, Player::One),
        ("b1", PieceKind::Knight, Player::One),
        ("e8", PieceKind::King, Player::Two),
    ]);

    let moves = moves_from(&board, "e1");
    assert!(moves.iter().all(|m| m.end() != sq("c1")));
    assert!(moves.iter().any(|m| m.end() == sq("g1")));
}

#[test]
fn no_castle_while_in_check() {
    init();
    let board = board(&[
        ("e1", PieceKind::King, Player::One),
        ("a1", PieceKind::Rook, Player::One),
        ("h1", PieceKind::Rook, Player::One),
        ("e8", PieceKind::King, Player::Two),
        ("e5", PieceKind::Rook, Player::Two),
    ]);

    assert!(board.is_check());
    let moves = moves_from(&board, "e1");
    assert!(moves.iter().all(|m| !m.is_castle()));
}

#[test]
fn rook_rays_stop_at_pieces() {
    init();
    let board = board(&[
        ("d4", PieceKind::Rook, Player::One),
        ("d6", PieceKind::Pawn, Player::One),
        ("f4", PieceKind::Pawn, Player::Two),
        ("h1", PieceKind::King, Player::One),
        ("a8", PieceKind::King, Player::Two),
    ]);

    // north stops short of the friendly pawn, east ends on the capture.
    let moves = moves_from(&board, "d4");
    assert_eq!(9, moves.len());
    assert!(moves.iter().any(|m| m.end() == sq("f4")));
    assert!(moves.iter().all(|m| m.end() != sq("d6")));
    assert!(moves.iter().all(|m| m.end() != sq("g4")));
}

#[test]
fn knight_in_the_corner() {
    init();
    let board = board(&[
        ("a1", PieceKind::Knight, Player::One),
        ("e1", PieceKind::King, Player::One),
        ("e8", PieceKind::King, Player::Two),
    ]);

    let moves = moves_from(&board, "a1");
    assert_eq!(2, moves.len());
    assert!(moves.iter().any(|m| m.end() == sq("b3")));
    assert!(moves.iter().any(|m| m.end() == sq("c2")));
}

#[test]
fn king_avoids_attacked_squares() {
    init();
    let board = board(&[
        ("e1", PieceKind::King, Player::One),
        ("a2", PieceKind::Rook, Player::Two),
        ("e8", PieceKind::King, Player::Two),
    ]);

    // the whole second rank is swept, leaving only the two first-rank
    // squares.
    let moves = moves_from(&board, "e1");
    assert_eq!(2, moves.len());
    assert!(moves.iter().any(|m| m.end() == sq("d1")));
    assert!(moves.iter().any(|m| m.end() == sq("f1")));
}

#[test]
fn pinned_rook_stays_on_the_file() {
    init();
    let board = board(&[
        ("e1", PieceKind::King, Player::One),
        ("e4", PieceKind::Rook, Player::One),
        ("e8", PieceKind::Rook, Player::Two),
        ("a8", PieceKind::King, Player::Two),
    ]);

    let moves = moves_from(&board, "e4");
    assert_eq!(6, moves.len());
    assert!(moves.iter().all(|m| m.end().col == sq("e4").col));
    assert!(moves.iter().any(|m| m.end() == sq("e8")));
}

#[test]
fn attack_queries() {
    init();
    let board = board(&[
        ("d4", PieceKind::Rook, Player::One),
        ("h1", PieceKind::King, Player::One),
        ("a8", PieceKind::King, Player::Two),
    ]);

    assert!(board.is_attacked(sq("d8"), Player::One));
    assert!(board.is_attacked(sq("a4"), Player::One));
    assert!(!board.is_attacked(sq("e5"), Player::One));

    let attacked = board.attacked_squares(Player::One);
    assert!(attacked.contains(&sq("d8")));
    assert!(attacked.contains(&sq("g2")));
    assert!(!attacked.contains(&sq("e5")));

    let by_two = board.attacked_squares(Player::Two);
    assert!(by_two.contains(&sq("b7")));
    assert!(!by_two.contains(&sq("d8")));
}

#[test]
fn double_push_requires_both_squares_empty() {
    init();
    let mut placements = vec![
        ("e2", PieceKind::Pawn, Player::One),
        ("e1", PieceKind::King, Player::One),
        ("a8", PieceKind::King, Player::Two),
        ("e3", PieceKind::Knight, Player::Two),
    ];
    let blocked = board(&placements);
    assert!(moves_from(&blocked, "e2").is_empty());

    // with the blocker one square further out, only the single push exists.
    placements[3].0 = "e4";
    let half_blocked = board(&placements);
    let moves = moves_from(&half_blocked, "e2");
    assert_eq!(1, moves.len());
    assert_eq!(sq("e3"), moves[0].end());
}
