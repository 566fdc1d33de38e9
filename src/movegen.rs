// Copyright 2020 The gambit developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation.
//!
//! Generation happens in two phases. `pseudo_legal_moves` produces every move
//! the pieces are mechanically capable of, ignoring whether the mover's king
//! is left attacked. `legal_moves` then filters that list by speculatively
//! applying each candidate to a scratch copy of the piece grid and asking the
//! attack scanner whether the king survives. The scratch copy is the 64-entry
//! grid alone, which is `Copy`, so filtering never clones move history or any
//! other board bookkeeping.

use arrayvec::ArrayVec;

use crate::attacks::{self, Grid};
use crate::board::Board;
use crate::moves::{Move, MoveKind};
use crate::types::{
    self, CastleStatus, Direction, Piece, PieceKind, Player, Square, BISHOP_DIRECTIONS,
    ROOK_DIRECTIONS,
};

/// The canonical move list type. 256 comfortably exceeds the number of legal
/// moves in any reachable position.
pub type MoveVec = ArrayVec<[Move; 256]>;

/// Generates every mechanically possible move for the board's current player,
/// without regard for whether the king is left in check.
pub(crate) fn pseudo_legal_moves(board: &Board, moves: &mut MoveVec) {
    let player = board.side_to_move();
    for square in types::squares() {
        let piece = match board.piece_at(square) {
            Some(piece) if piece.player == player => piece,
            _ => continue,
        };

        match piece.kind {
            PieceKind::Pawn => pawn_moves(board, square, player, moves),
            PieceKind::Knight => step_moves(board, square, player, &types::KNIGHT_JUMPS, moves),
            PieceKind::Bishop => ray_moves(board, square, player, &BISHOP_DIRECTIONS, moves),
            PieceKind::Rook => ray_moves(board, square, player, &ROOK_DIRECTIONS, moves),
            PieceKind::Queen => ray_moves(board, square, player, &types::CARDINAL_DIRECTIONS, moves),
            PieceKind::King => {
                step_moves(board, square, player, &types::CARDINAL_DIRECTIONS, moves);
                castle_moves(board, square, player, moves);
            }
        }
    }
}

/// Generates the legal moves for the board's current player.
pub(crate) fn legal_moves(board: &Board) -> MoveVec {
    let mut candidates = MoveVec::new();
    pseudo_legal_moves(board, &mut candidates);

    let mut moves = MoveVec::new();
    for mov in candidates {
        if !leaves_king_attacked(board, mov) {
            moves.push(mov);
        }
    }

    trace!(
        "{} legal moves for player {}",
        moves.len(),
        board.side_to_move()
    );
    moves
}

fn pawn_moves(board: &Board, square: Square, player: Player, moves: &mut MoveVec) {
    let dir = player.pawn_direction();

    let forward = square.translate(dir);
    if forward.in_bounds() && board.is_empty_square(forward) {
        push_pawn_move(forward, player, Move::normal(square, forward), moves);

        if square.row == player.pawn_start_row() {
            let double = forward.translate(dir);
            if board.is_empty_square(double) {
                moves.push(Move::normal(square, double));
            }
        }
    }

    for &col_delta in &[-1, 1] {
        let target = square.translate(Direction::new(dir.row_delta, col_delta));
        if !target.in_bounds() {
            continue;
        }

        if board.is_enemy(target, player) {
            push_pawn_move(target, player, Move::normal(square, target), moves);
        } else if board.en_passant_square() == Some(target) {
            moves.push(Move::en_passant(square, target));
        }
    }
}

// A pawn move landing on the final row fans out into one move per promotion
// target; anywhere else it is the move itself.
fn push_pawn_move(end: Square, player: Player, mov: Move, moves: &mut MoveVec) {
    if end.row == player.promotion_row() {
        for &kind in &types::PROMOTION_KINDS {
            moves.push(Move::pawn_promote(mov.start(), end, kind));
        }
    } else {
        moves.push(mov);
    }
}

fn step_moves(
    board: &Board,
    square: Square,
    player: Player,
    dirs: &[Direction],
    moves: &mut MoveVec,
) {
    for &dir in dirs {
        let target = square.translate(dir);
        if !target.in_bounds() {
            continue;
        }

        if board.is_empty_square(target) || board.is_enemy(target, player) {
            moves.push(Move::normal(square, target));
        }
    }
}

fn ray_moves(
    board: &Board,
    square: Square,
    player: Player,
    dirs: &[Direction],
    moves: &mut MoveVec,
) {
    for &dir in dirs {
        let mut cursor = square.translate(dir);
        while cursor.in_bounds() && board.is_empty_square(cursor) {
            moves.push(Move::normal(square, cursor));
            cursor = cursor.translate(dir);
        }

        if cursor.in_bounds() && board.is_enemy(cursor, player) {
            moves.push(Move::normal(square, cursor));
        }
    }
}

fn castle_moves(board: &Board, king: Square, player: Player, moves: &mut MoveVec) {
    // Castling out of check is never legal, and the rights flags already
    // encode that the king is still on its home square.
    if board.is_attacked(king, player.toggle()) {
        return;
    }

    let opponent = player.toggle();
    let row = player.home_row();

    if board.castle_status().contains(CastleStatus::kingside(player)) {
        let one = Square::new(row, 5);
        let two = Square::new(row, 6);
        if board.is_empty_square(one)
            && board.is_empty_square(two)
            && !board.is_attacked(one, opponent)
            && !board.is_attacked(two, opponent)
        {
            moves.push(Move::castle_kingside(king, two));
        }
    }

    if board.castle_status().contains(CastleStatus::queenside(player)) {
        let one = Square::new(row, 3);
        let two = Square::new(row, 2);
        let three = Square::new(row, 1);
        // The square next to the rook only needs to be empty; the king never
        // passes through it.
        if board.is_empty_square(one)
            && board.is_empty_square(two)
            && board.is_empty_square(three)
            && !board.is_attacked(one, opponent)
            && !board.is_attacked(two, opponent)
        {
            moves.push(Move::castle_queenside(king, two));
        }
    }
}

// Applies `mov` to a scratch copy of the grid and reports whether the mover's
// king ends up attacked.
fn leaves_king_attacked(board: &Board, mov: Move) -> bool {
    let player = board.side_to_move();
    let mut grid = *board.grid();
    raw_apply(&mut grid, mov, player);

    let king = find_king(&grid, player);
    attacks::square_attacked(&grid, king, player.toggle())
}

// Mutates the bare grid the way the board would, minus all bookkeeping. Only
// piece placement matters for attack detection.
fn raw_apply(grid: &mut Grid, mov: Move, player: Player) {
    let piece = grid[mov.start().index()].take().expect("moving an empty square");

    match mov.kind() {
        MoveKind::EnPassant => {
            let captured = Square::new(mov.start().row, mov.end().col);
            grid[captured.index()] = None;
            grid[mov.end().index()] = Some(piece);
        }
        MoveKind::PawnPromote(kind) => {
            grid[mov.end().index()] = Some(Piece::new(kind, player));
        }
        MoveKind::CastleKingSide => {
            grid[mov.end().index()] = Some(piece);
            let rook_start = Square::new(player.home_row(), 7);
            let rook_end = mov.end().translate(types::WEST);
            grid[rook_end.index()] = grid[rook_start.index()].take();
        }
        MoveKind::CastleQueenSide => {
            grid[mov.end().index()] = Some(piece);
            let rook_start = Square::new(player.home_row(), 0);
            let rook_end = mov.end().translate(types::EAST);
            grid[rook_end.index()] = grid[rook_start.index()].take();
        }
        MoveKind::Normal => {
            grid[mov.end().index()] = Some(piece);
        }
    }
}

fn find_king(grid: &Grid, player: Player) -> Square {
    for square in types::squares() {
        if let Some(piece) = grid[square.index()] {
            if piece.kind == PieceKind::King && piece.player == player {
                return square;
            }
        }
    }

    panic!("board invariant violated: player {} has no king", player);
}
