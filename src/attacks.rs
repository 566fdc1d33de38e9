// Copyright 2020 The gambit developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack detection against a raw piece grid.
//!
//! The scanner works outward from the target square rather than inward from
//! every enemy piece: a single walk along each of the eight rays finds any
//! sliding attacker, and the first step of each ray doubles as the king and
//! pawn check. Knights are handled with a separate jump table. Working on the
//! bare grid instead of the full board lets the legality filter probe
//! hypothetical positions without constructing a board for each one.

use crate::types::{self, Piece, PieceKind, Player, Square, BISHOP_DIRECTIONS};

/// The raw 64-square piece grid, row-major from the top of the board.
pub(crate) type Grid = [Option<Piece>; 64];

pub(crate) fn piece_on(grid: &Grid, square: Square) -> Option<Piece> {
    if square.in_bounds() {
        grid[square.index()]
    } else {
        None
    }
}

/// Whether `target` is attacked by any piece belonging to `by`. A square
/// occupied by one of `by`'s own pieces can still be attacked (defended) by
/// another.
pub(crate) fn square_attacked(grid: &Grid, target: Square, by: Player) -> bool {
    for &dir in &types::CARDINAL_DIRECTIONS {
        let diagonal = BISHOP_DIRECTIONS.contains(&dir);
        let mut cursor = target.translate(dir);
        let mut steps = 1;
        while cursor.in_bounds() {
            if let Some(piece) = grid[cursor.index()] {
                if piece.player == by && ray_attacks(piece.kind, cursor, target, diagonal, steps, by)
                {
                    return true;
                }
                // Any piece, friend or foe, blocks the rest of the ray.
                break;
            }

            cursor = cursor.translate(dir);
            steps += 1;
        }
    }

    for &jump in &types::KNIGHT_JUMPS {
        let cursor = target.translate(jump);
        if !cursor.in_bounds() {
            continue;
        }

        if let Some(piece) = grid[cursor.index()] {
            if piece.player == by && piece.kind == PieceKind::Knight {
                return true;
            }
        }
    }

    false
}

// Whether a piece of the given kind sitting `steps` squares down a ray from
// `target` attacks it along that ray.
fn ray_attacks(
    kind: PieceKind,
    cursor: Square,
    target: Square,
    diagonal: bool,
    steps: i8,
    by: Player,
) -> bool {
    match kind {
        PieceKind::Queen => true,
        PieceKind::Rook => !diagonal,
        PieceKind::Bishop => diagonal,
        PieceKind::King => steps == 1,
        PieceKind::Pawn => {
            // Pawns only attack the two diagonal squares ahead of them, so
            // the target must sit one diagonal step in the pawn's direction
            // of travel.
            steps == 1 && diagonal && target.row - cursor.row == by.pawn_direction().row_delta
        }
        PieceKind::Knight => false,
    }
}
