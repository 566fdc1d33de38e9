// Copyright 2020 The gambit developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Move` value type and its equality contract.
//!
//! A move is described entirely by its start square, its end square, and its
//! kind. Move equality deliberately ignores the kind, with one exception: two
//! promotions to different pieces are distinct moves even though they share
//! start and end squares. This lets callers construct a bare
//! `Move::normal(start, end)` and match it against whatever the generator
//! produced for that pair of squares.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use crate::types::{PieceKind, Player, Square};

/// The flavor of a move, distinguishing the moves that do more than relocate
/// a single piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    CastleKingSide,
    CastleQueenSide,
    EnPassant,
    PawnPromote(PieceKind),
}

/// A single chess move. The moving player is stamped onto the move when the
/// board applies it; moves constructed by hand carry no player.
#[derive(Copy, Clone, Debug)]
pub struct Move {
    start: Square,
    end: Square,
    kind: MoveKind,
    player: Option<Player>,
}

impl Move {
    pub fn normal(start: Square, end: Square) -> Move {
        Move {
            start,
            end,
            kind: MoveKind::Normal,
            player: None,
        }
    }

    pub fn castle_kingside(start: Square, end: Square) -> Move {
        Move {
            start,
            end,
            kind: MoveKind::CastleKingSide,
            player: None,
        }
    }

    pub fn castle_queenside(start: Square, end: Square) -> Move {
        Move {
            start,
            end,
            kind: MoveKind::CastleQueenSide,
            player: None,
        }
    }

    pub fn en_passant(start: Square, end: Square) -> Move {
        Move {
            start,
            end,
            kind: MoveKind::EnPassant,
            player: None,
        }
    }

    pub fn pawn_promote(start: Square, end: Square, promoted: PieceKind) -> Move {
        assert!(
            promoted != PieceKind::Pawn && promoted != PieceKind::King,
            "invalid promotion piece"
        );
        Move {
            start,
            end,
            kind: MoveKind::PawnPromote(promoted),
            player: None,
        }
    }

    pub fn start(&self) -> Square {
        self.start
    }

    pub fn end(&self) -> Square {
        self.end
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The player that played this move, present once the move has been
    /// applied to a board.
    pub fn player(&self) -> Option<Player> {
        self.player
    }

    /// The promotion target, if this is a promotion.
    pub fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::PawnPromote(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_castle(&self) -> bool {
        match self.kind {
            MoveKind::CastleKingSide | MoveKind::CastleQueenSide => true,
            _ => false,
        }
    }

    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion().is_some()
    }

    pub(crate) fn stamped(self, player: Player) -> Move {
        Move {
            player: Some(player),
            ..self
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        if self.start != other.start || self.end != other.end {
            return false;
        }

        // Promotions to different pieces are different moves. Every other
        // kind is implied by the start and end squares, so it does not
        // participate in equality. Neither does the player stamp.
        match (self.kind, other.kind) {
            (MoveKind::PawnPromote(a), MoveKind::PawnPromote(b)) => a == b,
            _ => true,
        }
    }
}

impl Eq for Move {}

impl Hash for Move {
    // Promotion targets can't be hashed without breaking the Eq contract for
    // moves where only one side is a promotion, so the hash covers the
    // squares alone.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion() {
            write!(f, "={}", kind)?;
        }
        Ok(())
    }
}
