// Copyright 2020 The gambit developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Primitive value types shared by the whole engine: board coordinates,
//! movement vectors, players, and pieces.

use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// A row/column coordinate on the 8x8 board. Row 0 is the top of the board as
/// conventionally drawn (rank 8, player two's back rank), so player one's
/// pieces advance by decreasing row.
///
/// `Square` is a plain value: translation does not check bounds, so callers
/// walk off the board freely and test `in_bounds` before dereferencing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Square {
        Square { row, col }
    }

    /// Translates this square by the given movement vector, returning a new
    /// square that may lie off the board.
    pub fn translate(self, dir: Direction) -> Square {
        Square::new(self.row + dir.row_delta, self.col + dir.col_delta)
    }

    pub fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    /// Row-major index into a 64-entry grid. Only valid for in-bounds squares.
    pub fn index(self) -> usize {
        debug_assert!(self.in_bounds(), "indexing with off-board square");
        (self.row * 8 + self.col) as usize
    }

    pub fn from_index(idx: usize) -> Square {
        debug_assert!(idx < 64);
        Square::new((idx / 8) as i8, (idx % 8) as i8)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        debug_assert!(self.in_bounds());
        write!(f, "{}{}", (b'a' + self.col as u8) as char, 8 - self.row)
    }
}

impl TryFrom<&str> for Square {
    type Error = ();

    /// Parses algebraic coordinates like `"e4"`. This is the only textual
    /// primitive the engine carries; full move notation lives in the front
    /// end.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let file = chars.next().ok_or(())?;
        let rank = chars.next().ok_or(())?;
        if chars.next().is_some() {
            return Err(());
        }

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(());
        }

        let col = file as i8 - 'a' as i8;
        let row = 8 - (rank as i8 - '0' as i8);
        Ok(Square::new(row, col))
    }
}

/// Returns every square of the board in row-major order.
pub fn squares() -> impl Iterator<Item = Square> {
    (0..64).map(Square::from_index)
}

/// A movement vector on the grid. Negative row deltas point toward the top of
/// the board (player two's back rank).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub row_delta: i8,
    pub col_delta: i8,
}

impl Direction {
    pub const fn new(row_delta: i8, col_delta: i8) -> Direction {
        Direction {
            row_delta,
            col_delta,
        }
    }

    pub fn reverse(self) -> Direction {
        Direction::new(-self.row_delta, -self.col_delta)
    }
}

pub const NORTH: Direction = Direction::new(-1, 0);
pub const NORTH_EAST: Direction = Direction::new(-1, 1);
pub const EAST: Direction = Direction::new(0, 1);
pub const SOUTH_EAST: Direction = Direction::new(1, 1);
pub const SOUTH: Direction = Direction::new(1, 0);
pub const SOUTH_WEST: Direction = Direction::new(1, -1);
pub const WEST: Direction = Direction::new(0, -1);
pub const NORTH_WEST: Direction = Direction::new(-1, -1);

/// The eight unit movement vectors, used by queens, kings, and the attack
/// scanner.
pub static CARDINAL_DIRECTIONS: [Direction; 8] = [
    NORTH, NORTH_EAST, EAST, SOUTH_EAST, SOUTH, SOUTH_WEST, WEST, NORTH_WEST,
];

pub static ROOK_DIRECTIONS: [Direction; 4] = [NORTH, EAST, SOUTH, WEST];

pub static BISHOP_DIRECTIONS: [Direction; 4] = [NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST];

pub static KNIGHT_JUMPS: [Direction; 8] = [
    Direction::new(-2, -1),
    Direction::new(-2, 1),
    Direction::new(-1, -2),
    Direction::new(-1, 2),
    Direction::new(1, -2),
    Direction::new(1, 2),
    Direction::new(2, -1),
    Direction::new(2, 1),
];

/// One of the two players, counted from one at the external interface.
/// Player one owns the uppercase pieces and moves first, like White.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn toggle(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The 1-based player number used by the board-game contract.
    pub fn number(self) -> u8 {
        self.to_u8().unwrap() + 1
    }

    /// The direction this player's pawns advance.
    pub fn pawn_direction(self) -> Direction {
        match self {
            Player::One => NORTH,
            Player::Two => SOUTH,
        }
    }

    /// The row this player's pawns start on.
    pub fn pawn_start_row(self) -> i8 {
        match self {
            Player::One => 6,
            Player::Two => 1,
        }
    }

    /// The farthest row for this player's pawns, where promotion occurs.
    pub fn promotion_row(self) -> i8 {
        match self {
            Player::One => 0,
            Player::Two => 7,
        }
    }

    /// The row holding this player's king and rooks at the start of the game.
    pub fn home_row(self) -> i8 {
        match self {
            Player::One => 7,
            Player::Two => 0,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

pub static PLAYERS: [Player; 2] = [Player::One, Player::Two];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

// Standard material values; the king is priceless and therefore worthless.
static PIECE_VALUES: [i32; 6] = [1, 3, 3, 5, 9, 0];

impl PieceKind {
    /// The material value of this piece kind, as counted by the advantage
    /// accumulator.
    pub fn value(self) -> i32 {
        PIECE_VALUES[self.as_index()]
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The kinds a pawn may promote to.
pub static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

bitflags! {
    /// Castling rights still available to each player. Rights are only ever
    /// cleared by play; undoing a move restores the recorded prior value.
    pub struct CastleStatus: u8 {
        const NONE = 0;
        const ONE_KINGSIDE = 0b0000_0001;
        const ONE_QUEENSIDE = 0b0000_0010;
        const ONE = Self::ONE_KINGSIDE.bits | Self::ONE_QUEENSIDE.bits;
        const TWO_KINGSIDE = 0b0000_0100;
        const TWO_QUEENSIDE = 0b0000_1000;
        const TWO = Self::TWO_KINGSIDE.bits | Self::TWO_QUEENSIDE.bits;
        const ALL = Self::ONE.bits | Self::TWO.bits;
    }
}

impl CastleStatus {
    /// The kingside right belonging to the given player.
    pub fn kingside(player: Player) -> CastleStatus {
        match player {
            Player::One => CastleStatus::ONE_KINGSIDE,
            Player::Two => CastleStatus::TWO_KINGSIDE,
        }
    }

    /// The queenside right belonging to the given player.
    pub fn queenside(player: Player) -> CastleStatus {
        match player {
            Player::One => CastleStatus::ONE_QUEENSIDE,
            Player::Two => CastleStatus::TWO_QUEENSIDE,
        }
    }

    /// Both of the given player's rights.
    pub fn both(player: Player) -> CastleStatus {
        CastleStatus::kingside(player) | CastleStatus::queenside(player)
    }
}

/// A piece on the board: a kind owned by a player. Empty squares are
/// represented as `Option::<Piece>::None` rather than a dedicated kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
}

impl Piece {
    pub fn new(kind: PieceKind, player: Player) -> Piece {
        Piece { kind, player }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.player {
            Player::One => self.kind.to_string().to_ascii_uppercase(),
            Player::Two => self.kind.to_string(),
        };
        f.write_str(&chr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryInto;

    #[test]
    fn square_parse_and_display_roundtrip() {
        let e4: Square = "e4".try_into().unwrap();
        assert_eq!(Square::new(4, 4), e4);
        assert_eq!("e4", e4.to_string());

        let a8: Square = "a8".try_into().unwrap();
        assert_eq!(Square::new(0, 0), a8);

        let h1: Square = "h1".try_into().unwrap();
        assert_eq!(Square::new(7, 7), h1);
    }

    #[test]
    fn square_parse_rejects_garbage() {
        assert!(Square::try_from("i4").is_err());
        assert!(Square::try_from("a9").is_err());
        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("a44").is_err());
    }

    #[test]
    fn translate_and_bounds() {
        let a8 = Square::new(0, 0);
        assert!(!a8.translate(NORTH).in_bounds());
        assert!(!a8.translate(WEST).in_bounds());
        assert_eq!(Square::new(1, 0), a8.translate(SOUTH));
        assert_eq!(Square::new(1, 1), a8.translate(SOUTH_EAST));
    }

    #[test]
    fn direction_reverse() {
        assert_eq!(SOUTH, NORTH.reverse());
        assert_eq!(NORTH_EAST, SOUTH_WEST.reverse());
    }

    #[test]
    fn index_roundtrip() {
        for sq in squares() {
            assert_eq!(sq, Square::from_index(sq.index()));
        }
    }

    #[test]
    fn player_numbers_and_toggle() {
        assert_eq!(1, Player::One.number());
        assert_eq!(2, Player::Two.number());
        assert_eq!(Player::Two, Player::One.toggle());
        assert_eq!(Player::One, Player::Two.toggle());
    }

    #[test]
    fn piece_values() {
        assert_eq!(1, PieceKind::Pawn.value());
        assert_eq!(3, PieceKind::Knight.value());
        assert_eq!(3, PieceKind::Bishop.value());
        assert_eq!(5, PieceKind::Rook.value());
        assert_eq!(9, PieceKind::Queen.value());
        assert_eq!(0, PieceKind::King.value());
    }

    #[test]
    fn piece_display_case() {
        assert_eq!("Q", Piece::new(PieceKind::Queen, Player::One).to_string());
        assert_eq!("q", Piece::new(PieceKind::Queen, Player::Two).to_string());
    }
}
