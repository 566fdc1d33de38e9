// Copyright 2020 The gambit developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate num_derive;

mod attacks;
mod board;
mod game;
mod movegen;
mod moves;
mod types;

pub use crate::board::{Board, BoardError};
pub use crate::game::{GameAdvantage, GameBoard};
pub use crate::movegen::MoveVec;
pub use crate::moves::{Move, MoveKind};
pub use crate::types::{
    squares, CastleStatus, Direction, Piece, PieceKind, Player, Square, PIECE_KINDS, PLAYERS,
    PROMOTION_KINDS,
};
