// Copyright 2020 The gambit developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The game-agnostic board contract.
//!
//! Front ends and tooling drive any two-player, perfect-information board
//! game through this trait without knowing which game it is. Chess is the
//! only implementation in this crate, but nothing here is chess-specific.

use std::error::Error;
use std::fmt::Debug;

/// Which player is ahead on material, and by how much. An even position is
/// reported as player zero with a zero margin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameAdvantage {
    player: u8,
    advantage: u32,
}

impl GameAdvantage {
    pub fn new(player: u8, advantage: u32) -> GameAdvantage {
        GameAdvantage { player, advantage }
    }

    pub fn even() -> GameAdvantage {
        GameAdvantage::new(0, 0)
    }

    /// The 1-based number of the leading player, or zero when even.
    pub fn player(self) -> u8 {
        self.player
    }

    /// The size of the lead, in the game's own units.
    pub fn advantage(self) -> u32 {
        self.advantage
    }
}

/// A two-player board game held at some position, able to enumerate the
/// moves from it, play one, and take one back.
pub trait GameBoard {
    /// The game's move representation.
    type Move: Copy + Eq + Debug;

    /// The game's failure type for history manipulation.
    type Error: Error;

    /// The moves the current player may legally make. Empty when the game is
    /// over.
    fn possible_moves(&self) -> Vec<Self::Move>;

    /// Plays a move for the current player. The move must come from
    /// `possible_moves` for the current position.
    fn apply_move(&mut self, mov: Self::Move);

    /// Takes back the most recent move, restoring the prior position.
    fn undo_last_move(&mut self) -> Result<(), Self::Error>;

    /// Every move played so far, oldest first.
    fn move_history(&self) -> &[Self::Move];

    /// The 1-based number of the player whose turn it is.
    fn current_player(&self) -> u8;

    /// Whether the game has ended, by any of the game's ending conditions.
    fn is_finished(&self) -> bool;

    /// Which player currently leads, and by how much.
    fn current_advantage(&self) -> GameAdvantage;
}
