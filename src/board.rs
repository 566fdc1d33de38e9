// Copyright 2020 The gambit developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The board state machine.
//!
//! `Board` owns the piece grid and every piece of per-game bookkeeping: whose
//! turn it is, castling rights, the en-passant opportunity, the fifty-move
//! draw counter, the running material advantage, and the history needed to
//! undo moves. All piece placement funnels through `set_piece`, which keeps
//! the advantage accumulator consistent no matter how convoluted the move.

use std::cmp;
use std::error;
use std::fmt::{self, Display};
use std::mem;

use hashbrown::HashSet;

use crate::attacks::{self, Grid};
use crate::game::{GameAdvantage, GameBoard};
use crate::movegen::{self, MoveVec};
use crate::moves::{Move, MoveKind};
use crate::types::{self, CastleStatus, Piece, PieceKind, Player, Square};

lazy_static! {
    static ref OPENING_PLACEMENTS: Vec<(Square, Piece)> = {
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut placements = Vec::with_capacity(32);
        for col in 0..8 {
            let kind = back[col as usize];
            placements.push((Square::new(0, col), Piece::new(kind, Player::Two)));
            placements.push((
                Square::new(1, col),
                Piece::new(PieceKind::Pawn, Player::Two),
            ));
            placements.push((
                Square::new(6, col),
                Piece::new(PieceKind::Pawn, Player::One),
            ));
            placements.push((Square::new(7, col), Piece::new(kind, Player::One)));
        }
        placements
    };
}

/// Errors arising from board construction or history manipulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// A placement list gave the player no king.
    MissingKing(Player),
    /// A placement list gave the player more than one king.
    DuplicateKing(Player),
    /// A placement targeted a square off the board.
    OutOfBounds(Square),
    /// Two placements targeted the same square.
    Occupied(Square),
    /// There is no move to undo.
    EmptyHistory,
}

impl Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::MissingKing(player) => write!(f, "player {} has no king", player),
            BoardError::DuplicateKing(player) => {
                write!(f, "player {} has more than one king", player)
            }
            // The square may be off the board, so algebraic display does not
            // apply here.
            BoardError::OutOfBounds(square) => write!(f, "square {:?} is off the board", square),
            BoardError::Occupied(square) => write!(f, "square {} is already occupied", square),
            BoardError::EmptyHistory => write!(f, "no moves to undo"),
        }
    }
}

impl error::Error for BoardError {}

// Everything needed to reverse one applied move.
#[derive(Copy, Clone, Debug)]
struct Record {
    mov: Move,
    captured: Option<(Square, Piece)>,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
    draw_counter: u32,
}

/// A chess game in progress.
#[derive(Clone, Debug)]
pub struct Board {
    squares: Grid,
    side_to_move: Player,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
    draw_counter: u32,
    advantage: i32,
    history: Vec<Record>,
    moves_played: Vec<Move>,
}

impl Board {
    /// Creates a board in the standard opening arrangement, player one to
    /// move.
    pub fn new() -> Board {
        Board::from_placements(OPENING_PLACEMENTS.iter().cloned())
            .expect("the standard opening arrangement is valid")
    }

    /// Creates a board from an arbitrary arrangement of pieces, player one to
    /// move. Each player must have exactly one king. Castling rights are
    /// granted only where the king and rook both sit on their home squares;
    /// anywhere else they have necessarily moved.
    pub fn from_placements<I>(placements: I) -> Result<Board, BoardError>
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut board = Board {
            squares: [None; 64],
            side_to_move: Player::One,
            castle_status: CastleStatus::NONE,
            en_passant_square: None,
            draw_counter: 0,
            advantage: 0,
            history: Vec::new(),
            moves_played: Vec::new(),
        };

        for (square, piece) in placements {
            if !square.in_bounds() {
                return Err(BoardError::OutOfBounds(square));
            }
            if board.squares[square.index()].is_some() {
                return Err(BoardError::Occupied(square));
            }
            board.set_piece(square, Some(piece));
        }

        for &player in &types::PLAYERS {
            match board.positions_of(PieceKind::King, player).len() {
                0 => return Err(BoardError::MissingKing(player)),
                1 => {}
                _ => return Err(BoardError::DuplicateKing(player)),
            }

            if board.piece_at(king_home(player)) == Some(Piece::new(PieceKind::King, player)) {
                let rook = Piece::new(PieceKind::Rook, player);
                if board.piece_at(kingside_rook_home(player)) == Some(rook) {
                    board.castle_status.insert(CastleStatus::kingside(player));
                }
                if board.piece_at(queenside_rook_home(player)) == Some(rook) {
                    board.castle_status.insert(CastleStatus::queenside(player));
                }
            }
        }

        Ok(board)
    }

    /// The piece on the given square, or `None` if the square is empty or off
    /// the board.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        attacks::piece_on(&self.squares, square)
    }

    /// The owner of the piece on the given square, if any.
    pub fn player_at(&self, square: Square) -> Option<Player> {
        self.piece_at(square).map(|piece| piece.player)
    }

    /// Every square holding a piece of the given kind and owner.
    pub fn positions_of(&self, kind: PieceKind, player: Player) -> Vec<Square> {
        types::squares()
            .filter(|&square| self.piece_at(square) == Some(Piece::new(kind, player)))
            .collect()
    }

    pub fn is_empty_square(&self, square: Square) -> bool {
        square.in_bounds() && self.squares[square.index()].is_none()
    }

    /// Whether the square holds a piece belonging to `player`'s opponent.
    pub fn is_enemy(&self, square: Square, player: Player) -> bool {
        self.player_at(square).map_or(false, |owner| owner != player)
    }

    /// Whether the square is attacked by any of `by`'s pieces.
    pub fn is_attacked(&self, square: Square, by: Player) -> bool {
        attacks::square_attacked(&self.squares, square, by)
    }

    /// Every square attacked by the given player.
    pub fn attacked_squares(&self, by: Player) -> HashSet<Square> {
        types::squares()
            .filter(|&square| self.is_attacked(square, by))
            .collect()
    }

    /// The square of the given player's king.
    pub fn king_square(&self, player: Player) -> Square {
        types::squares()
            .find(|&square| self.piece_at(square) == Some(Piece::new(PieceKind::King, player)))
            .expect("board invariant violated: every player has exactly one king")
    }

    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, player: Player) -> bool {
        self.castle_status.contains(CastleStatus::kingside(player))
    }

    pub fn can_castle_queenside(&self, player: Player) -> bool {
        self.castle_status.contains(CastleStatus::queenside(player))
    }

    /// The square a pawn could capture onto en passant, set for exactly one
    /// ply after a two-square pawn advance.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// Half-moves since the last capture or pawn advance, capped at 100. The
    /// game is drawn when the cap is reached.
    pub fn draw_counter(&self) -> u32 {
        self.draw_counter
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.squares
    }

    /// The legal moves available to the current player.
    pub fn possible_moves(&self) -> MoveVec {
        movegen::legal_moves(self)
    }

    /// Applies a move for the current player. The move must be legal for this
    /// position; feed this only moves produced by `possible_moves`.
    pub fn apply_move(&mut self, mov: Move) {
        let player = self.side_to_move;
        let mov = mov.stamped(player);
        let record = Record {
            mov,
            captured: None,
            castle_status: self.castle_status,
            en_passant_square: self.en_passant_square,
            draw_counter: self.draw_counter,
        };

        let piece = self
            .set_piece(mov.start(), None)
            .expect("applying a move from an empty square");
        debug_assert!(piece.player == player, "applying a move out of turn");
        debug!("player {} plays {}", player, mov);

        // An en-passant capture takes a pawn beside the mover rather than on
        // the destination square.
        let capture_square = if mov.is_en_passant() {
            Square::new(mov.start().row, mov.end().col)
        } else {
            mov.end()
        };
        let captured = self
            .set_piece(capture_square, None)
            .map(|taken| (capture_square, taken));

        // A rook captured on its home square takes its castling right with
        // it, even if a different rook later returns to that square.
        if let Some((square, taken)) = captured {
            if taken.kind == PieceKind::Rook {
                if square == kingside_rook_home(taken.player) {
                    self.castle_status
                        .remove(CastleStatus::kingside(taken.player));
                } else if square == queenside_rook_home(taken.player) {
                    self.castle_status
                        .remove(CastleStatus::queenside(taken.player));
                }
            }
        }

        let placed = match mov.promotion() {
            Some(kind) => Piece::new(kind, player),
            None => piece,
        };
        self.set_piece(mov.end(), Some(placed));

        match mov.kind() {
            MoveKind::CastleKingSide => {
                let rook = self
                    .set_piece(kingside_rook_home(player), None)
                    .expect("castling kingside without a rook");
                self.set_piece(mov.end().translate(types::WEST), Some(rook));
            }
            MoveKind::CastleQueenSide => {
                let rook = self
                    .set_piece(queenside_rook_home(player), None)
                    .expect("castling queenside without a rook");
                self.set_piece(mov.end().translate(types::EAST), Some(rook));
            }
            _ => {}
        }

        match piece.kind {
            PieceKind::King => self.castle_status.remove(CastleStatus::both(player)),
            PieceKind::Rook if mov.start() == kingside_rook_home(player) => {
                self.castle_status.remove(CastleStatus::kingside(player));
            }
            PieceKind::Rook if mov.start() == queenside_rook_home(player) => {
                self.castle_status.remove(CastleStatus::queenside(player));
            }
            _ => {}
        }

        self.en_passant_square = if piece.kind == PieceKind::Pawn
            && (mov.end().row - mov.start().row).abs() == 2
        {
            Some(Square::new(
                (mov.start().row + mov.end().row) / 2,
                mov.start().col,
            ))
        } else {
            None
        };

        self.draw_counter = if captured.is_some() || piece.kind == PieceKind::Pawn {
            0
        } else {
            cmp::min(self.draw_counter + 1, 100)
        };

        self.side_to_move = player.toggle();
        self.history.push(Record { captured, ..record });
        self.moves_played.push(mov);
    }

    /// Reverses the most recently applied move, restoring every piece of
    /// board state to its prior value.
    pub fn undo_last_move(&mut self) -> Result<(), BoardError> {
        let record = self.history.pop().ok_or(BoardError::EmptyHistory)?;
        self.moves_played.pop();

        let mov = record.mov;
        let player = mov.player().expect("recorded moves always carry a player");
        debug!("player {} takes back {}", player, mov);

        // The rook goes home first so the king's square arithmetic below sees
        // the board mid-castle, exactly as apply left it.
        match mov.kind() {
            MoveKind::CastleKingSide => {
                let rook = self
                    .set_piece(mov.end().translate(types::WEST), None)
                    .expect("undoing a kingside castle without its rook");
                self.set_piece(kingside_rook_home(player), Some(rook));
            }
            MoveKind::CastleQueenSide => {
                let rook = self
                    .set_piece(mov.end().translate(types::EAST), None)
                    .expect("undoing a queenside castle without its rook");
                self.set_piece(queenside_rook_home(player), Some(rook));
            }
            _ => {}
        }

        let piece = self
            .set_piece(mov.end(), None)
            .expect("undoing a move to an empty square");
        let restored = if mov.is_promotion() {
            Piece::new(PieceKind::Pawn, player)
        } else {
            piece
        };
        self.set_piece(mov.start(), Some(restored));

        if let Some((square, captured)) = record.captured {
            self.set_piece(square, Some(captured));
        }

        self.castle_status = record.castle_status;
        self.en_passant_square = record.en_passant_square;
        self.draw_counter = record.draw_counter;
        self.side_to_move = player;
        Ok(())
    }

    /// Every move applied to this board so far, oldest first.
    pub fn move_history(&self) -> &[Move] {
        &self.moves_played
    }

    /// Whether the current player's king is attacked. This remains true when
    /// the position is also checkmate.
    pub fn is_check(&self) -> bool {
        let player = self.side_to_move;
        self.is_attacked(self.king_square(player), player.toggle())
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.possible_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.possible_moves().is_empty()
    }

    /// Whether the game is drawn by the fifty-move rule.
    pub fn is_draw(&self) -> bool {
        self.draw_counter >= 100
    }

    pub fn is_finished(&self) -> bool {
        self.is_draw() || self.possible_moves().is_empty()
    }

    /// The material advantage, as a leading player and a nonnegative margin.
    pub fn current_advantage(&self) -> GameAdvantage {
        if self.advantage > 0 {
            GameAdvantage::new(1, self.advantage as u32)
        } else if self.advantage < 0 {
            GameAdvantage::new(2, (-self.advantage) as u32)
        } else {
            GameAdvantage::even()
        }
    }

    // The single mutation primitive. Every piece that enters or leaves the
    // grid passes through here, so the advantage accumulator can never drift
    // from the grid contents.
    fn set_piece(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let old = mem::replace(&mut self.squares[square.index()], piece);
        if let Some(removed) = old {
            self.advantage -= signed_value(removed);
        }
        if let Some(added) = piece {
            self.advantage += signed_value(added);
        }
        old
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                match self.squares[Square::new(row, col).index()] {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

impl GameBoard for Board {
    type Move = Move;
    type Error = BoardError;

    fn possible_moves(&self) -> Vec<Move> {
        self.possible_moves().into_iter().collect()
    }

    fn apply_move(&mut self, mov: Move) {
        self.apply_move(mov);
    }

    fn undo_last_move(&mut self) -> Result<(), BoardError> {
        self.undo_last_move()
    }

    fn move_history(&self) -> &[Move] {
        self.move_history()
    }

    fn current_player(&self) -> u8 {
        self.side_to_move.number()
    }

    fn is_finished(&self) -> bool {
        self.is_finished()
    }

    fn current_advantage(&self) -> GameAdvantage {
        self.current_advantage()
    }
}

fn king_home(player: Player) -> Square {
    Square::new(player.home_row(), 4)
}

fn kingside_rook_home(player: Player) -> Square {
    Square::new(player.home_row(), 7)
}

fn queenside_rook_home(player: Player) -> Square {
    Square::new(player.home_row(), 0)
}

fn signed_value(piece: Piece) -> i32 {
    match piece.player {
        Player::One => piece.kind.value(),
        Player::Two => -piece.kind.value(),
    }
}
