//! Game-level Othello logic: turn order, passing, and termination.

use crate::board::{Board, IllegalMoveError};
use crate::location::{Location, LocationList};
use derive_more::{Display, Error};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (Black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

#[derive(Debug, PartialEq, Display, Error)]
#[display(fmt = "invalid player string")]
pub struct ParsePlayerError;

/// Parse "black" or "white", case-insensitive.
impl std::str::FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Player::Black),
            "white" => Ok(Player::White),
            _ => Err(ParsePlayerError),
        }
    }
}

/// An action in an Othello game: place a piece or pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Pass,
    Piece(Location),
}

impl Move {
    /// The placed location, or `None` for a pass.
    pub fn location(self) -> Option<Location> {
        match self {
            Move::Pass => None,
            Move::Piece(loc) => Some(loc),
        }
    }
}

impl From<Location> for Move {
    fn from(loc: Location) -> Self {
        Move::Piece(loc)
    }
}

impl From<Option<Location>> for Move {
    /// `None` is the pass move, matching drivers that report "no move".
    fn from(loc: Option<Location>) -> Self {
        match loc {
            None => Move::Pass,
            Some(loc) => Move::Piece(loc),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => f.write_str("pass"),
            Move::Piece(loc) => write!(f, "{}", loc),
        }
    }
}

#[derive(Debug, PartialEq, Display, Error)]
#[display(fmt = "invalid move string")]
pub struct ParseMoveError;

/// Parse "pass" (case-insensitive) or board notation ("A4").
impl std::str::FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }
        let loc: Location = s.parse().or(Err(ParseMoveError))?;
        Ok(Move::Piece(loc))
    }
}

/// Error returned for an action the rules do not allow in this state.
#[derive(Debug, PartialEq, Display, Error)]
pub enum InvalidMoveError {
    #[display(fmt = "cannot pass while placements are available")]
    CannotPass,
    #[display(fmt = "{}", _0)]
    IllegalPlacement(IllegalMoveError),
}

impl From<IllegalMoveError> for InvalidMoveError {
    fn from(err: IllegalMoveError) -> Self {
        InvalidMoveError::IllegalPlacement(err)
    }
}

/// The complete state of an Othello game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Game {
    pub board: Board,
    pub active_player: Player,
    pub just_passed: bool,
}

impl Default for Game {
    /// The starting position, Black to move.
    fn default() -> Self {
        Self::new(Board::default(), Player::default())
    }
}

impl Game {
    pub fn new(board: Board, active_player: Player) -> Self {
        Self {
            board,
            active_player,
            just_passed: false,
        }
    }

    /// Legal placements for the active player.
    #[inline]
    pub fn get_moves(&self) -> LocationList {
        self.board.legal_moves(self.active_player)
    }

    /// Apply an action for the active player, returning the next state.
    /// A pass is legal only when no placement is.
    pub fn apply_move(&self, mv: Move) -> Result<Game, InvalidMoveError> {
        match mv {
            Move::Pass => {
                if !self.get_moves().is_empty() {
                    return Err(InvalidMoveError::CannotPass);
                }
                Ok(Game {
                    board: self.board,
                    active_player: !self.active_player,
                    just_passed: true,
                })
            }
            Move::Piece(loc) => {
                let mut board = self.board;
                board.apply(loc, self.active_player)?;
                Ok(Game {
                    board,
                    active_player: !self.active_player,
                    just_passed: false,
                })
            }
        }
    }

    /// The game ends when neither player has a legal placement (the
    /// double-pass rule).
    pub fn is_finished(&self) -> bool {
        self.board.legal_moves(Player::Black).is_empty()
            && self.board.legal_moves(Player::White).is_empty()
    }

    /// The player holding more pieces, or `None` for a draw.
    /// Meaningful once [`Game::is_finished`] is true.
    pub fn winner(&self) -> Option<Player> {
        match self.board.score_difference(Player::Black) {
            d if d > 0 => Some(Player::Black),
            d if d < 0 => Some(Player::White),
            _ => None,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", self.active_player)?;
        if self.just_passed {
            writeln!(f, "(last move was a pass)")?;
        }
        Ok(())
    }
}
