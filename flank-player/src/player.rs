//! The game-facing driver: owns the live board and answers move requests.

use crate::evaluator::Heuristic;
use crate::search::{self, SearchLimits};
use flank_othello::{Board, IllegalMoveError, Location, Player};
use std::time::{Duration, Instant};

/// Safety margin held back from every move's clock share, in milliseconds.
const CLOCK_MARGIN_MS: u64 = 15;

/// Search depth used when the caller does not configure one.
pub const DEFAULT_DEPTH: u8 = 6;

/// A stateful player for one side of one game.
///
/// The engine tracks the live board itself: the opponent's confirmed moves
/// arrive through [`Engine::do_move`], which also applies the engine's own
/// choice before returning it. Boards used during search are throwaway
/// copies; the live board only ever sees confirmed moves.
pub struct Engine {
    side: Player,
    board: Board,
    heuristic: Heuristic,
    max_depth: u8,
}

impl Engine {
    /// A fresh engine on the starting position.
    pub fn new(side: Player, heuristic: Heuristic, max_depth: u8) -> Self {
        Self::with_board(side, Board::default(), heuristic, max_depth)
    }

    /// An engine resuming from an arbitrary position.
    pub fn with_board(side: Player, board: Board, heuristic: Heuristic, max_depth: u8) -> Self {
        Self {
            side,
            board,
            heuristic,
            max_depth,
        }
    }

    pub fn side(&self) -> Player {
        self.side
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True once neither side has a legal placement.
    pub fn is_finished(&self) -> bool {
        self.board.legal_moves(Player::Black).is_empty()
            && self.board.legal_moves(Player::White).is_empty()
    }

    /// Apply the opponent's confirmed move if there is one, then choose,
    /// apply, and return our own, or `None` when we must pass.
    ///
    /// `ms_left` is the clock for the rest of the game in milliseconds;
    /// negative means no limit. An opponent move that is not legal on the
    /// live board is reported as an error and changes nothing.
    pub fn do_move(
        &mut self,
        opponent_move: Option<Location>,
        ms_left: i64,
    ) -> Result<Option<Location>, IllegalMoveError> {
        if let Some(location) = opponent_move {
            self.board.apply(location, !self.side)?;
        }

        let limits = SearchLimits {
            max_depth: self.max_depth,
            deadline: self.move_deadline(ms_left),
        };

        let started = Instant::now();
        match search::select_move(self.side, &self.board, limits, self.heuristic) {
            Some(chosen) => {
                self.board.apply(chosen.location, self.side)?;
                log::debug!(
                    "{} plays {} (score {}) in {:?}",
                    self.side,
                    chosen.location,
                    chosen.score,
                    started.elapsed()
                );
                Ok(Some(chosen.location))
            }
            None => {
                log::debug!("{} has no legal move and passes", self.side);
                Ok(None)
            }
        }
    }

    /// Slice the remaining clock into a deadline for this move: an even
    /// share over the moves we still expect to make, minus a safety margin.
    fn move_deadline(&self, ms_left: i64) -> Option<Instant> {
        if ms_left < 0 {
            return None;
        }

        let moves_to_go = u64::from(self.board.empty_count() / 2).max(1);
        let share = (ms_left as u64 / moves_to_go)
            .saturating_sub(CLOCK_MARGIN_MS)
            .max(1);
        Some(Instant::now() + Duration::from_millis(share))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_move_as_black() {
        let mut engine = Engine::new(Player::Black, Heuristic::Positional, 4);
        let chosen = engine.do_move(None, -1).unwrap().unwrap();

        assert!(Board::default().is_legal(chosen, Player::Black));
        assert_eq!(engine.board().count(Player::Black), 4);
        assert_eq!(engine.board().count(Player::White), 1);
    }

    #[test]
    fn reply_as_white_tracks_both_moves() {
        let mut engine = Engine::new(Player::White, Heuristic::Positional, 3);
        let black_opening = Location::from_coords(3, 2);

        let reply = engine.do_move(Some(black_opening), -1).unwrap().unwrap();

        // Board holds black's opening, its capture, and our reply.
        let mut expected = Board::default();
        expected.apply(black_opening, Player::Black).unwrap();
        assert!(expected.is_legal(reply, Player::White));
        expected.apply(reply, Player::White).unwrap();
        assert_eq!(*engine.board(), expected);
    }

    #[test]
    fn illegal_opponent_move_is_rejected() {
        let mut engine = Engine::new(Player::White, Heuristic::Positional, 3);
        let err = engine
            .do_move(Some(Location::from_coords(0, 0)), -1)
            .unwrap_err();

        assert_eq!(err.player, Player::Black);
        assert_eq!(*engine.board(), Board::default());
    }

    #[test]
    fn passing_when_no_move_exists() {
        let board: Board = "
            --------
            --------
            --------
            ---O----
            --------
            --------
            --------
            --------"
            .parse()
            .unwrap();
        let mut engine = Engine::with_board(Player::Black, board, Heuristic::Positional, 4);

        assert_eq!(engine.do_move(None, -1).unwrap(), None);
        assert_eq!(*engine.board(), board);
    }

    #[test]
    fn tight_clock_still_produces_a_legal_move() {
        let mut engine = Engine::new(Player::Black, Heuristic::Positional, 10);
        let chosen = engine.do_move(None, 1).unwrap().unwrap();
        assert!(Board::default().is_legal(chosen, Player::Black));
    }
}
