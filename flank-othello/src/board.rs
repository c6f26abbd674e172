//! The 8x8 position, addressed by piece color.
//!
//! [`Board`] answers the questions a search core asks: which placements are
//! legal for a side, what does a placement capture, and how many pieces does
//! each side hold. It knows nothing about whose turn it is; see [`Game`](crate::Game)
//! for turn and pass bookkeeping.

use crate::bitboard::{self, Bitboard, BLACK_START, WHITE_START};
use crate::game::Player;
use crate::location::{Location, LocationList};
use crate::utils;
use derive_more::{Display, Error};
use std::fmt;

/// Error returned when a placement is applied that is not legal for that
/// side under the capture rules.
#[derive(Clone, Copy, Debug, PartialEq, Display, Error)]
#[display(fmt = "illegal move {} for {}", location, player)]
pub struct IllegalMoveError {
    pub player: Player,
    pub location: Location,
}

/// An Othello position: one bitboard of pieces per color.
///
/// `Copy` is the deep-copy operation: a copied board shares nothing with the
/// original, so simulating on a copy can never disturb the position a caller
/// or a sibling search branch is holding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Default for Board {
    /// The standard four-piece starting position.
    fn default() -> Self {
        Self {
            black: BLACK_START,
            white: WHITE_START,
        }
    }
}

impl Board {
    #[inline]
    fn pieces(&self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    #[inline]
    fn pieces_mut(&mut self, player: Player) -> &mut Bitboard {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    /// True iff square `(x, y)` is occupied by `player`.
    pub fn get(&self, player: Player, x: usize, y: usize) -> bool {
        self.pieces(player).contains(Location::from_coords(x, y).to_index())
    }

    /// Every legal placement for `player`, in scan order. Empty when
    /// `player` must pass; that is a normal position, not an error.
    ///
    /// Callable for either side of the same board, which is how the
    /// mobility heuristic counts both players' options.
    #[inline]
    pub fn legal_moves(&self, player: Player) -> LocationList {
        LocationList::from(bitboard::move_mask(self.pieces(player), self.pieces(!player)))
    }

    /// True iff placing `player`'s piece at `loc` is legal: the square is
    /// empty and the placement captures at least one opposing piece.
    pub fn is_legal(&self, loc: Location, player: Player) -> bool {
        let own = self.pieces(player);
        let opp = self.pieces(!player);
        let mv = Bitboard::from(loc);

        ((own | opp) & mv).is_empty() && !bitboard::flip_mask(own, opp, mv).is_empty()
    }

    /// Place a piece for `player` at `loc` and flip the captured pieces.
    /// Fails without touching the board when the placement is illegal.
    pub fn apply(&mut self, loc: Location, player: Player) -> Result<(), IllegalMoveError> {
        if !self.is_legal(loc, player) {
            return Err(IllegalMoveError {
                player,
                location: loc,
            });
        }
        self.apply_unchecked(loc, player);
        Ok(())
    }

    /// Place a piece without checking legality. The position becomes
    /// inconsistent if the placement is illegal; search interiors may use
    /// this because they only apply locations they just enumerated.
    #[inline]
    pub fn apply_unchecked(&mut self, loc: Location, player: Player) {
        let mv = Bitboard::from(loc);
        let flips = bitboard::flip_mask(self.pieces(player), self.pieces(!player), mv);

        *self.pieces_mut(player) |= flips | mv;
        *self.pieces_mut(!player) ^= flips;
    }

    /// Number of pieces `player` has on the board.
    #[inline]
    pub fn count(&self, player: Player) -> u8 {
        self.pieces(player).count_occupied()
    }

    /// Piece difference from `player`'s perspective.
    #[inline]
    pub fn score_difference(&self, player: Player) -> i8 {
        self.count(player) as i8 - self.count(!player) as i8
    }

    /// Number of legal placements available to `player`.
    #[inline]
    pub fn mobility(&self, player: Player) -> usize {
        self.legal_moves(player).len()
    }

    /// Mask of all occupied squares.
    #[inline]
    pub fn occupied_mask(&self) -> Bitboard {
        self.black | self.white
    }

    /// Number of empty squares.
    #[inline]
    pub fn empty_count(&self) -> u8 {
        self.occupied_mask().count_empty()
    }
}

#[derive(Debug, PartialEq, Display, Error)]
#[display(fmt = "invalid board string")]
pub struct ParseBoardError;

/// Parse a board from 64 square characters (`X` black, `O` white, `-` or
/// `.` empty), whitespace ignored, in reading order: row 1 through row 8,
/// column A through H within each row.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;
        let mut squares = s.chars().filter(|c| !c.is_whitespace());

        for (x, y) in utils::scan_rows() {
            let bit = Bitboard::from(Location::from_coords(x, y));
            match squares.next().ok_or(ParseBoardError)? {
                'X' | 'x' => black |= bit,
                'O' | 'o' => white |= bit,
                '-' | '.' => {}
                _ => return Err(ParseBoardError),
            }
        }

        match squares.next() {
            None => Ok(Self { black, white }),
            Some(_) => Err(ParseBoardError),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::format_grid(
            utils::scan_rows().map(|(x, y)| {
                if self.get(Player::Black, x, y) {
                    'X'
                } else if self.get(Player::White, x, y) {
                    'O'
                } else {
                    '-'
                }
            }),
            f,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: usize, y: usize) -> Location {
        Location::from_coords(x, y)
    }

    #[test]
    fn starting_position() {
        let board = Board::default();
        assert_eq!(board.count(Player::Black), 2);
        assert_eq!(board.count(Player::White), 2);
        assert!(board.get(Player::Black, 3, 4));
        assert!(board.get(Player::Black, 4, 3));
        assert!(board.get(Player::White, 3, 3));
        assert!(board.get(Player::White, 4, 4));
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn copies_are_isolated() {
        let original = Board::default();
        let mut copy = original;
        copy.apply(loc(3, 2), Player::Black).unwrap();

        assert_eq!(original, Board::default());
        assert_eq!(original.count(Player::Black), 2);
        assert_eq!(original.count(Player::White), 2);
        assert_eq!(copy.count(Player::Black), 4);
        assert_eq!(copy.count(Player::White), 1);
    }

    #[test]
    fn apply_flips_the_captured_run() {
        let mut board = Board::default();
        board.apply(loc(3, 2), Player::Black).unwrap();

        let expected: Board = "
            --------
            --------
            ---X----
            ---XX---
            ---XO---
            --------
            --------
            --------"
            .parse()
            .unwrap();
        assert_eq!(board, expected);
    }

    #[test]
    fn apply_rejects_illegal_placements() {
        let mut board = Board::default();
        let err = board.apply(loc(0, 0), Player::Black).unwrap_err();
        assert_eq!(err.location, loc(0, 0));
        assert_eq!(err.player, Player::Black);
        assert_eq!(board, Board::default());

        // Occupied square.
        assert!(board.apply(loc(3, 3), Player::Black).is_err());
    }

    /// `legal_moves` must agree exactly, order included, with the
    /// brute-force scan of all 64 squares through `is_legal`.
    fn assert_moves_match_scan(board: &Board, player: Player) {
        let mut scanned = Vec::new();
        for x in 0..crate::EDGE_LENGTH {
            for y in 0..crate::EDGE_LENGTH {
                if board.is_legal(loc(x, y), player) {
                    scanned.push(loc(x, y));
                }
            }
        }
        let enumerated: Vec<Location> = board.legal_moves(player).collect();
        assert_eq!(enumerated, scanned);
    }

    #[test]
    fn enumeration_matches_per_square_legality() {
        let start = Board::default();
        assert_moves_match_scan(&start, Player::Black);
        assert_moves_match_scan(&start, Player::White);

        let midgame: Board = "
            --------
            --O-----
            --XXXO--
            --XOX---
            -OXOOO--
            ---XO---
            --X-----
            --------"
            .parse()
            .unwrap();
        assert_moves_match_scan(&midgame, Player::Black);
        assert_moves_match_scan(&midgame, Player::White);
    }

    #[test]
    fn enumeration_is_repeatable() {
        let board = Board::default();
        assert_eq!(
            board.legal_moves(Player::Black),
            board.legal_moves(Player::Black)
        );
        assert_eq!(board.mobility(Player::Black), 4);
        assert_eq!(board.mobility(Player::White), 4);
    }

    #[test]
    fn parse_and_query() {
        let board: Board = "
            X------O
            --------
            --------
            --------
            --------
            --------
            --------
            O------X"
            .parse()
            .unwrap();
        assert!(board.get(Player::Black, 0, 0));
        assert!(board.get(Player::White, 7, 0));
        assert!(board.get(Player::White, 0, 7));
        assert!(board.get(Player::Black, 7, 7));
        assert_eq!(board.score_difference(Player::Black), 0);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!("XX".parse::<Board>().is_err());
        assert!("Q".repeat(64).parse::<Board>().is_err());
        assert!("-".repeat(65).parse::<Board>().is_err());
    }
}
