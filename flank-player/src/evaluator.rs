//! Static position scoring.
//!
//! Every policy scores a board from one side's perspective with the same
//! sign convention: **higher is better for the evaluated side**. All
//! policies are pure and antisymmetric (swapping sides negates the score);
//! the search depends on both properties.

use flank_othello::{Board, Player, EDGE_LENGTH};
use itertools::iproduct;

/// Weight of a corner square.
const CORNER_WEIGHT: i32 = 40;

/// Additional weight of any square on the outer edge.
const EDGE_WEIGHT: i32 = 10;

/// Penalty for squares on the ring one step in from the edge.
const DANGER_PENALTY: i32 = -1;

/// Additional penalty for a corner-diagonal square whose corner is not held
/// by the same side: it hands the opponent a capture path to the corner.
const LOOSE_X_SQUARE_PENALTY: i32 = -5;

/// The four corner-diagonal squares and the corner each one guards.
const X_SQUARES: [((usize, usize), (usize, usize)); 4] = [
    ((1, 1), (0, 0)),
    ((1, 6), (0, 7)),
    ((6, 1), (7, 0)),
    ((6, 6), (7, 7)),
];

/// A statically configured scoring policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Heuristic {
    /// Piece-count difference: the bluntest measure, exact at game end.
    DiscDifference,
    /// Weighted square ownership favoring corners and edges and punishing
    /// squares that give a corner away.
    Positional,
    /// Weighted sum of the normalized piece-count and mobility differences.
    Blended {
        disc_weight: f32,
        mobility_weight: f32,
    },
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Positional
    }
}

impl Heuristic {
    /// A [`Heuristic::Blended`] weighing captures and mobility equally.
    pub fn blended() -> Self {
        Heuristic::Blended {
            disc_weight: 1.0,
            mobility_weight: 1.0,
        }
    }

    /// Score `board` from `side`'s perspective. Pure: no state is read
    /// beyond the two arguments and none is written.
    pub fn evaluate(&self, side: Player, board: &Board) -> i32 {
        match *self {
            Heuristic::DiscDifference => i32::from(board.score_difference(side)),
            Heuristic::Positional => positional(side, board),
            Heuristic::Blended {
                disc_weight,
                mobility_weight,
            } => blended(side, board, disc_weight, mobility_weight),
        }
    }
}

/// Static weight of square `(x, y)`, independent of who holds what.
fn square_weight(x: usize, y: usize) -> i32 {
    let mut weight = 0;
    if (x == 0 || x == 7) && (y == 0 || y == 7) {
        weight += CORNER_WEIGHT;
    }
    if x == 0 || x == 7 || y == 0 || y == 7 {
        weight += EDGE_WEIGHT;
    }
    if x == 1 || x == 6 || y == 1 || y == 6 {
        weight += DANGER_PENALTY;
    }
    weight
}

/// Weight of square `(x, y)` for the side holding it, including the
/// loose-corner adjustment for the diagonal danger squares.
fn owner_weight(owner: Player, board: &Board, x: usize, y: usize) -> i32 {
    let mut weight = square_weight(x, y);
    for &((dx, dy), (cx, cy)) in X_SQUARES.iter() {
        if (x, y) == (dx, dy) && !board.get(owner, cx, cy) {
            weight += LOOSE_X_SQUARE_PENALTY;
        }
    }
    weight
}

fn positional(side: Player, board: &Board) -> i32 {
    iproduct!(0..EDGE_LENGTH, 0..EDGE_LENGTH)
        .map(|(x, y)| {
            if board.get(side, x, y) {
                owner_weight(side, board, x, y)
            } else if board.get(!side, x, y) {
                -owner_weight(!side, board, x, y)
            } else {
                0
            }
        })
        .sum()
}

/// Normalized piece-count difference blended with the normalized mobility
/// difference, scaled by 100 so integer scores keep a useful resolution.
/// Either term is 0 when its denominator would be, in particular the
/// mobility term when neither side can move.
fn blended(side: Player, board: &Board, disc_weight: f32, mobility_weight: f32) -> i32 {
    let disc_term = normalized_difference(
        f32::from(board.count(side)),
        f32::from(board.count(!side)),
    );
    let mobility_term = normalized_difference(
        board.mobility(side) as f32,
        board.mobility(!side) as f32,
    );

    (100.0 * (disc_weight * disc_term + mobility_weight * mobility_term)).round() as i32
}

fn normalized_difference(own: f32, opp: f32) -> f32 {
    if own + opp == 0.0 {
        0.0
    } else {
        (own - opp) / (own + opp)
    }
}
