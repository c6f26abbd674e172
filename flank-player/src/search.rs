//! Depth-bounded adversarial search.
//!
//! The canonical search is [`negamax`]: one recursive function serving both
//! sides by sign negation, with fail-soft alpha-beta pruning (a cutoff
//! returns the best score actually found, never a clamp to the window). A
//! side with no placement passes, searching the opponent at the *same*
//! depth, and two consecutive passes end the line with an exact score.
//!
//! [`max_value`] and [`min_value`] keep the textbook minimax formulation
//! alive without pruning, as an oracle for cross-checking the pruned search.
//!
//! [`select_move`] is the root driver: iterative deepening under an optional
//! deadline, with ties between root moves resolved toward scan order.

use crate::evaluator::Heuristic;
use arrayvec::ArrayVec;
use flank_othello::{Board, Location, Player};
use std::time::Instant;

/// Upper bound on any reachable score; search windows start at `±INF`.
pub const INF: i32 = 30_000;

/// Scale applied to the final piece difference when a line reaches the end
/// of the game, putting decided outcomes out of reach of heuristic scores.
const GAME_OVER_WEIGHT: i32 = 256;

/// Below this remaining depth, children are searched in scan order;
/// shallow subtrees are cheaper to search than to sort.
const MIN_SORT_DEPTH: u8 = 3;

/// How deep to search below the root and when to stop.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub deadline: Option<Instant>,
}

impl SearchLimits {
    /// Fixed-depth limits with no clock.
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            deadline: None,
        }
    }
}

/// A root move together with the score the search backed up for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredMove {
    pub location: Location,
    pub score: i32,
}

/// Raised inside the search when the deadline expires. The interrupted
/// iteration's partial results are discarded by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchAborted;

/// Bookkeeping shared by every frame of one search pass.
struct SearchContext {
    heuristic: Heuristic,
    deadline: Option<Instant>,
    nodes: u64,
}

impl SearchContext {
    fn new(heuristic: Heuristic, deadline: Option<Instant>) -> Self {
        Self {
            heuristic,
            deadline,
            nodes: 0,
        }
    }

    /// Runs once per expanded node: counts it and checks the clock.
    #[inline]
    fn tick(&mut self) -> Result<(), SearchAborted> {
        self.nodes += 1;
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SearchAborted),
            _ => Ok(()),
        }
    }
}

/// Pick the best move for `side`, or `None` when `side` has no legal move
/// and must pass. An empty root move list returns immediately; the
/// recursive search is never entered.
///
/// Deepens iteratively from depth 1 to `limits.max_depth` and returns the
/// choice of the deepest fully completed iteration; an iteration cut off by
/// the deadline is discarded whole. Depth 1 runs without the clock so a
/// legal answer always exists. Among equally scored root moves the first in
/// scan order wins.
pub fn select_move(
    side: Player,
    board: &Board,
    limits: SearchLimits,
    heuristic: Heuristic,
) -> Option<ScoredMove> {
    if board.legal_moves(side).is_empty() {
        return None;
    }

    let mut context = SearchContext::new(heuristic, None);
    let mut best = match search_root(side, board, 1, &mut context) {
        Ok(result) => result,
        Err(SearchAborted) => unreachable!("clockless search cannot abort"),
    };
    let mut nodes = context.nodes;
    let mut completed_depth = 1;

    for depth in 2..=limits.max_depth {
        let mut context = SearchContext::new(heuristic, limits.deadline);
        let result = search_root(side, board, depth, &mut context);
        nodes += context.nodes;

        match result {
            Ok(deeper) => {
                best = deeper;
                completed_depth = depth;
            }
            Err(SearchAborted) => break,
        }
    }

    log::debug!(
        "{}: {} scores {} (depth {}, {} nodes)",
        side,
        best.location,
        best.score,
        completed_depth,
        nodes
    );
    Some(best)
}

/// One alpha-beta pass over the root moves at a fixed total depth: each
/// candidate is simulated on its own board copy and scored by the search
/// below it.
fn search_root(
    side: Player,
    board: &Board,
    depth: u8,
    context: &mut SearchContext,
) -> Result<ScoredMove, SearchAborted> {
    let mut alpha = -INF;
    let mut best: Option<ScoredMove> = None;

    for location in board.legal_moves(side) {
        let mut child = *board;
        child.apply_unchecked(location, side);

        let score = -negamax_frame(&child, !side, depth - 1, false, -INF, -alpha, context)?;

        if best.map_or(true, |b| score > b.score) {
            best = Some(ScoredMove { location, score });
        }
        if score > alpha {
            alpha = score;
        }
    }

    Ok(best.expect("root move list checked non-empty"))
}

/// Score `board` from the perspective of `side`, who is to move, looking
/// `depth` plies ahead. Fail-soft: the result is the best score found even
/// when it falls outside `(alpha, beta)`.
pub fn negamax(
    side: Player,
    board: &Board,
    depth: u8,
    alpha: i32,
    beta: i32,
    heuristic: Heuristic,
) -> i32 {
    let mut context = SearchContext::new(heuristic, None);
    match negamax_frame(board, side, depth, false, alpha, beta, &mut context) {
        Ok(score) => score,
        Err(SearchAborted) => unreachable!("clockless search cannot abort"),
    }
}

fn negamax_frame(
    board: &Board,
    to_move: Player,
    depth: u8,
    passed: bool,
    mut alpha: i32,
    beta: i32,
    context: &mut SearchContext,
) -> Result<i32, SearchAborted> {
    context.tick()?;

    if depth == 0 {
        return Ok(context.heuristic.evaluate(to_move, board));
    }

    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        // Both players stuck: the game ends on this line.
        if passed {
            return Ok(game_over_score(to_move, board));
        }

        // Forced pass: the opponent moves again at the same depth.
        return Ok(-negamax_frame(board, !to_move, depth, true, -beta, -alpha, context)?);
    }

    let mut best = -INF;

    if depth >= MIN_SORT_DEPTH {
        // Lowest-opponent-mobility first: lines that cramp the opponent
        // tend to produce the earliest cutoffs.
        let mut children: ArrayVec<[(usize, Board); 64]> = moves
            .map(|location| {
                let mut child = *board;
                child.apply_unchecked(location, to_move);
                (child.mobility(!to_move), child)
            })
            .collect();
        children.sort_unstable_by_key(|&(mobility, _)| mobility);

        for (_, child) in &children {
            let score = -negamax_frame(child, !to_move, depth - 1, false, -beta, -alpha, context)?;
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                return Ok(best);
            }
        }
    } else {
        for location in moves {
            let mut child = *board;
            child.apply_unchecked(location, to_move);

            let score = -negamax_frame(&child, !to_move, depth - 1, false, -beta, -alpha, context)?;
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                return Ok(best);
            }
        }
    }

    Ok(best)
}

/// Exact score for a finished line from `side`'s perspective: the piece
/// difference, scaled so any decided game outweighs any heuristic value.
fn game_over_score(side: Player, board: &Board) -> i32 {
    i32::from(board.score_difference(side)) * GAME_OVER_WEIGHT
}

/// Unpruned minimax, maximizing frame: `side` is to move and the score is
/// from `side`'s perspective throughout. Exponentially slower than
/// [`negamax`]; kept as the oracle the pruned search is tested against.
pub fn max_value(side: Player, board: &Board, depth: u8, passed: bool, heuristic: Heuristic) -> i32 {
    if depth == 0 {
        return heuristic.evaluate(side, board);
    }

    let moves = board.legal_moves(side);
    if moves.is_empty() {
        if passed {
            return game_over_score(side, board);
        }
        return min_value(side, board, depth, true, heuristic);
    }

    moves
        .map(|location| {
            let mut child = *board;
            child.apply_unchecked(location, side);
            min_value(side, &child, depth - 1, false, heuristic)
        })
        .max()
        .expect("move list checked non-empty")
}

/// Unpruned minimax, minimizing frame: `side`'s opponent is to move, and
/// the score stays from `side`'s perspective.
pub fn min_value(side: Player, board: &Board, depth: u8, passed: bool, heuristic: Heuristic) -> i32 {
    if depth == 0 {
        return heuristic.evaluate(side, board);
    }

    let moves = board.legal_moves(!side);
    if moves.is_empty() {
        if passed {
            return game_over_score(side, board);
        }
        return max_value(side, board, depth, true, heuristic);
    }

    moves
        .map(|location| {
            let mut child = *board;
            child.apply_unchecked(location, !side);
            max_value(side, &child, depth - 1, false, heuristic)
        })
        .min()
        .expect("move list checked non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_one_start_ties_break_toward_scan_order() {
        // All four openings capture exactly one piece, so disc difference
        // ties them and the first in scan order must win: C4.
        let chosen = select_move(
            Player::Black,
            &Board::default(),
            SearchLimits::depth(1),
            Heuristic::DiscDifference,
        )
        .unwrap();
        assert_eq!(chosen.location, Location::from_coords(2, 3));
        assert_eq!(chosen.score, 3);
    }

    #[test]
    fn depth_one_start_positional_picks_an_opening() {
        let board = Board::default();
        let chosen = select_move(
            Player::Black,
            &board,
            SearchLimits::depth(1),
            Heuristic::Positional,
        )
        .unwrap();

        assert!(board.legal_moves(Player::Black).contains(chosen.location));
        // The openings all land on weightless central squares and tie at
        // zero, so scan order resolves to C4 here too.
        assert_eq!(chosen.score, 0);
        assert_eq!(chosen.location, Location::from_coords(2, 3));
    }

    #[test]
    fn no_legal_moves_reports_a_pass() {
        // Black has no pieces, so nothing can be captured and no placement
        // is legal.
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
        assert_eq!(
            select_move(
                Player::Black,
                &board,
                SearchLimits::depth(4),
                Heuristic::Positional
            ),
            None
        );
    }

    #[test]
    fn double_pass_scores_the_final_position() {
        // A single black piece: neither side can ever move again.
        let board: Board = "
            X-------
            --------
            --------
            --------
            --------
            --------
            --------
            --------"
            .parse()
            .unwrap();
        assert_eq!(
            negamax(Player::Black, &board, 5, -INF, INF, Heuristic::DiscDifference),
            GAME_OVER_WEIGHT
        );
        assert_eq!(
            negamax(Player::White, &board, 5, -INF, INF, Heuristic::DiscDifference),
            -GAME_OVER_WEIGHT
        );
    }

    #[test]
    fn forced_pass_searches_the_opponent_at_the_same_depth() {
        // Black cannot move; White takes C1 for three pieces, after which
        // the game is dead: 3 * GAME_OVER_WEIGHT either way.
        let board: Board = "
            OX------
            --------
            --------
            --------
            --------
            --------
            --------
            --------"
            .parse()
            .unwrap();
        assert!(board.legal_moves(Player::Black).is_empty());
        assert!(!board.legal_moves(Player::White).is_empty());

        let white = negamax(Player::White, &board, 3, -INF, INF, Heuristic::DiscDifference);
        let black = negamax(Player::Black, &board, 3, -INF, INF, Heuristic::DiscDifference);
        assert_eq!(white, 3 * GAME_OVER_WEIGHT);
        assert_eq!(black, -3 * GAME_OVER_WEIGHT);
    }
}
