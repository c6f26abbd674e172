//! "Perft" leaf counting: the number of distinct move paths of a given
//! length from the starting position. The reference counts published at
//! http://www.aartbik.com/MISC/reversi.html pin down move generation and
//! capture logic in one sweep.

use crate::{Board, Player};

pub fn run_perft(depth: u64) -> u64 {
    leaves_below(Board::default(), Player::Black, depth, false)
}

fn leaves_below(board: Board, to_move: Player, depth: u64, passed: bool) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        // Both players passed: the game is over.
        if passed {
            return 1;
        }

        return leaves_below(board, !to_move, depth - 1, true);
    }

    moves
        .map(|loc| {
            let mut next = board;
            next.apply_unchecked(loc, to_move);
            leaves_below(next, !to_move, depth - 1, false)
        })
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(4), 244);
}

#[test]
fn perft_05() {
    assert_eq!(run_perft(5), 1396);
}

#[test]
fn perft_06() {
    assert_eq!(run_perft(6), 8200);
}

#[test]
fn perft_07() {
    assert_eq!(run_perft(7), 55092);
}

#[test]
fn perft_08() {
    assert_eq!(run_perft(8), 390216);
}

// Passing moves begin here.
#[test]
fn perft_09() {
    assert_eq!(run_perft(9), 3005288);
}

#[test]
#[ignore = "slow in debug builds"]
fn perft_10() {
    assert_eq!(run_perft(10), 24571284);
}

// Ending moves begin here.
#[test]
#[ignore = "slow in debug builds"]
fn perft_11() {
    assert_eq!(run_perft(11), 212258800);
}
