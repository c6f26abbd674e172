//! Uniform random move selection: the weakest strategy, and a useful
//! sparring partner in tests.

use arrayvec::ArrayVec;
use flank_othello::{Board, Location, Player};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a uniformly random legal move for `side`, or `None` to pass.
///
/// The caller supplies the generator, so seeded play is reproducible.
pub fn random_move<R: Rng>(rng: &mut R, side: Player, board: &Board) -> Option<Location> {
    let moves: ArrayVec<[Location; 64]> = board.legal_moves(side).collect();
    moves.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn chooses_a_legal_move() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::default();
        for _ in 0..20 {
            let chosen = random_move(&mut rng, Player::Black, &board).unwrap();
            assert!(board.is_legal(chosen, Player::Black));
        }
    }

    #[test]
    fn passes_without_moves() {
        let board: Board = "
            O-------
            --------
            --------
            --------
            --------
            --------
            --------
            --------"
            .parse()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(random_move(&mut rng, Player::Black, &board), None);
    }
}
