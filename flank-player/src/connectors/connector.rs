use async_trait::async_trait;
use flank_othello::{Move, Player};

/// A player-facing interface to one way of exchanging moves with "the
/// outside world".
#[async_trait]
pub trait Connector {
    /// Signal that setup is finished and the game may begin.
    fn set_ready(&mut self);

    /// Which color we have been assigned.
    fn player_color(&self) -> Player;

    /// Announce our move to the other side.
    fn publish_move(&mut self, mv: Move);

    /// Wait for the opponent's move. May wait forever if it is not their
    /// turn or the opponent has died.
    async fn opponent_move(&mut self) -> Move;
}
