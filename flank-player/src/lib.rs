//! `flank-player` selects moves for one side of an Othello game.
//!
//! The engine couples a static position [`evaluator`] with a depth-bounded
//! adversarial [`search`]. [`player::Engine`] owns the live board across a
//! game and answers move requests under a clock; [`connectors`] adapt it to
//! outside referee harnesses, and [`random`] provides the weakest possible
//! sparring partner.

pub mod connectors;
pub mod evaluator;
pub mod player;
pub mod random;
pub mod search;
