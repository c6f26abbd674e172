//! [`Connector`] speaking a line-oriented referee protocol: one "x y"
//! coordinate pair or the word "pass" per line, over stdin/stdout.

use super::Connector;
use async_std::io;
use async_trait::async_trait;
use flank_othello::{Game, Location, Move, Player};

/// Every move that crosses the wire, in either direction, is validated
/// through the internal [`Game`] so a desynchronized referee is caught at
/// the boundary instead of corrupting the engine's state.
pub struct TextConnector {
    game: Game,
    player: Player,
}

impl TextConnector {
    pub fn new(player: Player) -> Self {
        Self {
            game: Game::default(),
            player,
        }
    }
}

#[async_trait]
impl Connector for TextConnector {
    fn set_ready(&mut self) {
        println!("ready");
    }

    fn player_color(&self) -> Player {
        self.player
    }

    fn publish_move(&mut self, mv: Move) {
        self.game = self.game.apply_move(mv).expect("engine produced an illegal move");
        match mv {
            Move::Pass => println!("pass"),
            Move::Piece(loc) => {
                let (x, y) = loc.to_coords();
                println!("{} {}", x, y);
            }
        }
    }

    async fn opponent_move(&mut self) -> Move {
        let mut buffer = String::new();
        io::stdin()
            .read_line(&mut buffer)
            .await
            .expect("referee hung up");

        let mv = match buffer.trim() {
            "pass" => Move::Pass,
            line => {
                let mut segments = line.split_whitespace();
                let x: usize = segments
                    .next()
                    .and_then(|s| s.parse().ok())
                    .expect("malformed move line");
                let y: usize = segments
                    .next()
                    .and_then(|s| s.parse().ok())
                    .expect("malformed move line");
                Move::Piece(Location::from_coords(x, y))
            }
        };

        self.game = self.game.apply_move(mv).expect("referee sent an illegal move");
        log::debug!("opponent played {}", mv);
        mv
    }
}
