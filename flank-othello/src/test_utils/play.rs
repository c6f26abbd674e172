use crate::{Game, Move};
use std::io::Write;

/// Drive a two-human Othello game over stdin, printing the position between
/// moves. Handy for eyeballing rule changes.
pub fn play_interactive() {
    let mut game = Game::default();

    while !game.is_finished() {
        println!("\n{}", game);

        print!("Enter a move ('A1'..'H8' or 'pass'): ");
        std::io::stdout().flush().unwrap();

        let mut input_line = String::new();
        std::io::stdin().read_line(&mut input_line).unwrap();

        let mv: Move = match input_line.trim().parse() {
            Ok(mv) => mv,
            Err(_) => {
                println!("Cannot parse move.");
                continue;
            }
        };

        match game.apply_move(mv) {
            Ok(next) => game = next,
            Err(_) if game.get_moves().is_empty() => {
                println!("No placements available. Please enter 'pass'.");
            }
            Err(_) => {
                println!("Invalid move. Legal moves: {}", game.get_moves());
            }
        }
    }

    println!("\n{}", game.board);
    match game.winner() {
        Some(winner) => println!("Winner: {}.", winner),
        None => println!("Draw."),
    }
}
