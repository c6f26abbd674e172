//! Tournament entry point: wires the engine to the line-protocol referee.

use flank_othello::{Move, Player};
use flank_player::connectors::{Connector, TextConnector};
use flank_player::evaluator::Heuristic;
use flank_player::player::{Engine, DEFAULT_DEPTH};
use getopts::Options;
use std::env;
use std::time::Instant;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut opts = Options::new();
    opts.optopt("s", "side", "color to play", "black|white");
    opts.optopt("d", "depth", "maximum search depth in plies", "PLIES");
    opts.optopt("e", "eval", "scoring policy", "positional|discs|blended");
    opts.optopt("t", "time", "total clock in milliseconds, -1 for none", "MS");
    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => panic!("failed to parse args: {}", e),
    };

    let side: Player = matches
        .opt_str("s")
        .expect("side required")
        .parse()
        .expect("side must be black or white");
    let depth: u8 = matches
        .opt_str("d")
        .map(|d| d.parse().expect("depth must be an integer"))
        .unwrap_or(DEFAULT_DEPTH);
    let heuristic = match matches.opt_str("e").as_deref() {
        None | Some("positional") => Heuristic::Positional,
        Some("discs") => Heuristic::DiscDifference,
        Some("blended") => Heuristic::blended(),
        Some(other) => panic!("unknown eval policy: {}", other),
    };
    let ms_left: i64 = matches
        .opt_str("t")
        .map(|t| t.parse().expect("time must be an integer"))
        .unwrap_or(-1);

    async_std::task::block_on(run(side, depth, heuristic, ms_left));
}

async fn run(side: Player, depth: u8, heuristic: Heuristic, mut ms_left: i64) {
    let mut engine = Engine::new(side, heuristic, depth);
    let mut connector = TextConnector::new(side);
    connector.set_ready();

    // Black opens without waiting; White hears the opening first.
    let mut incoming = match side {
        Player::Black => None,
        Player::White => connector.opponent_move().await.location(),
    };

    loop {
        let started = Instant::now();
        let outgoing = engine
            .do_move(incoming, ms_left)
            .expect("referee and engine disagree on legality");
        if ms_left >= 0 {
            ms_left = (ms_left - started.elapsed().as_millis() as i64).max(0);
        }

        connector.publish_move(Move::from(outgoing));
        if engine.is_finished() {
            break;
        }

        incoming = connector.opponent_move().await.location();
    }
}
