//! Evaluates one board from the command line.
//!
//! ```text
//! solve XX./OO./...
//! ```
//! Cells are given row-major; `.`, `_` or `-` mark an empty cell. The best move is for `O`.

use std::env;
use std::process;
use tictactoe_solver::core::{Board, AI};
use tictactoe_solver::logic::{outcome, Outcome};
use tictactoe_solver::player::ai::{best_move, score};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: solve <board>   e.g. solve XX./OO./...");
        process::exit(1);
    }

    let board: Board = match args[1].parse() {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    print!("{}", board);
    println!();

    match outcome(&board) {
        Outcome::Win(player) => println!("Outcome: {} has won", player),
        Outcome::Draw => println!("Outcome: draw"),
        Outcome::InProgress => {
            let mv = best_move(&board)?;
            let mut after = board;
            after.put(mv, AI.cell());
            let value = score(&mut after, false);
            let verdict = match value {
                1 => "forced win",
                0 => "draw",
                _ => "loss against perfect play",
            };
            println!("Outcome: in progress");
            println!(
                "Best move for {}: {} (position {}), {}",
                AI,
                mv,
                mv.position(),
                verdict
            );
        }
    }
    Ok(())
}
