//! Rounds of a two-thread dining philosophers problem that can never
//! deadlock.
//!
//! Run with: cargo run --bin dining -- <reps>

use std::env;
use std::process::ExitCode;

use sync_patterns::one_round;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: dining <reps>");
        return ExitCode::FAILURE;
    }
    let reps: usize = match args[1].parse() {
        Ok(reps) => reps,
        Err(_) => {
            eprintln!("Usage: dining <reps>");
            return ExitCode::FAILURE;
        }
    };

    for _ in 0..reps {
        if let Err(e) = one_round(|id| println!("Philosopher {} is eating.", id)) {
            eprintln!("An error occurred: {}", e);
            return ExitCode::FAILURE;
        }
        println!();
    }
    ExitCode::SUCCESS
}
