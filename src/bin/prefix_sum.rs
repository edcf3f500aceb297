//! Prefix sums computed by a chain of condition-variable-linked workers.
//!
//! Run with: cargo run --bin prefix_sum -- <num_elements> [random]
//!
//! If "random" is given the values are uniform in [1, 10]; otherwise the
//! natural numbers are used, beginning with 1. For example:
//!
//! ```text
//! % prefix_sum 10
//!     1     2     3     4     5     6     7     8     9    10
//!     1     3     6    10    15    21    28    36    45    55
//! ```

use std::env;
use std::process::ExitCode;

use sync_patterns::{prefix_sum, SequenceKind};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: prefix_sum <num_elements> [random]");
        return ExitCode::FAILURE;
    }
    let num_elements: usize = match args[1].parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            eprintln!("Usage: prefix_sum <num_elements> [random]");
            return ExitCode::FAILURE;
        }
    };
    let kind = match args.get(2) {
        Some(word) if word.eq_ignore_ascii_case("random") => SequenceKind::Random,
        _ => SequenceKind::Natural,
    };

    match prefix_sum(num_elements - 1, kind) {
        Ok(result) => {
            for value in &result.values {
                print!("{:5} ", value);
            }
            println!();
            for sum in &result.sums {
                print!("{:5} ", sum);
            }
            println!();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            ExitCode::FAILURE
        }
    }
}
