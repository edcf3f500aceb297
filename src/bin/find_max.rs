//! Find the maximum value in an array of n random floats.
//!
//! Run with: cargo run --bin find_max -- <n> <nthreads>
//!
//! With nthreads < 2 the scan runs serially; otherwise the array is divided
//! as evenly as possible among the threads.

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use rand::Rng;
use sync_patterns::find_max;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: find_max <n> <nthreads>");
        return ExitCode::FAILURE;
    }
    let (n, nthreads) = match (args[1].parse::<usize>(), args[2].parse::<usize>()) {
        (Ok(n), Ok(t)) => (n, t),
        _ => {
            eprintln!("Usage: find_max <n> <nthreads>");
            return ExitCode::FAILURE;
        }
    };

    let mut rng = rand::thread_rng();
    let data: Vec<f32> = (0..n)
        .map(|_| rng.gen::<u32>() as f32 / (rng.gen::<u32>() as f32 + 1.0))
        .collect();

    let then = Instant::now();
    let result = find_max(&data, nthreads);
    let elapsed_ms = then.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(gmax) => {
            println!("gMax = {}", gmax);
            let label = if nthreads < 2 { "serialtime" } else { "paralleltime" };
            println!("%%% {} {} milliseconds", label, elapsed_ms);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            ExitCode::FAILURE
        }
    }
}
