//! Deadlock-free acquisition of two shared resources by two symmetric
//! workers.
//!
//! Both workers need both resources before they can act. The classic bug is
//! for each worker to grab a different resource first; the fix is a single
//! global acquisition order that every worker follows.

use std::sync::Mutex;
use std::thread;

use crate::error::CoordError;

/// The two shared resources for one round, passed to workers as an explicit
/// handle rather than reached through globals.
#[derive(Default)]
pub struct DiningTable {
    forks: [Mutex<()>; 2],
}

impl DiningTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire both resources in index order, run the critical action while
    /// holding both, then release. Release order does not matter for
    /// correctness; acquisition order does.
    pub fn acquire_both<F: FnOnce()>(&self, action: F) {
        let _first = self.forks[0].lock().unwrap();
        let _second = self.forks[1].lock().unwrap();
        action();
    }
}

/// Run one round: two workers each acquire both resources and invoke
/// `observer` with their id (0 or 1) while holding both.
///
/// Both workers use the same acquisition order, so at least one of them can
/// always make progress and the round always completes.
pub fn one_round<F>(observer: F) -> Result<(), CoordError>
where
    F: Fn(usize) + Sync,
{
    let table = DiningTable::new();
    thread::scope(|scope| -> Result<(), CoordError> {
        let mut handles = Vec::new();
        for id in 0..2 {
            let table = &table;
            let observer = &observer;
            handles.push(
                thread::Builder::new()
                    .name(format!("philosopher-{}", id))
                    .spawn_scoped(scope, move || {
                        table.acquire_both(|| observer(id));
                    })?,
            );
        }
        let mut panicked = false;
        for handle in handles {
            panicked |= handle.join().is_err();
        }
        if panicked {
            return Err(CoordError::WorkerPanic);
        }
        Ok(())
    })
}

/// Run `reps` complete rounds. Each round gets a fresh table, and both
/// workers of a round finish before the next round starts.
pub fn run_rounds<F>(reps: usize, observer: F) -> Result<(), CoordError>
where
    F: Fn(usize) + Sync,
{
    for _ in 0..reps {
        one_round(&observer)?;
    }
    Ok(())
}
