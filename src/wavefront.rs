//! Prefix sums over a domino chain of condition variables.
//!
//! The chain has `nworkers + 1` cells. Worker `i` owns cell `i` (for
//! `i >= 1`): it blocks until cell `i - 1` publishes its sum, adds its own
//! value, publishes on its own cell, and exits. The coordinator pushes the
//! first domino by seeding cell 0, and the wakeups cascade down the chain one
//! cell at a time. Total work is O(N), but the critical path is the whole
//! chain: this is wavefront parallelism, not data parallelism.

use std::sync::{Condvar, Mutex};
use std::thread;

use rand::Rng;

use crate::error::CoordError;

/// How the cell values are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// The natural numbers 1, 2, 3, ...
    Natural,
    /// Uniform random integers in [1, 10].
    Random,
}

/// The computed chain: the input values and their prefix sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSum {
    pub values: Vec<i64>,
    pub sums: Vec<i64>,
}

/// One link in the chain. `sum` doubles as the readiness flag: zero means
/// "not computed yet", which is why every value must be positive.
struct Cell {
    value: i64,
    sum: Mutex<i64>,
    ready: Condvar,
}

impl Cell {
    fn new(value: i64) -> Self {
        Self {
            value,
            sum: Mutex::new(0),
            ready: Condvar::new(),
        }
    }

    /// Block until this cell's sum has been published, then return it.
    /// The while loop re-checks the predicate after every wake, so spurious
    /// wakeups and stray notifies are harmless.
    fn wait_ready(&self) -> i64 {
        let mut sum = self.sum.lock().unwrap();
        while *sum == 0 {
            sum = self.ready.wait(sum).unwrap();
        }
        *sum
    }

    /// Publish this cell's sum and wake its waiter. The notify happens while
    /// the lock is still held, so the waiter cannot miss it.
    fn publish(&self, sum: i64) {
        let mut slot = self.sum.lock().unwrap();
        *slot = sum;
        self.ready.notify_one();
    }

    fn current_sum(&self) -> i64 {
        *self.sum.lock().unwrap()
    }
}

/// Compute prefix sums over `nworkers + 1` generated cells.
///
/// `nworkers` may be zero: the chain is then the single cell 0, which the
/// coordinator seeds directly with no threads involved.
pub fn prefix_sum(nworkers: usize, kind: SequenceKind) -> Result<PrefixSum, CoordError> {
    let mut rng = rand::thread_rng();
    let values: Vec<i64> = (0..nworkers + 1)
        .map(|i| match kind {
            SequenceKind::Natural => i as i64 + 1,
            SequenceKind::Random => rng.gen_range(1..=10),
        })
        .collect();
    prefix_sum_of(&values)
}

/// Compute prefix sums over caller-supplied values, one worker thread per
/// cell after the first.
///
/// Every value must be strictly positive, since a zero sum is the protocol's
/// "not ready" sentinel. For a fixed value sequence the result is fully
/// deterministic regardless of how the workers are scheduled.
pub fn prefix_sum_of(values: &[i64]) -> Result<PrefixSum, CoordError> {
    if values.is_empty() {
        return Err(CoordError::EmptyInput);
    }
    if let Some(index) = values.iter().position(|&v| v <= 0) {
        return Err(CoordError::NonPositiveValue { index });
    }

    let cells: Vec<Cell> = values.iter().map(|&v| Cell::new(v)).collect();

    thread::scope(|scope| -> Result<(), CoordError> {
        let mut handles = Vec::new();
        let mut spawn_err = None;
        for i in 1..cells.len() {
            let cells = &cells;
            let builder = thread::Builder::new().name(format!("cell-{}", i));
            match builder.spawn_scoped(scope, move || {
                let left = cells[i - 1].wait_ready();
                cells[i].publish(left + cells[i].value);
            }) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawn_err = Some(e);
                    break;
                }
            }
        }

        // Push the first domino: cell 0 has no left neighbor, so its sum is
        // its own value. This must happen even after a spawn failure, or the
        // workers that did start would wait forever and never join.
        cells[0].publish(cells[0].value);

        let mut panicked = false;
        for handle in handles {
            panicked |= handle.join().is_err();
        }
        if let Some(e) = spawn_err {
            return Err(CoordError::Spawn(e));
        }
        if panicked {
            return Err(CoordError::WorkerPanic);
        }
        Ok(())
    })?;

    Ok(PrefixSum {
        values: values.to_vec(),
        sums: cells.iter().map(Cell::current_sum).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_natural_ten_cells() {
        let result = prefix_sum(9, SequenceKind::Natural).unwrap();
        assert_eq!(result.values, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(result.sums, vec![1, 3, 6, 10, 15, 21, 28, 36, 45, 55]);
    }

    #[test]
    fn test_zero_workers_single_cell() {
        let result = prefix_sum(0, SequenceKind::Natural).unwrap();
        assert_eq!(result.values, vec![1]);
        assert_eq!(result.sums, vec![1]);
    }

    #[test]
    fn test_single_caller_value() {
        let result = prefix_sum_of(&[5]).unwrap();
        assert_eq!(result.sums, vec![5]);
    }

    #[test]
    fn test_deterministic_for_fixed_values() {
        let values = [3, 1, 4, 1, 5, 9, 2, 6];
        let first = prefix_sum_of(&values).unwrap();
        for _ in 0..20 {
            assert_eq!(prefix_sum_of(&values).unwrap(), first);
        }
    }

    #[test]
    fn test_random_sums_consistent_with_values() {
        let result = prefix_sum(31, SequenceKind::Random).unwrap();
        assert_eq!(result.sums[0], result.values[0]);
        for i in 1..result.values.len() {
            assert!((1..=10).contains(&result.values[i]));
            assert_eq!(result.sums[i], result.sums[i - 1] + result.values[i]);
        }
    }

    #[test]
    fn test_rejects_empty_values() {
        assert!(matches!(prefix_sum_of(&[]), Err(CoordError::EmptyInput)));
    }

    #[test]
    fn test_rejects_non_positive_value() {
        assert!(matches!(
            prefix_sum_of(&[1, 0, 2]),
            Err(CoordError::NonPositiveValue { index: 1 })
        ));
        assert!(matches!(
            prefix_sum_of(&[-3]),
            Err(CoordError::NonPositiveValue { index: 0 })
        ));
    }

    #[test]
    fn test_wait_survives_stray_notifies() {
        let cell = Cell::new(7);
        thread::scope(|scope| {
            let waiter = scope.spawn(|| cell.wait_ready());
            // No-op signals: the predicate is still false, so the waiter must
            // go back to sleep each time.
            for _ in 0..100 {
                cell.ready.notify_one();
                cell.ready.notify_all();
            }
            cell.publish(7);
            assert_eq!(waiter.join().unwrap(), 7);
        });
    }

    #[test]
    fn test_chain_survives_notify_storm() {
        // Run the full protocol by hand with an injector thread hammering
        // every condition variable; the predicate re-check must keep the sums
        // intact.
        let values: Vec<i64> = (1..=16).collect();
        let cells: Vec<Cell> = values.iter().map(|&v| Cell::new(v)).collect();
        let done = AtomicBool::new(false);

        thread::scope(|scope| {
            for i in 1..cells.len() {
                let cells = &cells;
                scope.spawn(move || {
                    let left = cells[i - 1].wait_ready();
                    cells[i].publish(left + cells[i].value);
                });
            }
            let cells_ref = &cells;
            let done_ref = &done;
            let injector = scope.spawn(move || {
                while !done_ref.load(Ordering::Relaxed) {
                    for cell in cells_ref {
                        cell.ready.notify_all();
                    }
                    thread::yield_now();
                }
            });

            cells[0].publish(cells[0].value);

            // Workers join when the scope ends; only the injector needs an
            // explicit stop once the last sum is visible.
            while cells[cells.len() - 1].current_sum() == 0 {
                thread::yield_now();
            }
            done.store(true, Ordering::Relaxed);
            injector.join().unwrap();
        });

        let sums: Vec<i64> = cells.iter().map(Cell::current_sum).collect();
        let expected: Vec<i64> = values
            .iter()
            .scan(0, |acc, &v| {
                *acc += v;
                Some(*acc)
            })
            .collect();
        assert_eq!(sums, expected);
    }
}
