//! Parallel maximum over a partitioned slice.
//!
//! The slice is split into contiguous chunks, one worker thread per chunk.
//! Each worker scans its chunk with no synchronization at all, then takes the
//! shared lock exactly once to merge its local maximum into the global one.
//! Because `max` is commutative, the result is the same for every
//! interleaving of the workers.

use std::ops::Range;
use std::sync::Mutex;
use std::thread;

use crate::error::CoordError;

/// Find the maximum of `data` using `nthreads` worker threads.
///
/// With `nthreads < 2` the scan runs inline with no locking and no spawning.
/// Rejects an empty slice and a zero thread count before any thread starts.
pub fn find_max(data: &[f32], nthreads: usize) -> Result<f32, CoordError> {
    if data.is_empty() {
        return Err(CoordError::EmptyInput);
    }
    if nthreads == 0 {
        return Err(CoordError::InvalidWorkerCount);
    }
    if nthreads < 2 {
        return Ok(serial_max(data));
    }

    let global_max = Mutex::new(data[0]);

    // Scoped threads borrow 'data' and 'global_max' directly; the scope
    // guarantees every worker has joined before we read the result.
    thread::scope(|scope| -> Result<(), CoordError> {
        let mut handles = Vec::new();
        for range in partition(data.len(), nthreads) {
            let chunk = &data[range];
            let global_max = &global_max;
            handles.push(thread::Builder::new().spawn_scoped(scope, move || {
                let local = serial_max(chunk);
                let mut global = global_max.lock().unwrap();
                if local > *global {
                    *global = local;
                }
            })?);
        }
        let mut panicked = false;
        for handle in handles {
            panicked |= handle.join().is_err();
        }
        if panicked {
            return Err(CoordError::WorkerPanic);
        }
        Ok(())
    })?;

    let result = *global_max.lock().unwrap();
    Ok(result)
}

/// Split `[0, len)` into contiguous ranges of `ceil(len / nthreads)` elements.
/// The last range is truncated at `len`, and ranges that would start past the
/// end are never produced, so `nthreads` may exceed the number of usable
/// chunks.
pub(crate) fn partition(len: usize, nthreads: usize) -> Vec<Range<usize>> {
    let chunk_size = ((len + nthreads - 1) / nthreads).max(1);
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < len {
        let end = (start + chunk_size).min(len);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

fn serial_max(data: &[f32]) -> f32 {
    let mut max = data[0];
    for &x in data {
        if x > max {
            max = x;
        }
    }
    max
}
