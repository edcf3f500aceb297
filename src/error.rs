//! Error types shared by the three coordination patterns.

use std::io;
use thiserror::Error;

/// Failure modes for the coordination entry points.
///
/// Every variant is terminal for the current operation; nothing here is
/// retried. Each variant represents a distinct failure mode.
#[derive(Error, Debug)]
pub enum CoordError {
    #[error("input slice was empty")]
    EmptyInput,
    #[error("at least one worker is required")]
    InvalidWorkerCount,
    #[error("value at index {index} must be positive")]
    NonPositiveValue { index: usize },
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
    #[error("a worker thread panicked")]
    WorkerPanic,
}
