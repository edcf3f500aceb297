//! Three self-contained shared-memory coordination patterns:
//!
//! - [`parallel_max`]: parallel reduction over a partitioned slice with a
//!   mutex-protected merge.
//! - [`resource_order`]: two symmetric workers acquiring two shared resources
//!   without ever deadlocking, via a fixed global acquisition order.
//! - [`wavefront`]: a prefix-sum domino chain coordinated with per-cell
//!   mutex/condition-variable pairs.
//!
//! Each module exposes a pure entry point that takes its parameters and
//! returns a `Result`; argument parsing, timing, and printing live in the
//! demo binaries under `src/bin/`.

pub mod error;
pub mod parallel_max;
pub mod resource_order;
pub mod wavefront;

pub use error::CoordError;
pub use parallel_max::find_max;
pub use resource_order::{one_round, run_rounds, DiningTable};
pub use wavefront::{prefix_sum, prefix_sum_of, PrefixSum, SequenceKind};
