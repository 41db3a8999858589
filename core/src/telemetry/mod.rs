//! telemetry/mod.rs
//! Unified telemetry module: counters, timers, derived snapshots and the final report.
//!
//! - Counters are mutated only by the orchestrator thread.
//! - `ProgressSnapshot` is never stored; it is derived whenever a status line is due.
//! - `ConversionReport` is the immutable, serialisable end-of-run summary.

pub mod counters;
pub mod timers;
pub mod snapshot;
pub mod report;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
pub use report::*;
