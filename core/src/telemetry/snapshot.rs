//! telemetry/snapshot.rs
//!
//! Point-in-time progress values, derived from session state on demand.
//!
//! The total is an estimate: bytes already written plus half of the hex
//! digits still buffered. The real total is only known once the input is
//! exhausted, so ETA is a heuristic, not a guarantee.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub elapsed_secs: u64,
    pub bytes_written: u64,
    pub estimated_total: u64,
    /// Bytes per elapsed whole second; 0 while under one second.
    pub throughput: f64,
    /// Estimated seconds remaining; 0 when throughput or remaining is 0.
    pub eta_secs: u64,
}

impl ProgressSnapshot {
    pub fn compute(bytes_written: u64, buffered_digits: u64, elapsed_secs: u64) -> Self {
        let estimated_total = bytes_written + buffered_digits / 2;
        let throughput = average_throughput(bytes_written, elapsed_secs);
        let remaining = estimated_total - bytes_written;

        let eta_secs = if throughput > 0.0 && remaining > 0 {
            (remaining as f64 / throughput) as u64
        } else {
            0
        };

        Self {
            elapsed_secs,
            bytes_written,
            estimated_total,
            throughput,
            eta_secs,
        }
    }

    pub fn remaining_bytes(&self) -> u64 {
        self.estimated_total - self.bytes_written
    }
}

/// Bytes divided by whole seconds; 0 when no full second has elapsed.
pub fn average_throughput(bytes: u64, elapsed_secs: u64) -> f64 {
    if elapsed_secs == 0 {
        0.0
    } else {
        bytes as f64 / elapsed_secs as f64
    }
}
