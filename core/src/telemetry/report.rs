use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::{average_throughput, ConversionCounters, StageTimes, TelemetryTimer};

/// End-of-run summary, produced for both completed and cancelled sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub counters: ConversionCounters,
    /// Bytes per elapsed whole second.
    pub throughput_bytes_per_sec: f64,
    pub workers: usize,
    pub chunk_size_hex: usize,
    pub stage_times: StageTimes,
    /// Absolute output path, when converting to a file.
    pub output_path: Option<PathBuf>,
}

impl ConversionReport {
    pub fn from(
        started_at: DateTime<Utc>,
        counters: &ConversionCounters,
        timer: &TelemetryTimer,
        workers: usize,
        chunk_size_hex: usize,
    ) -> Self {
        let elapsed = timer.elapsed();
        Self {
            started_at,
            elapsed,
            counters: counters.clone(),
            throughput_bytes_per_sec: average_throughput(counters.bytes_written, elapsed.as_secs()),
            workers,
            chunk_size_hex,
            stage_times: timer.stage_times.clone(),
            output_path: None,
        }
    }

    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    pub fn bytes_written(&self) -> u64 {
        self.counters.bytes_written
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    /// Stage timings cannot exceed wall time.
    pub fn sanity_check(&self) -> bool {
        self.counters.digits_decoded == 2 * self.counters.bytes_written
            && self.stage_times.total() <= self.elapsed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
