use sysinfo::System;

use crate::config::ConvertConfig;
use crate::constants::{MAX_WORKERS, MIN_WORKERS};

/// Host parallelism, falling back to `MIN_WORKERS` when reported as zero.
pub fn detect_worker_count() -> usize {
    match num_cpus::get() {
        0 => MIN_WORKERS,
        n => n.min(MAX_WORKERS),
    }
}

/// Parallelism configuration for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelismProfile {
    pub worker_count: usize,
    pub chunk_size_hex: usize,
    pub piece_limit: usize,
}

impl ParallelismProfile {
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self {
            worker_count: config.workers.unwrap_or_else(detect_worker_count),
            chunk_size_hex: config.chunk_size_hex,
            piece_limit: config.piece_limit(),
        }
    }

    /// Upper bound of live buffer memory: accumulation buffer (one chunk plus
    /// one piece), the raw piece, and the decoded bytes of one chunk.
    pub fn peak_buffer_bytes(&self) -> usize {
        (self.chunk_size_hex + self.piece_limit) + self.piece_limit + self.chunk_size_hex / 2
    }

    /// Available host memory in bytes, for diagnostics only.
    pub fn available_memory() -> u64 {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.available_memory()
    }
}
