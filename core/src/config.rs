//! config.rs
//! Session configuration threaded through the converter.
//!
//! Replaces ambient global flags: verbosity, chunk threshold and worker count
//! are plain values owned by the session, so runs are deterministic in tests.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BAR_WIDTH, DEFAULT_CHUNK_SIZE_HEX, DEFAULT_PROGRESS_STEP, DEFAULT_STATUS_WIDTH,
    MAX_CHUNK_SIZE_HEX, MAX_WORKERS,
};
use crate::types::ConvertError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Debug,
}

impl Verbosity {
    pub fn is_debug(self) -> bool {
        matches!(self, Verbosity::Debug)
    }

    pub fn is_quiet(self) -> bool {
        matches!(self, Verbosity::Quiet)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Hex characters per decode+write unit. Must be even and non-zero.
    pub chunk_size_hex: usize,

    /// Decode workers per chunk.
    /// - `None` → detected from host parallelism.
    /// - `Some(n)` → exactly `n` (1..=MAX_WORKERS).
    pub workers: Option<usize>,

    /// Coarse progress bar granularity in output bytes.
    pub progress_step: u64,

    /// Columns the status line is padded to.
    pub status_width: usize,

    /// Cells in the coarse progress bar.
    pub bar_width: usize,

    pub verbosity: Verbosity,

    /// Upper bound on raw bytes of one physical line held at once.
    /// - `None` → same as `chunk_size_hex`.
    pub read_piece_limit: Option<usize>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            chunk_size_hex: DEFAULT_CHUNK_SIZE_HEX,
            workers: None,
            progress_step: DEFAULT_PROGRESS_STEP,
            status_width: DEFAULT_STATUS_WIDTH,
            bar_width: DEFAULT_BAR_WIDTH,
            verbosity: Verbosity::Normal,
            read_piece_limit: None,
        }
    }
}

impl ConvertConfig {
    pub fn with_chunk_size(mut self, chunk_size_hex: usize) -> Self {
        self.chunk_size_hex = chunk_size_hex;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_read_piece_limit(mut self, limit: usize) -> Self {
        self.read_piece_limit = Some(limit);
        self
    }

    pub fn piece_limit(&self) -> usize {
        self.read_piece_limit.unwrap_or(self.chunk_size_hex)
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.chunk_size_hex == 0 || self.chunk_size_hex % 2 != 0 {
            return Err(ConvertError::Config(format!(
                "chunk size must be a non-zero even number of hex characters, got {}",
                self.chunk_size_hex
            )));
        }
        if self.chunk_size_hex > MAX_CHUNK_SIZE_HEX {
            return Err(ConvertError::Config(format!(
                "chunk size {} exceeds maximum {}",
                self.chunk_size_hex, MAX_CHUNK_SIZE_HEX
            )));
        }
        if let Some(w) = self.workers {
            if w == 0 || w > MAX_WORKERS {
                return Err(ConvertError::Config(format!(
                    "invalid workers count: {w}, must be within 1..={MAX_WORKERS}"
                )));
            }
        }
        if self.progress_step == 0 {
            return Err(ConvertError::Config("progress step must be non-zero".into()));
        }
        if self.read_piece_limit == Some(0) {
            return Err(ConvertError::Config("read piece limit must be non-zero".into()));
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConvertError> {
        let config: ConvertConfig = serde_json::from_str(raw)
            .map_err(|e| ConvertError::Config(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("unable to read config {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }
}
