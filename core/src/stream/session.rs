//! stream/session.rs
//! In-progress conversion state, owned and mutated only by the orchestrator.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::telemetry::{ConversionCounters, ConversionReport, ProgressSnapshot, TelemetryTimer};

/// `Idle → Reading → Decoding → Reading … → Flushing → Done`.
/// `Failed` is reachable from any active state; `Cancelled` only from `Decoding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Reading,
    Decoding,
    Flushing,
    Done,
    Failed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Done | SessionState::Failed | SessionState::Cancelled)
    }

    pub fn can_transition(self, to: SessionState) -> bool {
        use SessionState::*;
        match (self, to) {
            (Idle, Reading) => true,
            (Reading, Decoding) | (Decoding, Reading) => true,
            (Reading, Flushing) | (Flushing, Done) => true,
            (Decoding, Cancelled) => true,
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle      => "idle",
            SessionState::Reading   => "reading",
            SessionState::Decoding  => "decoding",
            SessionState::Flushing  => "flushing",
            SessionState::Done      => "done",
            SessionState::Failed    => "failed",
            SessionState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

pub struct ConversionSession {
    pub(crate) state: SessionState,
    /// Validated hex digits, in input order, not yet decoded.
    pub(crate) buffer: Vec<u8>,
    pub(crate) counters: ConversionCounters,
    pub(crate) timer: TelemetryTimer,
    pub(crate) started_at: DateTime<Utc>,
    /// Last elapsed whole second a status line was emitted for.
    pub(crate) last_reported_sec: Option<u64>,
    pub(crate) chunk_size_hex: usize,
}

impl ConversionSession {
    pub fn new(chunk_size_hex: usize) -> Self {
        Self {
            state: SessionState::Idle,
            buffer: Vec::with_capacity(chunk_size_hex),
            counters: ConversionCounters::default(),
            timer: TelemetryTimer::new(),
            started_at: Utc::now(),
            last_reported_sec: None,
            chunk_size_hex,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn counters(&self) -> &ConversionCounters {
        &self.counters
    }

    pub fn buffered_digits(&self) -> usize {
        self.buffer.len()
    }

    pub fn has_full_chunk(&self) -> bool {
        self.buffer.len() >= self.chunk_size_hex
    }

    pub(crate) fn transition(&mut self, to: SessionState) {
        if !self.state.can_transition(to) {
            warn!("unexpected session transition {} -> {}", self.state, to);
        }
        trace!("session {} -> {}", self.state, to);
        self.state = to;
    }

    /// Snapshot if the elapsed whole-second count advanced since the last one.
    pub(crate) fn status_due(&mut self) -> Option<ProgressSnapshot> {
        let elapsed = self.timer.elapsed_secs();
        if self.last_reported_sec == Some(elapsed) {
            return None;
        }
        self.last_reported_sec = Some(elapsed);
        Some(ProgressSnapshot::compute(
            self.counters.bytes_written,
            self.buffer.len() as u64,
            elapsed,
        ))
    }

    /// Estimated output total: bytes written plus half the buffered digits.
    pub fn estimated_total(&self) -> u64 {
        self.counters.bytes_written + self.buffer.len() as u64 / 2
    }

    pub(crate) fn report(&mut self, workers: usize) -> ConversionReport {
        self.timer.finish();
        ConversionReport::from(self.started_at, &self.counters, &self.timer, workers, self.chunk_size_hex)
    }
}

/// True when going from `before` to `after` bytes passes a multiple of `step`.
pub fn crossed_step(before: u64, after: u64, step: u64) -> bool {
    step > 0 && before / step != after / step
}
