//! telemetry/counters.rs
//! Mutable counters used during a conversion session.
//!
//! Summary: collects line, digit, chunk and byte counts while streaming.
//! Converted into a `ConversionReport` at session end.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionCounters {
    /// Physical lines read from the input.
    pub lines_read: u64,
    /// Hex digits that passed validation and entered the buffer.
    pub digits_accepted: u64,
    /// Hex digits decoded and written. Always `2 * bytes_written`.
    pub digits_decoded: u64,
    /// Decode+write units, final flush included.
    pub chunks_written: u64,
    pub bytes_written: u64,
}

impl ConversionCounters {
    /// Record one validated piece of a line. Long lines arrive in several pieces;
    /// only the first one counts as a new line.
    pub fn add_piece(&mut self, digits: usize, starts_line: bool) {
        if starts_line {
            self.lines_read += 1;
        }
        self.digits_accepted += digits as u64;
    }

    /// Record one chunk written to the output.
    pub fn add_chunk(&mut self, bytes: usize) {
        self.chunks_written += 1;
        self.bytes_written += bytes as u64;
        self.digits_decoded += 2 * bytes as u64;
    }

    /// Digits accepted but not yet decoded.
    pub fn digits_pending(&self) -> u64 {
        self.digits_accepted - self.digits_decoded
    }

    pub fn merge(&mut self, other: &ConversionCounters) {
        self.lines_read += other.lines_read;
        self.digits_accepted += other.digits_accepted;
        self.digits_decoded += other.digits_decoded;
        self.chunks_written += other.chunks_written;
        self.bytes_written += other.bytes_written;
    }
}

impl AddAssign for ConversionCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
