//! codec/decode.rs
//! Data-parallel hex decoding.
//!
//! The output range `[0, n)` is split into contiguous near-equal sub-ranges,
//! one per worker. Each worker owns a disjoint `&mut` slice of the output, so
//! there is no shared mutable state and no locking. The caller blocks until
//! every worker joined.

use std::ops::Range;
use std::thread;

use bytes::Bytes;
use thiserror::Error;

use crate::stream::parallelism::detect_worker_count;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// Caller passed an odd number of hex characters (contract violation).
    #[error("hex text has odd length {len}")]
    OddLength { len: usize },

    /// `offset` is the start (in hex characters) of the worker span that failed.
    #[error("malformed digit pair in span starting at {offset}: {source}")]
    InvalidPair {
        offset: usize,
        #[source]
        source: hex::FromHexError,
    },

    #[error("decode worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

/// Split `units` into `workers` contiguous ranges.
///
/// Sizes are `units / workers`, the first `units % workers` ranges get one
/// extra unit. Ranges may be empty when `workers > units`.
pub fn partition(units: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = units / workers;
    let leftover = units % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut begin = 0;
    for t in 0..workers {
        let end = begin + base + usize::from(t < leftover);
        ranges.push(begin..end);
        begin = end;
    }
    ranges
}

fn decode_span(input: &[u8], out: &mut [u8], offset: usize) -> Result<(), DecodeError> {
    hex::decode_to_slice(input, out).map_err(|source| DecodeError::InvalidPair { offset, source })
}

/// Decode `hex_text` (even length, digits only) using up to `workers` threads.
///
/// Output byte `i` is always pair `[2i, 2i+2)` regardless of `workers`.
pub fn decode_parallel(hex_text: &[u8], workers: usize) -> Result<Vec<u8>, DecodeError> {
    if hex_text.len() % 2 != 0 {
        return Err(DecodeError::OddLength { len: hex_text.len() });
    }

    let units = hex_text.len() / 2;
    let mut out = vec![0u8; units];
    let ranges = partition(units, workers);

    // Nothing to fan out: a single non-empty span runs inline.
    if ranges.iter().filter(|r| !r.is_empty()).count() <= 1 {
        decode_span(hex_text, &mut out, 0)?;
        return Ok(out);
    }

    thread::scope(|scope| -> Result<(), DecodeError> {
        let mut rest: &mut [u8] = &mut out;
        let mut handles = Vec::with_capacity(ranges.len());

        for (worker, range) in ranges.into_iter().enumerate() {
            let (slice, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            if range.is_empty() {
                continue;
            }
            let offset = range.start * 2;
            let input = &hex_text[offset..range.end * 2];
            handles.push((worker, scope.spawn(move || decode_span(input, slice, offset))));
        }

        // Join all before reporting so no worker outlives a failed sibling unobserved.
        let mut first_err = None;
        for (worker, handle) in handles {
            let res = match handle.join() {
                Ok(res) => res,
                Err(_) => Err(DecodeError::WorkerPanicked { worker }),
            };
            if let Err(e) = res {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    })?;

    Ok(out)
}

/// Decoder bound to a fixed worker count for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct ParallelHexDecoder {
    workers: usize,
}

impl ParallelHexDecoder {
    pub fn new(workers: usize) -> Self {
        Self { workers: workers.max(1) }
    }

    /// Worker count from host parallelism (never below `MIN_WORKERS`).
    pub fn detect() -> Self {
        Self::new(detect_worker_count())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Decode one chunk. The returned bytes are handed to the writer.
    pub fn decode(&self, chunk: &[u8]) -> Result<Bytes, DecodeError> {
        decode_parallel(chunk, self.workers).map(Bytes::from)
    }
}
