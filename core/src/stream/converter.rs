//! stream/converter.rs
//! The streaming state machine: read → validate → accumulate → decode → write.
//!
//! Single control thread. Only the decode step fans out, and it joins before
//! the write, so chunk N+1 is never decoded before chunk N is on disk.

use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::cancel::{CancelSource, NeverCancel};
use crate::codec::{strip_and_validate, ParallelHexDecoder};
use crate::config::ConvertConfig;
use crate::constants::READ_BUFFER_SIZE;
use crate::progress::{NullProgress, ProgressEvent, ProgressSink};
use crate::stream::io::{open_input, open_output, HexLineReader, LinePiece};
use crate::stream::parallelism::ParallelismProfile;
use crate::stream::session::{crossed_step, ConversionSession, SessionState};
use crate::telemetry::{ConversionReport, Stage};
use crate::types::ConvertError;

/// How a session that did not fail ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Completed(ConversionReport),
    /// User-requested stop. Output holds every chunk written so far.
    Cancelled(ConversionReport),
}

impl ConversionOutcome {
    pub fn report(&self) -> &ConversionReport {
        match self {
            ConversionOutcome::Completed(r) | ConversionOutcome::Cancelled(r) => r,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ConversionOutcome::Completed(_))
    }
}

pub struct StreamingConverter<C = NeverCancel, P = NullProgress> {
    config: ConvertConfig,
    profile: ParallelismProfile,
    decoder: ParallelHexDecoder,
    cancel: C,
    progress: P,
}

impl StreamingConverter<NeverCancel, NullProgress> {
    pub fn new(config: ConvertConfig) -> Result<Self, ConvertError> {
        Self::with_parts(config, NeverCancel, NullProgress)
    }
}

impl<C: CancelSource, P: ProgressSink> StreamingConverter<C, P> {
    pub fn with_parts(config: ConvertConfig, cancel: C, progress: P) -> Result<Self, ConvertError> {
        config.validate()?;
        let profile = ParallelismProfile::from_config(&config);
        let decoder = ParallelHexDecoder::new(profile.worker_count);
        Ok(Self {
            config,
            profile,
            decoder,
            cancel,
            progress,
        })
    }

    pub fn with_cancel<C2: CancelSource>(self, cancel: C2) -> StreamingConverter<C2, P> {
        StreamingConverter {
            config: self.config,
            profile: self.profile,
            decoder: self.decoder,
            cancel,
            progress: self.progress,
        }
    }

    pub fn with_progress<P2: ProgressSink>(self, progress: P2) -> StreamingConverter<C, P2> {
        StreamingConverter {
            config: self.config,
            profile: self.profile,
            decoder: self.decoder,
            cancel: self.cancel,
            progress,
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.decoder.workers()
    }

    pub fn into_parts(self) -> (C, P) {
        (self.cancel, self.progress)
    }

    /// Convert `input` into `output` on disk.
    ///
    /// Preflight failures (missing/unopenable input, unopenable output) leave
    /// no output behind; later failures leave the partial file in place.
    pub fn run(&mut self, input: &Path, output: &Path) -> Result<ConversionOutcome, ConvertError> {
        debug!("Checking if input file exists: {}", input.display());
        let reader = open_input(input)?;
        debug!("Input hex file opened: {}", input.display());

        let writer = open_output(output)?;
        debug!("Output file opened: {}", output.display());

        if self.config.verbosity.is_debug() {
            super::core::log_disk_space(output);
        }

        let absolute = std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf());
        self.convert_inner(reader, writer, Some(absolute))
    }

    /// Convert an arbitrary hex text stream into `writer`.
    pub fn convert<R: Read, W: Write>(&mut self, reader: R, writer: W) -> Result<ConversionOutcome, ConvertError> {
        self.convert_inner(reader, writer, None)
    }

    fn convert_inner<R: Read, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
        output_path: Option<PathBuf>,
    ) -> Result<ConversionOutcome, ConvertError> {
        let mut session = ConversionSession::new(self.config.chunk_size_hex);

        debug!(
            "workers={}, chunk_size_hex={}, peak_buffer_bytes={}",
            self.profile.worker_count,
            self.profile.chunk_size_hex,
            self.profile.peak_buffer_bytes()
        );
        self.progress.report(ProgressEvent::Started {
            workers: self.workers(),
            chunk_size_hex: self.config.chunk_size_hex,
        });

        match self.drive(&mut session, reader, &mut writer) {
            Ok(Some(())) => {
                let mut report = session.report(self.workers());
                report.output_path = output_path;
                session.transition(SessionState::Done);

                let written = report.bytes_written();
                self.progress.report(ProgressEvent::Bar { current: written, total: written });
                self.progress.report(ProgressEvent::Completed(report.clone()));
                debug!("Final written byte count: {written}");
                Ok(ConversionOutcome::Completed(report))
            }
            Ok(None) => {
                let mut report = session.report(self.workers());
                report.output_path = output_path;
                session.transition(SessionState::Cancelled);

                info!("conversion cancelled after {} bytes", report.bytes_written());
                self.progress.report(ProgressEvent::Cancelled(report.clone()));
                Ok(ConversionOutcome::Cancelled(report))
            }
            Err(e) => {
                session.transition(SessionState::Failed);
                error!("conversion failed in state {}: {e}", session.state());
                Err(e)
            }
        }
    }

    /// `Ok(Some(()))` when the input was fully converted, `Ok(None)` on cancel.
    fn drive<R: Read, W: Write>(
        &mut self,
        session: &mut ConversionSession,
        reader: R,
        writer: &mut W,
    ) -> Result<Option<()>, ConvertError> {
        let chunk = self.config.chunk_size_hex;
        let mut lines = HexLineReader::new(
            BufReader::with_capacity(READ_BUFFER_SIZE, reader),
            self.config.piece_limit(),
        );
        let mut raw = Vec::new();

        session.transition(SessionState::Reading);
        loop {
            let piece = session
                .timer
                .time(Stage::Read, || lines.next_piece(&mut raw))
                .map_err(|source| ConvertError::ReadFailure { source })?;
            let Some(piece) = piece else { break };

            self.absorb(session, &raw, piece)?;

            while session.has_full_chunk() {
                session.transition(SessionState::Decoding);
                let before = session.counters.bytes_written;
                self.write_chunk(session, chunk, writer)?;

                if self.cancel.poll_cancellation() {
                    return Ok(None);
                }
                self.emit_progress(session, before);
                session.transition(SessionState::Reading);
            }
        }

        session.transition(SessionState::Flushing);
        let pending = session.buffer.len();
        if pending % 2 != 0 {
            debug!("Hex buffer leftover: {pending} digit(s)");
            return Err(ConvertError::TruncatedInput { pending });
        }
        if pending > 0 {
            self.write_chunk(session, pending, writer)?;
        }
        writer.flush().map_err(|source| ConvertError::WriteFailure { source })?;

        Ok(Some(()))
    }

    /// Validate one raw piece and append its digits to the buffer.
    fn absorb(&self, session: &mut ConversionSession, raw: &[u8], piece: LinePiece) -> Result<(), ConvertError> {
        let buffer = &mut session.buffer;
        let res = session.timer.time(Stage::Validate, || strip_and_validate(raw, buffer));

        match res {
            Ok(digits) => {
                session.counters.add_piece(digits, piece.column == 1);
                if self.config.verbosity.is_debug() {
                    debug!("Hex buffer size after append: {}", session.buffer.len());
                }
                Ok(())
            }
            Err(invalid) => {
                debug!("Invalid hex character detected: {:?} (0x{:02x})", invalid.found(), invalid.byte);
                Err(ConvertError::InvalidInputFormat {
                    line: piece.line,
                    column: piece.column + invalid.offset as u64,
                    found: invalid.found(),
                    byte: invalid.byte,
                })
            }
        }
    }

    /// Decode the first `len` buffered digits, write them, then drop them from the buffer.
    fn write_chunk<W: Write>(&self, session: &mut ConversionSession, len: usize, writer: &mut W) -> Result<(), ConvertError> {
        let decoder = &self.decoder;
        let hex_chunk = &session.buffer[..len];
        let decoded = session.timer.time(Stage::Decode, || decoder.decode(hex_chunk))?;

        session
            .timer
            .time(Stage::Write, || writer.write_all(&decoded))
            .map_err(|source| ConvertError::WriteFailure { source })?;

        session.buffer.drain(..len);
        session.counters.add_chunk(decoded.len());
        Ok(())
    }

    fn emit_progress(&mut self, session: &mut ConversionSession, before: u64) {
        if let Some(snapshot) = session.status_due() {
            self.progress.report(ProgressEvent::Status(snapshot));
        }

        let now = session.counters.bytes_written;
        if crossed_step(before, now, self.config.progress_step) {
            self.progress.report(ProgressEvent::Bar {
                current: now,
                total: session.estimated_total(),
            });
            debug!("Written bytes so far: {now}");
        }
    }
}
