use std::io::{self, Stdout, Write};

use crate::constants::{DEFAULT_BAR_WIDTH, DEFAULT_STATUS_WIDTH};
use crate::progress::format::{format_bar_line, format_status_line, format_summary};
use crate::telemetry::{ConversionReport, ProgressSnapshot};

/// Everything the converter tells the status channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started { workers: usize, chunk_size_hex: usize },
    /// Throttled to at most one per elapsed second.
    Status(ProgressSnapshot),
    /// Coarse bar: bytes so far vs. current best estimate of the total.
    Bar { current: u64, total: u64 },
    Completed(ConversionReport),
    Cancelled(ConversionReport),
}

pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent);
}

impl<P: ProgressSink + ?Sized> ProgressSink for &mut P {
    fn report(&mut self, event: ProgressEvent) {
        (**self).report(event)
    }
}

impl<P: ProgressSink + ?Sized> ProgressSink for Box<P> {
    fn report(&mut self, event: ProgressEvent) {
        (**self).report(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _event: ProgressEvent) {}
}

/// Renders events as human-readable lines, overwriting the live line with `\r`.
pub struct ConsoleProgress<W: Write = Stdout> {
    out: W,
    status_width: usize,
    bar_width: usize,
}

impl ConsoleProgress<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            status_width: DEFAULT_STATUS_WIDTH,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    pub fn with_widths(mut self, status_width: usize, bar_width: usize) -> Self {
        self.status_width = status_width;
        self.bar_width = bar_width;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, event: ProgressEvent) -> io::Result<()> {
        match event {
            ProgressEvent::Started { workers, .. } => {
                writeln!(self.out, "Starting to convert file...")?;
                writeln!(self.out, "Press Tab + Esc to cancel.\n")?;
                writeln!(self.out, "Total number of CPU cores: {workers}")?;
            }
            ProgressEvent::Status(snapshot) => {
                write!(self.out, "\r{}", format_status_line(&snapshot, self.status_width))?;
            }
            ProgressEvent::Bar { current, total } => {
                write!(self.out, "\r{}", format_bar_line(current, total, self.bar_width))?;
            }
            ProgressEvent::Completed(report) => {
                writeln!(self.out)?;
                for line in format_summary(&report) {
                    writeln!(self.out, "{line}")?;
                }
            }
            ProgressEvent::Cancelled(_) => {
                writeln!(self.out, "\nExiting conversion as requested by user (Tab + Esc).\n")?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn report(&mut self, event: ProgressEvent) {
        // Status output is best effort.
        if let Err(e) = self.render(event) {
            tracing::debug!("status output failed: {e}");
        }
    }
}
