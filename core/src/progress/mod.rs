//! Progress reporting.
//!
//! `format` holds the pure renderers (no state, no errors). `sink` defines the
//! status channel the converter pushes events into, and the console renderer.

pub mod format;
pub mod sink;

pub use format::{
    format_bar_line,
    format_byte_size,
    format_duration,
    format_progress_bar,
    format_rate,
    format_remaining,
    format_status_line,
    format_summary,
};
pub use sink::{
    ConsoleProgress,
    NullProgress,
    ProgressEvent,
    ProgressSink,
};
