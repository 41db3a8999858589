//! hex2file-core
//!
//! Streaming conversion of hexadecimal text files into raw binary files.
//! Bounded memory, parallel chunk decoding, live progress and cooperative
//! cancellation.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

// Building blocks
pub mod codec;
pub mod telemetry;
pub mod progress;
pub mod cancel;

// Stream layer
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::cancel::{CancelSource, CancelToken, KeyGestureWatcher, NeverCancel};
    pub use crate::config::{ConvertConfig, Verbosity};
    pub use crate::progress::{ConsoleProgress, NullProgress, ProgressEvent, ProgressSink};
    pub use crate::stream::{convert_bytes, convert_file, run, ConversionOutcome, StreamingConverter};
    pub use crate::telemetry::{ConversionReport, ProgressSnapshot};
    pub use crate::types::{ConvertError, ErrorKind};
}
