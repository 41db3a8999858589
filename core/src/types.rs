use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::DecodeError;

/// Terminal failure of a conversion session.
///
/// Every variant except `Config` is produced inside the streaming loop at the
/// point of occurrence; nothing is retried.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input path does not resolve to an existing file. No output is created.
    #[error("hex file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("unable to open input hex file {}: {source}", path.display())]
    InputOpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to open output file {}: {source}", path.display())]
    OutputOpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A non-hex, non-whitespace character. Line and column are 1-based and
    /// refer to the raw input, before whitespace removal. `byte` is the raw
    /// input byte; `found` is U+FFFD when that byte is not ASCII.
    #[error("not a valid hex file: invalid character {found:?} (0x{byte:02x}) at line {line}, column {column}")]
    InvalidInputFormat { line: u64, column: u64, found: char, byte: u8 },

    /// Input ended with an odd number of pending hex digits.
    #[error("odd number of hex characters: {pending} digit(s) pending at end of input")]
    TruncatedInput { pending: usize },

    /// The output device rejected a write (full or failing disk).
    #[error("unable to write data to output, it may be full or corrupted: {source}")]
    WriteFailure {
        #[source]
        source: io::Error,
    },

    #[error("failed to read input: {source}")]
    ReadFailure {
        #[source]
        source: io::Error,
    },

    /// Decoder contract violation. Unreachable for validated input.
    #[error("internal decode failure: {0}")]
    Decode(#[from] DecodeError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Flat tag of a [`ConvertError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    InputOpenFailure,
    OutputOpenFailure,
    InvalidInputFormat,
    TruncatedInput,
    WriteFailure,
    ReadFailure,
    Internal,
    Config,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::InputNotFound { .. } => ErrorKind::InputNotFound,
            ConvertError::InputOpenFailure { .. } => ErrorKind::InputOpenFailure,
            ConvertError::OutputOpenFailure { .. } => ErrorKind::OutputOpenFailure,
            ConvertError::InvalidInputFormat { .. } => ErrorKind::InvalidInputFormat,
            ConvertError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            ConvertError::WriteFailure { .. } => ErrorKind::WriteFailure,
            ConvertError::ReadFailure { .. } => ErrorKind::ReadFailure,
            ConvertError::Decode(_) => ErrorKind::Internal,
            ConvertError::Config(_) => ErrorKind::Config,
        }
    }

    /// True when the output file may already hold some bytes.
    pub fn leaves_partial_output(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidInputFormat
                | ErrorKind::TruncatedInput
                | ErrorKind::WriteFailure
                | ErrorKind::ReadFailure
                | ErrorKind::Internal
        )
    }
}
