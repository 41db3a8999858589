//! stream/io.rs
//! Normalized I/O + bounded line reader.

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::types::ConvertError;

/// In-memory output shared with the caller.
pub type SharedBuffer = Arc<Mutex<Vec<u8>>>;

/// Open the input hex file for reading.
///
/// The existence check runs first, so a missing path is reported as
/// `InputNotFound` rather than a generic open failure. Anything that is not a
/// regular file is rejected here, before the output is touched.
pub fn open_input(path: &Path) -> Result<File, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound { path: path.to_path_buf() });
    }
    let open_failure = |source| ConvertError::InputOpenFailure { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(open_failure)?;
    let meta = file.metadata().map_err(open_failure)?;
    if meta.is_dir() {
        return Err(open_failure(io::Error::other("is a directory")));
    }
    Ok(file)
}

/// Open the output file for writing. Existing files are truncated.
pub fn open_output(path: &Path) -> Result<File, ConvertError> {
    File::create(path).map_err(|source| ConvertError::OutputOpenFailure {
        path: path.to_path_buf(),
        source,
    })
}

pub struct SharedBufferWriter {
    buf: SharedBuffer,
}

impl SharedBufferWriter {
    pub fn new(buf: SharedBuffer) -> Self {
        Self { buf }
    }
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::other("shared output buffer poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ================= Line pieces =================

/// Location of one piece of a physical input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePiece {
    /// 1-based line number.
    pub line: u64,
    /// 1-based column of the first byte of the piece.
    pub column: u64,
    /// True when the piece ends with the line terminator (or is the last piece at EOF).
    pub ends_line: bool,
}

/// Yields input lines terminated by `\n`, never holding more than `limit`
/// bytes of a single line at once. Longer lines come out as several pieces
/// with increasing `column`.
pub struct HexLineReader<R: BufRead> {
    inner: R,
    limit: usize,
    line: u64,
    column: u64,
}

impl<R: BufRead> HexLineReader<R> {
    pub fn new(inner: R, limit: usize) -> Self {
        Self {
            inner,
            limit: limit.max(1),
            line: 1,
            column: 1,
        }
    }

    /// Fill `out` with the next piece. `Ok(None)` at end of input.
    pub fn next_piece(&mut self, out: &mut Vec<u8>) -> io::Result<Option<LinePiece>> {
        out.clear();
        let line = self.line;
        let column = self.column;

        loop {
            let available = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if available.is_empty() {
                if out.is_empty() {
                    return Ok(None);
                }
                self.column += out.len() as u64;
                return Ok(Some(LinePiece { line, column, ends_line: true }));
            }

            let room = self.limit - out.len();
            let window = &available[..available.len().min(room)];

            if let Some(i) = window.iter().position(|&b| b == b'\n') {
                out.extend_from_slice(&window[..=i]);
                self.inner.consume(i + 1);
                self.line += 1;
                self.column = 1;
                return Ok(Some(LinePiece { line, column, ends_line: true }));
            }

            let taken = window.len();
            out.extend_from_slice(window);
            self.inner.consume(taken);

            if out.len() >= self.limit {
                self.column += out.len() as u64;
                return Ok(Some(LinePiece { line, column, ends_line: false }));
            }
        }
    }
}
