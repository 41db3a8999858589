//! stream/core.rs
//! Stable public API over the streaming converter.

use std::io::Cursor;
use std::path::Path;

use sysinfo::Disks;
use tracing::{debug, error};

use crate::cancel::{CancelSource, NeverCancel};
use crate::config::ConvertConfig;
use crate::progress::{format_byte_size, NullProgress, ProgressSink};
use crate::stream::converter::{ConversionOutcome, StreamingConverter};
use crate::stream::io::{SharedBuffer, SharedBufferWriter};
use crate::stream::parallelism::ParallelismProfile;
use crate::types::ConvertError;

/// Convert one file with explicit cancellation and progress collaborators.
pub fn convert_file<C, P>(
    input: &Path,
    output: &Path,
    config: ConvertConfig,
    cancel: C,
    progress: P,
) -> Result<ConversionOutcome, ConvertError>
where
    C: CancelSource,
    P: ProgressSink,
{
    StreamingConverter::with_parts(config, cancel, progress)?.run(input, output)
}

/// Boolean boundary for front ends: `true` only for a completed conversion.
///
/// Failures are logged at error level naming the failure; a cancellation is
/// reported by the progress sink. Both yield `false`. Callers that need the
/// error itself use [`convert_file`].
pub fn run<C, P>(input: &Path, output: &Path, config: ConvertConfig, cancel: C, progress: P) -> bool
where
    C: CancelSource,
    P: ProgressSink,
{
    match convert_file(input, output, config, cancel, progress) {
        Ok(outcome) => outcome.is_completed(),
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            false
        }
    }
}

/// Convert an in-memory hex text. No cancellation, no progress.
pub fn convert_bytes(hex_text: &[u8], config: ConvertConfig) -> Result<Vec<u8>, ConvertError> {
    let buf = SharedBuffer::default();
    let writer = SharedBufferWriter::new(buf.clone());

    let mut converter = StreamingConverter::with_parts(config, NeverCancel, NullProgress)?;
    converter.convert(Cursor::new(hex_text), writer)?;

    let out = buf
        .lock()
        .map(|guard| guard.clone())
        .map_err(|_| ConvertError::WriteFailure {
            source: std::io::Error::other("shared output buffer poisoned"),
        })?;
    Ok(out)
}

/// Log space on the volume holding `path`. Probe failures are only logged.
pub fn log_disk_space(path: &Path) {
    let absolute = match std::path::absolute(path) {
        Ok(p) => p,
        Err(e) => {
            debug!("Failed to get disk space info: {e}");
            return;
        }
    };

    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .filter(|d| absolute.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len());

    match disk {
        Some(d) => {
            debug!("Disk space available: {}", format_byte_size(d.available_space()));
            debug!("Disk space capacity: {}", format_byte_size(d.total_space()));
        }
        None => debug!("Failed to get disk space info: no volume for {}", absolute.display()),
    }
    debug!(
        "Host memory available: {}",
        format_byte_size(ParallelismProfile::available_memory())
    );
}
