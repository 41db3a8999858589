
/// Hex characters accumulated before a decode+write is triggered.
/// 2 MiB of hex text decodes to 1 MiB of output. Must stay even.
pub const DEFAULT_CHUNK_SIZE_HEX: usize = 2 * 1024 * 1024; // 2 MiB

/// Max chunk size sanity bound (256 MiB of hex text).
pub const MAX_CHUNK_SIZE_HEX: usize = 256 * 1024 * 1024;

/// Coarse progress bar is re-emitted each time output crosses a multiple of this.
pub const DEFAULT_PROGRESS_STEP: u64 = 512 * 1024; // 512 KiB

/// Width of the coarse progress bar (cells between the brackets).
pub const DEFAULT_BAR_WIDTH: usize = 50;

/// Status line is padded to this many columns so `\r` overwrites cleanly.
pub const DEFAULT_STATUS_WIDTH: usize = 120;

/// Worker count used when the host reports zero or unknown parallelism.
pub const MIN_WORKERS: usize = 2;

/// Hard cap on decode workers per chunk.
pub const MAX_WORKERS: usize = 256;

/// Read buffer in front of the input stream.
pub const READ_BUFFER_SIZE: usize = 64 * 1024; // 64 KiB

/// Binary unit thresholds used by the byte-size formatters.
pub mod units {
    pub const KIB: u64 = 1 << 10;
    pub const MIB: u64 = 1 << 20;
    pub const GIB: u64 = 1 << 30;
}

/// Cancellation gesture: Tab followed by Esc.
pub mod gesture {
    use std::time::Duration;

    pub const MODIFIER_KEY: u8 = b'\t';
    pub const CANCEL_KEY: u8 = 0x1b; // ESC
    /// How long to wait for the cancel key once the modifier was seen.
    pub const WINDOW: Duration = Duration::from_millis(200);
}
