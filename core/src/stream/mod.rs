//! stream: chunked hex-text to binary conversion.
//!
//! This module exposes a **stable public API** for Rust callers and the CLI.
//! Internals are strictly layered: io → session → converter → core.

pub mod io;
pub mod parallelism;
pub mod session;
pub mod converter;
pub mod core;

pub use io::{
    SharedBuffer,
    SharedBufferWriter,
};

pub use converter::{
    ConversionOutcome,
    StreamingConverter,
};

pub use self::core::{
    convert_bytes,
    convert_file,
    run,
};
