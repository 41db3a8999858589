//! Hex text codec for the streaming converter.
//!
//! Responsibilities:
//! - Classify characters as hex digits / whitespace
//! - Decode validated digit pairs into bytes across a worker pool
//!
//! Non-responsibilities:
//! - IO
//! - Progress reporting

pub mod validate;
pub mod decode;

pub use validate::{
    is_hex_digit,
    is_hex_byte,
    is_space,
    strip_and_validate,
    InvalidDigit,
};
pub use decode::{
    decode_parallel,
    partition,
    DecodeError,
    ParallelHexDecoder,
};
