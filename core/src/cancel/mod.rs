//! Cooperative cancellation.
//!
//! The converter polls a [`CancelSource`] at chunk boundaries only; it is
//! never preempted mid-decode or mid-write.

pub mod types;
pub mod keys;

pub use types::{
    CancelSource,
    CancelToken,
    NeverCancel,
};
pub use keys::{
    spawn_stdin_keys,
    KeyGestureWatcher,
};
