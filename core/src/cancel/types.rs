use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Capability polled by the converter after each chunk write.
pub trait CancelSource {
    /// Non-blocking beyond a short bounded gesture window.
    fn poll_cancellation(&mut self) -> bool;
}

impl<C: CancelSource + ?Sized> CancelSource for &mut C {
    fn poll_cancellation(&mut self) -> bool {
        (**self).poll_cancellation()
    }
}

impl<C: CancelSource + ?Sized> CancelSource for Box<C> {
    fn poll_cancellation(&mut self) -> bool {
        (**self).poll_cancellation()
    }
}

/// Never requests cancellation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancel;

impl CancelSource for NeverCancel {
    fn poll_cancellation(&mut self) -> bool {
        false
    }
}

/// Out-of-band cancellation flag shared across threads.
#[derive(Debug, Default, Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl CancelSource for CancelToken {
    fn poll_cancellation(&mut self) -> bool {
        self.is_cancelled()
    }
}
