//! cancel/keys.rs
//! Two-key exit gesture (Tab, then Esc within a short window).
//!
//! Keystrokes arrive as raw bytes over a crossbeam channel. The stdin feeder
//! reads whatever the terminal delivers; in cooked mode that is after Enter,
//! so `Tab Esc Enter` is the portable form of the gesture.

use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError};

use crate::cancel::CancelSource;
use crate::constants::gesture;

pub struct KeyGestureWatcher {
    keys: Receiver<u8>,
    modifier: u8,
    cancel_key: u8,
    window: Duration,
}

impl KeyGestureWatcher {
    pub fn new(keys: Receiver<u8>) -> Self {
        Self {
            keys,
            modifier: gesture::MODIFIER_KEY,
            cancel_key: gesture::CANCEL_KEY,
            window: gesture::WINDOW,
        }
    }

    pub fn with_keys(mut self, modifier: u8, cancel_key: u8) -> Self {
        self.modifier = modifier;
        self.cancel_key = cancel_key;
        self
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Watcher fed by a background thread reading the process's stdin.
    pub fn stdin() -> Self {
        Self::new(spawn_stdin_keys())
    }
}

impl CancelSource for KeyGestureWatcher {
    /// Drains every buffered key. A modifier waits up to `window` for the
    /// cancel key; any other follow-up key is discarded and draining resumes.
    fn poll_cancellation(&mut self) -> bool {
        while let Ok(key) = self.keys.try_recv() {
            if key != self.modifier {
                continue;
            }
            match self.keys.recv_timeout(self.window) {
                Ok(next) if next == self.cancel_key => return true,
                Ok(_) | Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        false
    }
}

/// Spawn a detached thread forwarding stdin bytes. Ends on EOF or read error.
pub fn spawn_stdin_keys() -> Receiver<u8> {
    let (tx, rx) = unbounded::<u8>();

    thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut buf = [0u8; 64];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if buf[..n].iter().any(|&b| tx.send(b).is_err()) {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!("stdin key reader stopped: {e}");
                    break;
                }
            }
        }
    });

    rx
}
