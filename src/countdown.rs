//! Countdown timer emitting discrete tick events.
//!
//! The countdown runs on its own thread and publishes events over a
//! channel, so the round can be abandoned mid-countdown without stalling
//! anything on a blocking sleep.
//! Exactly `ticks` tick values are emitted in strict descending order,
//! followed by a single `Go`, unless the countdown is cancelled first.

use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One observable countdown update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// A numbered tick, descending from the configured tick count to 1
    Tick(u32),
    /// The countdown finished; the round starts now
    Go,
}

/// Handle to a running countdown
pub struct CountdownHandle {
    events: Receiver<CountdownEvent>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    /// Wait for the next event, up to `timeout`.
    ///
    /// Returns `None` once the countdown has finished, been cancelled, or
    /// the timeout elapsed.
    pub fn next_event(&self, timeout: Duration) -> Option<CountdownEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Cancel the countdown; no further events will be emitted
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the countdown was cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Start a countdown of `ticks` steps with the given interval between them.
///
/// The first tick is emitted immediately; `Go` follows one interval after
/// the final tick.
#[must_use]
pub fn start_countdown(ticks: u32, interval: Duration) -> CountdownHandle {
    let (sender, events) = mpsc::channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    let worker = thread::spawn(move || {
        for value in (1..=ticks).rev() {
            if flag.load(Ordering::SeqCst) {
                debug!("countdown cancelled at tick {value}");
                return;
            }
            if sender.send(CountdownEvent::Tick(value)).is_err() {
                return;
            }
            thread::sleep(interval);
        }
        if !flag.load(Ordering::SeqCst) {
            let _ = sender.send(CountdownEvent::Go);
        }
    });

    CountdownHandle {
        events,
        cancelled,
        worker: Some(worker),
    }
}
