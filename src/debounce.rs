//! Debounced input: turns a rapidly changing value into a settled one.
//!
//! The timer is a deadline polled by the event loop rather than a spawned
//! task, so dropping or cancelling the debouncer is all it takes to make
//! sure nothing fires afterwards.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    /// Latest value passed to `update`, echoed immediately.
    raw: String,
    /// Last value published by `poll`.
    settled: String,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            raw: String::new(),
            settled: String::new(),
            deadline: None,
        }
    }

    /// Record `raw` and restart the quiet period.
    pub fn update(&mut self, raw: impl Into<String>, now: Instant) {
        self.raw = raw.into();
        self.deadline = Some(now + self.quiet);
    }

    /// Publish the pending value if the quiet period elapsed without
    /// another update. Returns `None` while waiting, when nothing is
    /// pending, or when the value equals the one already settled.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.publish()
    }

    /// Publish the pending value right away.
    pub fn flush(&mut self) -> Option<String> {
        self.deadline.take()?;
        self.publish()
    }

    /// Drop the pending value without publishing it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    fn publish(&mut self) -> Option<String> {
        if self.raw == self.settled {
            return None;
        }
        self.settled = self.raw.clone();
        Some(self.settled.clone())
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn settled(&self) -> &str {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending value will settle, for sizing the event loop wait.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}
