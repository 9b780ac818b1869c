//! Deadline-driven timers for the single-threaded event loop.
//!
//! Nothing here sleeps or spawns: the loop passes `now` in and asks what is
//! due. Dropping a `Ticker` or `Deadline` is the cancellation.

use std::time::{Duration, Instant};

/// Recurring task (elapsed-seconds counter, status clock).
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    /// First tick fires one `period` after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of ticks that came due by `now`. A loop that stalled for
    /// several periods gets all of them, so counters stay in step.
    pub fn due(&mut self, now: Instant) -> u32 {
        let mut fired = 0u32;
        while self.next_due <= now {
            fired = fired.saturating_add(1);
            self.next_due += self.period;
        }
        fired
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// One-shot task (answer delay, copied-flag reset).
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) to fire `delay` after `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.at = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    pub fn at(&self) -> Option<Instant> {
        self.at
    }

    /// True exactly once, on the first call at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}

/// Earliest of a set of optional instants; used to size the poll timeout.
pub fn earliest(instants: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    instants.into_iter().flatten().min()
}
