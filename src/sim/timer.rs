//! Scheduled tasks on the simulation clock
//!
//! Nothing here reads wall time. The session owns a monotonic millisecond
//! clock and polls tasks against it, so tests can drive time explicitly.

use serde::{Deserialize, Serialize};

/// Monotonic simulation clock in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    now_ms: u64,
}

impl Clock {
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward by `ms`
    pub fn advance(&mut self, ms: u64) -> u64 {
        self.now_ms += ms;
        self.now_ms
    }
}

/// A task that fires once at a deadline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneShot {
    deadline: Option<u64>,
}

impl OneShot {
    /// Arm the task to fire `delay_ms` after `now`, replacing any pending deadline
    pub fn schedule(&mut self, now: u64, delay_ms: u64) {
        self.deadline = Some(now + delay_ms);
    }

    /// Disarm. Safe to call when already idle.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline
    pub fn fire(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A task that fires every `period_ms` until stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Periodic {
    period_ms: u64,
    next: Option<u64>,
}

impl Periodic {
    /// A stopped task with the given period
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next: None,
        }
    }

    /// Start (or restart) the task; first firing is one period after `now`
    pub fn start(&mut self, now: u64) {
        self.next = Some(now + self.period_ms);
    }

    /// Stop. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn period(&self) -> u64 {
        self.period_ms
    }

    /// Returns true if a period boundary was crossed since the last firing.
    ///
    /// Fires at most once per poll; missed periods are skipped rather than
    /// replayed.
    pub fn fire(&mut self, now: u64) -> bool {
        let Some(next) = self.next else {
            return false;
        };
        if now < next {
            return false;
        }
        let missed = (now - next) / self.period_ms;
        self.next = Some(next + (missed + 1) * self.period_ms);
        true
    }
}
