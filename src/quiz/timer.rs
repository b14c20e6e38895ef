//! Cancellable cooperative timers
//!
//! Timers never run on their own; the owning session advances them by the
//! elapsed time and fires whatever came due.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A one-shot or repeating timer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Time until the next firing (`None` = not armed)
    remaining: Option<Duration>,
    /// Re-arm interval for repeating timers
    period: Option<Duration>,
}

impl Timer {
    /// Fire once after `delay`
    pub fn schedule_once(&mut self, delay: Duration) {
        self.remaining = Some(delay);
        self.period = None;
    }

    /// Fire every `period`, first after one full period
    ///
    /// A zero period is raised to one nanosecond so `advance` always makes
    /// progress.
    pub fn schedule_repeating(&mut self, period: Duration) {
        let period = period.max(Duration::from_nanos(1));
        self.remaining = Some(period);
        self.period = Some(period);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
        self.period = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Time until the next firing
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Let `dt` pass without firing
    pub fn elapse(&mut self, dt: Duration) {
        if let Some(r) = self.remaining.as_mut() {
            *r = r.saturating_sub(dt);
        }
    }

    /// Consume a due firing; repeating timers re-arm
    pub fn take_due(&mut self) -> bool {
        if self.remaining != Some(Duration::ZERO) {
            return false;
        }
        self.remaining = self.period;
        true
    }
}
