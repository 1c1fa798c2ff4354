use ai_core::Timer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LockoutConfig {
    /// Failures at which a task becomes locked.
    pub max_failures: u32,
    /// Initial lockout window, started when the history entry is created.
    pub lockout_seconds: f32,
    /// Multiplier applied to the window each time it expires.
    pub backoff: f32,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failures: 3,
            lockout_seconds: 30.0,
            backoff: 1.5,
        }
    }
}

/// Failure record for one task name.
///
/// The lockout timer runs from the first recorded failure. When it expires the failure count
/// drops back to zero and the next window is `backoff` times longer.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskHistory {
    failures: u32,
    lockout: Timer,
    expiries: u32,
}

impl TaskHistory {
    /// A fresh entry for a task that has just failed once.
    pub fn new(config: &LockoutConfig) -> Self {
        Self {
            failures: 1,
            lockout: Timer::once(config.lockout_seconds),
            expiries: 0,
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn lockout(&self) -> &Timer {
        &self.lockout
    }

    /// How many lockout windows have expired so far.
    pub fn expiries(&self) -> u32 {
        self.expiries
    }

    pub fn record_failure(&mut self) -> u32 {
        self.failures = self.failures.saturating_add(1);
        self.failures
    }

    /// Advance the lockout timer. Returns `true` when the window expired on this update.
    pub fn update(&mut self, dt_seconds: f32, config: &LockoutConfig) -> bool {
        self.lockout.update(dt_seconds);
        if !self.lockout.has_triggered() {
            return false;
        }
        let next = self.lockout.target_seconds() * config.backoff.max(1.0);
        self.lockout.reset(next);
        self.failures = 0;
        self.expiries += 1;
        true
    }

    pub fn is_locked(&self, config: &LockoutConfig) -> bool {
        self.failures >= config.max_failures && !self.lockout.has_triggered()
    }
}
