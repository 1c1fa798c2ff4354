#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One-shot countdown driven by `TickContext::dt`.
///
/// Once triggered it stays triggered until [`Timer::reset`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timer {
    target_seconds: f32,
    elapsed_seconds: f32,
    triggered: bool,
}

impl Timer {
    pub fn once(target_seconds: f32) -> Self {
        Self {
            target_seconds: target_seconds.max(0.0),
            elapsed_seconds: 0.0,
            triggered: false,
        }
    }

    pub fn target_seconds(&self) -> f32 {
        self.target_seconds
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_seconds
    }

    pub fn remaining_seconds(&self) -> f32 {
        (self.target_seconds - self.elapsed_seconds).max(0.0)
    }

    pub fn has_triggered(&self) -> bool {
        self.triggered
    }

    pub fn update(&mut self, dt_seconds: f32) {
        if self.triggered {
            return;
        }
        let dt = if dt_seconds.is_finite() { dt_seconds.max(0.0) } else { 0.0 };
        self.elapsed_seconds += dt;
        if self.elapsed_seconds >= self.target_seconds {
            self.triggered = true;
        }
    }

    /// Restart from zero with a new target.
    pub fn reset(&mut self, target_seconds: f32) {
        self.target_seconds = target_seconds.max(0.0);
        self.elapsed_seconds = 0.0;
        self.triggered = false;
    }
}
