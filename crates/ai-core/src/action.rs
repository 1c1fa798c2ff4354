#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of advancing a resumable script by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActionStatus {
    Running,
    Success,
    Failure,
}

impl ActionStatus {
    pub fn is_running(self) -> bool {
        self == ActionStatus::Running
    }
}
