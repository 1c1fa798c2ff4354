use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Priority tier. Ordered: `Eventually < Low < Medium < High < Urgent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TaskPriority {
    #[default]
    Eventually,
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const LOWEST: TaskPriority = TaskPriority::Eventually;

    pub const fn name(self) -> &'static str {
        match self {
            TaskPriority::Eventually => "eventually",
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happens to a task after it fails or is preempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RetryPolicy {
    Never,
    #[default]
    Auto,
}

impl RetryPolicy {
    pub fn allows_retry(self) -> bool {
        self == RetryPolicy::Auto
    }
}
