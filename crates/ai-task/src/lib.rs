//! Per-agent task scheduling for voxel-world agents.
//!
//! A [`TaskScheduler`] owns an agent's pending tasks, failure history and active task. Each tick it
//! preempts, garbage-collects, drives the active [`Script`] and selects new work, falling back to
//! an [`IdleBehavior`] when nothing is eligible. Scripts move agents with `ai-nav`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod history;
pub mod idle;
pub mod movement;
pub mod priority;
pub mod scheduler;
pub mod script;
pub mod task;

pub use agent::{tick_agents, Agent};
pub use history::{LockoutConfig, TaskHistory};
pub use idle::{IdleBehavior, WanderIdle};
pub use movement::{GoToScript, GreedyStepScript, WanderScript};
pub use priority::{RetryPolicy, TaskPriority};
pub use scheduler::{SchedulerConfig, TaskError, TaskScheduler, TickReport};
pub use script::{Script, Select, Sequence, WaitScript};
pub use task::{Task, TaskName};
