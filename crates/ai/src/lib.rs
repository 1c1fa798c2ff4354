//! Umbrella crate that re-exports the `ai-*` building blocks.
//!
//! - `core`: tick context, agent ids, blackboard, timers, deterministic RNG
//! - `nav`: voxel store boundary, motion models, goal regions, weighted A*
//! - `task`: per-agent task scheduling with preemption, retry and lockout
//! - `tools`: trace events emitted through the blackboard

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use ai_tools as tools;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use ai_nav as nav;

#[cfg(feature = "task")]
#[cfg_attr(docsrs, doc(cfg(feature = "task")))]
pub use ai_task as task;
