//! Deterministic, engine-agnostic AI kernel primitives.
//!
//! Everything here is shared by the navigation and task crates: the per-tick context, agent
//! identity, the three-way script status, typed blackboards, countdown timers and a small
//! deterministic RNG. Nothing in this crate touches process-wide state.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
pub mod blackboard;
pub mod rng;
pub mod tick;
pub mod timer;
pub mod world;

pub use action::ActionStatus;
pub use agent::{AgentHandle, AgentId};
pub use blackboard::{BbKey, Blackboard};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use timer::Timer;
pub use world::{WorldMut, WorldView};
