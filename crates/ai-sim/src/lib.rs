//! Headless harness: load a YAML scenario, build a voxel world and its agents, run the
//! schedulers for a number of ticks and summarize what happened.

#![forbid(unsafe_code)]

pub mod runner;
pub mod scenario;
pub mod world;

pub use runner::{run, AgentSummary, RunSummary};
pub use scenario::{
    AgentSpec, LiquidSpec, ObjectSpec, RelationshipSpec, Scenario, SimConfig, TaskSpec, WorldSpec,
};
pub use world::SimWorld;
