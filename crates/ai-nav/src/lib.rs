//! Voxel navigation: capability-gated motion, goal regions and budgeted weighted A*.
//!
//! The crate reads the world only through [`VoxelView`] and writes nothing; moving an agent is
//! reported as an intent through [`NavWorldMut::apply_move`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod cell;
pub mod follow;
pub mod goal;
pub mod math;
pub mod motion;
pub mod path;
pub mod planner;
pub mod voxel;
pub mod worker;
pub mod world;

pub use agent::{NavAgent, Position};
pub use cell::{Bounds, Cell};
pub use follow::PathFollower;
pub use goal::{AdjacentGoal, CellGoal, EdgeGoal, GoalRegion};
pub use math::Vec3;
pub use motion::{
    Capabilities, MotionConfig, MotionError, MotionModel, MoveAction, MoveKind, MoveStats,
    BLOCKED_PENALTY,
};
pub use path::NavPath;
pub use planner::{find_path, PathPlanner, PlanError, PlannerConfig, SearchStats};
pub use voxel::{
    FactionId, InteractiveObject, ObjectId, ObjectKind, Relationship, VoxelGrid, VoxelView,
    MAX_LIQUID_LEVEL, SUBMERGED_LEVEL,
};
pub use worker::{PlanPoll, PlanResult, PlanTicket, PlanWorker, VoxelSnapshot};
pub use world::{NavWorldMut, NavWorldView};
