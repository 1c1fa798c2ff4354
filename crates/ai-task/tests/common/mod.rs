#![allow(dead_code)]

use std::cell::Cell as Counter;
use std::rc::Rc;
use std::sync::Arc;

use ai_core::{ActionStatus, Blackboard, TickContext, WorldMut, WorldView};
use ai_nav::{
    Bounds, Cell, MoveAction, NavAgent, NavWorldMut, NavWorldView, VoxelGrid, VoxelSnapshot,
    VoxelView,
};
use ai_task::Script;

pub struct TestWorld {
    pub voxels: VoxelGrid,
    pub intents: Vec<(u32, MoveAction)>,
    pub share_snapshots: bool,
}

impl TestWorld {
    pub fn new(voxels: VoxelGrid) -> Self {
        Self {
            voxels,
            intents: Vec::new(),
            share_snapshots: false,
        }
    }

    pub fn field(size: u32) -> Self {
        Self::new(VoxelGrid::with_floor(Bounds::new(size, 3, size)))
    }

    /// Five open cells in a row at y=1.
    pub fn corridor() -> Self {
        let mut voxels = VoxelGrid::new(Bounds::new(5, 3, 1));
        for x in 0..5 {
            voxels.set_solid(Cell::new(x, 0, 0), true);
            voxels.set_solid(Cell::new(x, 2, 0), true);
        }
        Self::new(voxels)
    }
}

impl WorldView for TestWorld {
    type Agent = u32;
}

impl WorldMut for TestWorld {}

impl NavWorldView for TestWorld {
    fn voxels(&self) -> &dyn VoxelView {
        &self.voxels
    }

    fn voxel_snapshot(&self) -> Option<VoxelSnapshot> {
        self.share_snapshots
            .then(|| Arc::new(self.voxels.clone()) as VoxelSnapshot)
    }
}

impl NavWorldMut for TestWorld {
    fn apply_move(&mut self, agent: u32, action: &MoveAction, _speed: f32) {
        self.intents.push((agent, *action));
    }
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 1.0, 42)
}

/// Always succeeds.
pub struct Succeed;

impl Script<TestWorld> for Succeed {
    fn step(
        &mut self,
        _ctx: &TickContext,
        _agent: &mut NavAgent<u32>,
        _world: &mut TestWorld,
        _blackboard: &mut Blackboard,
    ) -> ActionStatus {
        ActionStatus::Success
    }
}

/// Always fails.
pub struct Fail;

impl Script<TestWorld> for Fail {
    fn step(
        &mut self,
        _ctx: &TickContext,
        _agent: &mut NavAgent<u32>,
        _world: &mut TestWorld,
        _blackboard: &mut Blackboard,
    ) -> ActionStatus {
        ActionStatus::Failure
    }
}

/// Runs until cancelled, counting steps and cancellations.
#[derive(Clone, Default)]
pub struct Forever {
    pub steps: Rc<Counter<u32>>,
    pub cancels: Rc<Counter<u32>>,
}

impl Script<TestWorld> for Forever {
    fn step(
        &mut self,
        _ctx: &TickContext,
        _agent: &mut NavAgent<u32>,
        _world: &mut TestWorld,
        _blackboard: &mut Blackboard,
    ) -> ActionStatus {
        self.steps.set(self.steps.get() + 1);
        ActionStatus::Running
    }

    fn cancel(&mut self, _ctx: &TickContext, _agent: &NavAgent<u32>, _world: &mut TestWorld) {
        self.cancels.set(self.cancels.get() + 1);
    }
}

/// Fails the first `failures` times it is stepped (across script instances), then succeeds.
pub struct FailTimes {
    pub remaining: Rc<Counter<u32>>,
}

impl Script<TestWorld> for FailTimes {
    fn step(
        &mut self,
        _ctx: &TickContext,
        _agent: &mut NavAgent<u32>,
        _world: &mut TestWorld,
        _blackboard: &mut Blackboard,
    ) -> ActionStatus {
        let left = self.remaining.get();
        if left > 0 {
            self.remaining.set(left - 1);
            ActionStatus::Failure
        } else {
            ActionStatus::Success
        }
    }
}
