use ai_core::{WorldMut, WorldView};

use crate::{MoveAction, VoxelSnapshot, VoxelView};

pub trait NavWorldView: WorldView {
    fn voxels(&self) -> &dyn VoxelView;

    /// A shareable snapshot for off-thread planning. Worlds that cannot provide one plan inline.
    fn voxel_snapshot(&self) -> Option<VoxelSnapshot> {
        None
    }
}

pub trait NavWorldMut: WorldMut + NavWorldView {
    /// Movement intent: `agent` starts performing `action` at `speed` cells per second.
    ///
    /// Consumed by whatever drives animation or physics; the agent's logical position is owned by
    /// its `NavAgent`.
    fn apply_move(&mut self, agent: Self::Agent, action: &MoveAction, speed: f32);
}
