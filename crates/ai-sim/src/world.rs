use std::collections::BTreeMap;
use std::sync::Arc;

use ai_core::{AgentHandle, WorldMut, WorldView};
use ai_nav::{MoveAction, MoveKind, NavWorldMut, NavWorldView, VoxelGrid, VoxelSnapshot, VoxelView};

/// The simulated world: a voxel grid plus bookkeeping of the moves agents started.
///
/// Agents update their own positions while following paths; the world only reacts to the
/// intent. A `DestroyObstacle` move removes the barrier it targets.
#[derive(Debug, Clone)]
pub struct SimWorld {
    pub voxels: VoxelGrid,
    /// Hand out voxel snapshots so go-to scripts can plan on a worker thread.
    pub share_snapshots: bool,
    moves: BTreeMap<MoveKind, u64>,
}

impl SimWorld {
    pub fn new(voxels: VoxelGrid) -> Self {
        Self {
            voxels,
            share_snapshots: false,
            moves: BTreeMap::new(),
        }
    }

    /// Number of moves started, per kind.
    pub fn moves(&self) -> &BTreeMap<MoveKind, u64> {
        &self.moves
    }

    pub fn total_moves(&self) -> u64 {
        self.moves.values().sum()
    }
}

impl WorldView for SimWorld {
    type Agent = AgentHandle;
}

impl WorldMut for SimWorld {}

impl NavWorldView for SimWorld {
    fn voxels(&self) -> &dyn VoxelView {
        &self.voxels
    }

    fn voxel_snapshot(&self) -> Option<VoxelSnapshot> {
        if !self.share_snapshots {
            return None;
        }
        let snapshot: VoxelSnapshot = Arc::new(self.voxels.clone());
        Some(snapshot)
    }
}

impl NavWorldMut for SimWorld {
    fn apply_move(&mut self, agent: AgentHandle, action: &MoveAction, speed: f32) {
        tracing::trace!(
            %agent,
            kind = %action.kind,
            from = %action.origin,
            to = %action.destination,
            speed,
            "move started"
        );
        *self.moves.entry(action.kind).or_default() += 1;

        if action.kind == MoveKind::DestroyObstacle {
            if let Some(target) = action.interact_target {
                if let Some(object) = self.voxels.remove_object(target) {
                    tracing::debug!(%agent, object = object.id.0, at = %action.destination, "obstacle destroyed");
                }
            }
        }
    }
}
