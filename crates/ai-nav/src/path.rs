#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Cell, MotionModel, MoveAction, VoxelView};

/// An ordered chain of moves: each action's destination is the next action's origin.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub actions: Vec<MoveAction>,
}

impl NavPath {
    pub fn new(actions: Vec<MoveAction>) -> Self {
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn origin(&self) -> Option<Cell> {
        self.actions.first().map(|a| a.origin)
    }

    pub fn destination(&self) -> Option<Cell> {
        self.actions.last().map(|a| a.destination)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveAction> {
        self.actions.iter()
    }

    /// Sum of planner edge costs along the path, against the given snapshot.
    pub fn total_cost(&self, motion: &MotionModel, voxels: &dyn VoxelView) -> f32 {
        self.actions
            .iter()
            .map(|a| a.edge_cost(motion, voxels))
            .sum()
    }

    /// True when consecutive actions share endpoints.
    pub fn is_connected(&self) -> bool {
        self.actions
            .windows(2)
            .all(|w| w[0].destination == w[1].origin)
    }
}
