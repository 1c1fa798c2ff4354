#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Capabilities, Cell, MotionModel, Vec3};

/// Grid cell plus a sub-cell offset from the cell center.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub cell: Cell,
    pub offset: Vec3,
}

impl Position {
    pub fn at(cell: Cell) -> Self {
        Self {
            cell,
            offset: Vec3::ZERO,
        }
    }

    pub fn world_point(&self) -> Vec3 {
        self.cell.center() + self.offset
    }
}

/// The movement-facing part of an agent: identity, motion table and where it stands.
#[derive(Debug, Clone)]
pub struct NavAgent<A> {
    pub id: A,
    pub motion: MotionModel,
    pub position: Position,
    /// Cells per second before the per-kind speed multiplier.
    pub base_speed: f32,
}

impl<A> NavAgent<A> {
    pub fn new(id: A, motion: MotionModel, cell: Cell) -> Self {
        Self {
            id,
            motion,
            position: Position::at(cell),
            base_speed: 1.0,
        }
    }

    pub fn with_base_speed(mut self, base_speed: f32) -> Self {
        self.base_speed = base_speed;
        self
    }

    pub fn cell(&self) -> Cell {
        self.position.cell
    }

    pub fn capabilities(&self) -> Capabilities {
        self.motion.capabilities()
    }
}
