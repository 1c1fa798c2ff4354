use crate::{Bounds, Cell, VoxelView};

/// Where a path is trying to reach.
///
/// Object safe so callers can hand the planner `&dyn GoalRegion`.
pub trait GoalRegion {
    fn is_in_region(&self, cell: Cell) -> bool;

    /// Estimated remaining cost from `cell`. Must not overestimate for optimal search.
    fn heuristic(&self, cell: Cell) -> f32;

    /// Cheap precheck; `false` means the search would be pointless.
    fn is_possible(&self, voxels: &dyn VoxelView) -> bool;

    /// The cell the adjacency shortcut steps into, if the goal has one.
    fn representative_cell(&self) -> Option<Cell>;
}

impl<G: GoalRegion + ?Sized> GoalRegion for &G {
    fn is_in_region(&self, cell: Cell) -> bool {
        (**self).is_in_region(cell)
    }

    fn heuristic(&self, cell: Cell) -> f32 {
        (**self).heuristic(cell)
    }

    fn is_possible(&self, voxels: &dyn VoxelView) -> bool {
        (**self).is_possible(voxels)
    }

    fn representative_cell(&self) -> Option<Cell> {
        (**self).representative_cell()
    }
}

impl<G: GoalRegion + ?Sized> GoalRegion for Box<G> {
    fn is_in_region(&self, cell: Cell) -> bool {
        (**self).is_in_region(cell)
    }

    fn heuristic(&self, cell: Cell) -> f32 {
        (**self).heuristic(cell)
    }

    fn is_possible(&self, voxels: &dyn VoxelView) -> bool {
        (**self).is_possible(voxels)
    }

    fn representative_cell(&self) -> Option<Cell> {
        (**self).representative_cell()
    }
}

/// Reach exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellGoal(pub Cell);

impl GoalRegion for CellGoal {
    fn is_in_region(&self, cell: Cell) -> bool {
        cell == self.0
    }

    fn heuristic(&self, cell: Cell) -> f32 {
        cell.distance(self.0)
    }

    fn is_possible(&self, voxels: &dyn VoxelView) -> bool {
        voxels.contains(self.0) && voxels.is_cell_empty(self.0)
    }

    fn representative_cell(&self) -> Option<Cell> {
        Some(self.0)
    }
}

/// Stand next to a cell (face-adjacent). The target itself may be solid, e.g. a wall to dig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdjacentGoal(pub Cell);

impl GoalRegion for AdjacentGoal {
    fn is_in_region(&self, cell: Cell) -> bool {
        cell.is_axis_adjacent(self.0)
    }

    fn heuristic(&self, cell: Cell) -> f32 {
        (cell.distance(self.0) - 1.0).max(0.0)
    }

    fn is_possible(&self, voxels: &dyn VoxelView) -> bool {
        voxels.contains(self.0)
    }

    fn representative_cell(&self) -> Option<Cell> {
        Some(self.0)
    }
}

/// Reach any column on the lateral boundary of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeGoal(pub Bounds);

impl GoalRegion for EdgeGoal {
    fn is_in_region(&self, cell: Cell) -> bool {
        self.0.is_lateral_edge(cell)
    }

    fn heuristic(&self, cell: Cell) -> f32 {
        self.0.lateral_distance_to_edge(cell)
    }

    fn is_possible(&self, _voxels: &dyn VoxelView) -> bool {
        !self.0.is_empty()
    }

    fn representative_cell(&self) -> Option<Cell> {
        None
    }
}
