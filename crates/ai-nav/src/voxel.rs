//! Read-only boundary to the voxel occupancy store.
//!
//! The planner and motion model only ever see a `&dyn VoxelView`; writes belong to whoever owns
//! the world. [`VoxelGrid`] is a dense in-memory implementation used by tests, benches and the
//! simulation harness.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Bounds, Cell};

/// Liquid levels above this count as submerged (levels range 0..=8).
pub const SUBMERGED_LEVEL: u8 = 5;

pub const MAX_LIQUID_LEVEL: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relationship {
    Hostile,
    Indifferent,
    Friendly,
    Loving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    /// Ladders and similar: lets a climbing agent move vertically through the cell.
    Climbable,
    /// Doors and walls owned by a faction. Only `Loving` factions pass freely.
    Barrier { owner: FactionId },
    Prop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InteractiveObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
}

impl InteractiveObject {
    pub fn new(id: ObjectId, kind: ObjectKind) -> Self {
        Self { id, kind }
    }

    pub fn is_climbable(&self) -> bool {
        matches!(self.kind, ObjectKind::Climbable)
    }
}

/// Point queries over a voxel occupancy snapshot.
///
/// Cells outside [`VoxelView::bounds`] are absent: `is_cell_empty` is false for them (so the
/// world floor gives footing), they never count as solid for lateral tests, and they are never
/// valid move destinations.
pub trait VoxelView {
    fn bounds(&self) -> Bounds;

    fn contains(&self, cell: Cell) -> bool {
        self.bounds().contains(cell)
    }

    fn is_cell_empty(&self, cell: Cell) -> bool;

    fn liquid_level(&self, cell: Cell) -> u8;

    fn objects_at(&self, cell: Cell) -> &[InteractiveObject];

    fn relationship(&self, a: FactionId, b: FactionId) -> Relationship;

    /// In bounds and not empty.
    fn is_solid(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_cell_empty(cell)
    }

    fn is_submerged(&self, cell: Cell) -> bool {
        self.liquid_level(cell) > SUBMERGED_LEVEL
    }
}

/// Dense in-memory voxel store.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    bounds: Bounds,
    solid: Vec<bool>,
    liquid: Vec<u8>,
    objects: HashMap<Cell, Vec<InteractiveObject>>,
    relationships: HashMap<(FactionId, FactionId), Relationship>,
    default_relationship: Relationship,
}

impl VoxelGrid {
    /// An all-empty world of the given size.
    pub fn new(bounds: Bounds) -> Self {
        let volume = bounds.volume();
        Self {
            bounds,
            solid: vec![false; volume],
            liquid: vec![0; volume],
            objects: HashMap::new(),
            relationships: HashMap::new(),
            default_relationship: Relationship::Indifferent,
        }
    }

    /// A world whose bottom layer (`y == 0`) is solid.
    pub fn with_floor(bounds: Bounds) -> Self {
        let mut grid = Self::new(bounds);
        for z in 0..bounds.depth as i32 {
            for x in 0..bounds.width as i32 {
                grid.set_solid(Cell::new(x, 0, z), true);
            }
        }
        grid
    }

    pub fn set_solid(&mut self, cell: Cell, solid: bool) {
        if let Some(idx) = self.bounds.index(cell) {
            self.solid[idx] = solid;
        }
    }

    /// Set a liquid level, clamped to [`MAX_LIQUID_LEVEL`].
    pub fn set_liquid(&mut self, cell: Cell, level: u8) {
        if let Some(idx) = self.bounds.index(cell) {
            self.liquid[idx] = level.min(MAX_LIQUID_LEVEL);
        }
    }

    /// Place an object; ignored outside the world.
    pub fn add_object(&mut self, cell: Cell, object: InteractiveObject) {
        if self.bounds.contains(cell) {
            self.objects.entry(cell).or_default().push(object);
        }
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Option<InteractiveObject> {
        let mut removed = None;
        self.objects.retain(|_, objects| {
            if let Some(pos) = objects.iter().position(|o| o.id == id) {
                removed = Some(objects.remove(pos));
            }
            !objects.is_empty()
        });
        removed
    }

    /// Set the relationship between two factions in both directions.
    pub fn set_relationship(&mut self, a: FactionId, b: FactionId, relationship: Relationship) {
        self.relationships.insert((a, b), relationship);
        self.relationships.insert((b, a), relationship);
    }

    pub fn set_default_relationship(&mut self, relationship: Relationship) {
        self.default_relationship = relationship;
    }
}

impl VoxelView for VoxelGrid {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn is_cell_empty(&self, cell: Cell) -> bool {
        self.bounds
            .index(cell)
            .map(|idx| !self.solid[idx])
            .unwrap_or(false)
    }

    fn liquid_level(&self, cell: Cell) -> u8 {
        self.bounds
            .index(cell)
            .map(|idx| self.liquid[idx])
            .unwrap_or(0)
    }

    fn objects_at(&self, cell: Cell) -> &[InteractiveObject] {
        self.objects.get(&cell).map_or(&[], Vec::as_slice)
    }

    fn relationship(&self, a: FactionId, b: FactionId) -> Relationship {
        if a == b {
            return Relationship::Loving;
        }
        self.relationships
            .get(&(a, b))
            .copied()
            .unwrap_or(self.default_relationship)
    }
}
