use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Vec3;

/// Integer voxel coordinate. `y` is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    /// The six face neighbors, in a fixed order: -x, +x, -y, +y, -z, +z.
    pub const AXIS_OFFSETS: [(i32, i32, i32); 6] = [
        (-1, 0, 0),
        (1, 0, 0),
        (0, -1, 0),
        (0, 1, 0),
        (0, 0, -1),
        (0, 0, 1),
    ];

    /// Lateral (same height) orthogonal offsets as `(dx, dz)`.
    pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

    /// Lateral diagonal offsets as `(dx, dz)`.
    pub const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub const fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    pub const fn down(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The eight lateral neighbors: orthogonals first, then diagonals.
    pub fn lateral_neighbors(self) -> impl Iterator<Item = Cell> {
        Self::ORTHOGONAL
            .into_iter()
            .chain(Self::DIAGONAL)
            .map(move |(dx, dz)| self.offset(dx, 0, dz))
    }

    pub fn axis_neighbors(self) -> impl Iterator<Item = Cell> {
        Self::AXIS_OFFSETS
            .into_iter()
            .map(move |(dx, dy, dz)| self.offset(dx, dy, dz))
    }

    /// All 26 cells of the surrounding 3x3x3 block, excluding `self`.
    pub fn ring(self) -> impl Iterator<Item = Cell> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).flat_map(move |dz| {
                (-1..=1).filter_map(move |dx| {
                    if dx == 0 && dy == 0 && dz == 0 {
                        None
                    } else {
                        Some(self.offset(dx, dy, dz))
                    }
                })
            })
        })
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    pub fn distance_squared(self, other: Cell) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        let dz = (self.z - other.z) as f32;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(self, other: Cell) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn is_axis_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// Center of the cell in world units (one unit per voxel).
    pub fn center(self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// World extents: cells with `0 <= x < width`, `0 <= y < height`, `0 <= z < depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Bounds {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn volume(self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    pub fn is_empty(self) -> bool {
        self.volume() == 0
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.z >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height
            && (cell.z as u32) < self.depth
    }

    /// Row-major index (`x` fastest, then `z`, then `y`).
    pub fn index(self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let w = self.width as usize;
        let d = self.depth as usize;
        Some((cell.y as usize * d + cell.z as usize) * w + cell.x as usize)
    }

    /// True when the cell is in bounds and touches one of the four lateral world faces.
    pub fn is_lateral_edge(self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == 0
                || cell.z == 0
                || cell.x as u32 == self.width - 1
                || cell.z as u32 == self.depth - 1)
    }

    /// Lateral steps from `cell` to the nearest edge column (0 on the edge).
    pub fn lateral_distance_to_edge(self, cell: Cell) -> f32 {
        let to_x = cell.x.min(self.width as i32 - 1 - cell.x).max(0);
        let to_z = cell.z.min(self.depth as i32 - 1 - cell.z).max(0);
        to_x.min(to_z) as f32
    }
}
