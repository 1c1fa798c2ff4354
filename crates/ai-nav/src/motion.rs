//! Per-agent movement capabilities and neighborhood successor generation.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Cell, FactionId, ObjectId, ObjectKind, Relationship, VoxelView};

/// Edge cost charged for moving into a cell that is not empty.
///
/// Successor generation never produces such moves against a fresh snapshot; the penalty only
/// matters when voxel data went stale between generation and costing.
pub const BLOCKED_PENALTY: f32 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    Walk,
    Swim,
    Climb,
    ClimbWalls,
    Jump,
    Fly,
    Fall,
    DestroyObstacle,
}

impl MoveKind {
    pub const ALL: [MoveKind; 8] = [
        MoveKind::Walk,
        MoveKind::Swim,
        MoveKind::Climb,
        MoveKind::ClimbWalls,
        MoveKind::Jump,
        MoveKind::Fly,
        MoveKind::Fall,
        MoveKind::DestroyObstacle,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            MoveKind::Walk => "walk",
            MoveKind::Swim => "swim",
            MoveKind::Climb => "climb",
            MoveKind::ClimbWalls => "climb_walls",
            MoveKind::Jump => "jump",
            MoveKind::Fly => "fly",
            MoveKind::Fall => "fall",
            MoveKind::DestroyObstacle => "destroy_obstacle",
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveStats {
    pub enabled: bool,
    pub cost: f32,
    pub speed: f32,
}

impl MoveStats {
    pub const fn new(enabled: bool, cost: f32, speed: f32) -> Self {
        Self {
            enabled,
            cost,
            speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MotionError {
    #[error("move kind `{kind}` must have a positive cost, got {cost}")]
    NonPositiveCost { kind: MoveKind, cost: f32 },
}

/// Serializable description of a [`MotionModel`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    pub walk: MoveStats,
    pub swim: MoveStats,
    pub climb: MoveStats,
    pub climb_walls: MoveStats,
    pub jump: MoveStats,
    pub fly: MoveStats,
    pub fall: MoveStats,
    pub destroy_obstacle: MoveStats,
    pub faction: FactionId,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walk: MoveStats::new(true, 1.0, 1.0),
            swim: MoveStats::new(true, 2.0, 0.5),
            climb: MoveStats::new(true, 2.0, 0.5),
            climb_walls: MoveStats::new(false, 10.0, 1.0),
            jump: MoveStats::new(true, 1.0, 1.0),
            fly: MoveStats::new(false, 1.0, 1.0),
            fall: MoveStats::new(true, 5.0, 1.0),
            destroy_obstacle: MoveStats::new(true, 30.0, 1.0),
            faction: FactionId::default(),
        }
    }
}

/// Bitset of enabled move kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    pub fn contains(self, kind: MoveKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    pub fn insert(&mut self, kind: MoveKind) {
        self.0 |= 1 << kind.index();
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = MoveKind> {
        MoveKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

/// One edge of the traversal graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveAction {
    pub origin: Cell,
    pub destination: Cell,
    pub kind: MoveKind,
    /// Set only for [`MoveKind::DestroyObstacle`]: the barrier in the way.
    pub interact_target: Option<ObjectId>,
}

impl MoveAction {
    pub fn new(origin: Cell, destination: Cell, kind: MoveKind) -> Self {
        Self {
            origin,
            destination,
            kind,
            interact_target: None,
        }
    }

    /// Planner edge weight: squared step length times the kind's cost, or [`BLOCKED_PENALTY`]
    /// when the destination is not empty.
    pub fn edge_cost(&self, motion: &MotionModel, voxels: &dyn VoxelView) -> f32 {
        if !voxels.is_cell_empty(self.destination) {
            return BLOCKED_PENALTY;
        }
        self.origin.distance_squared(self.destination) * motion.cost(self.kind)
    }
}

/// Movement table for one agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionModel {
    stats: [MoveStats; 8],
    faction: FactionId,
}

impl Default for MotionModel {
    fn default() -> Self {
        let config = MotionConfig::default();
        Self {
            stats: [
                config.walk,
                config.swim,
                config.climb,
                config.climb_walls,
                config.jump,
                config.fly,
                config.fall,
                config.destroy_obstacle,
            ],
            faction: config.faction,
        }
    }
}

impl TryFrom<MotionConfig> for MotionModel {
    type Error = MotionError;

    fn try_from(config: MotionConfig) -> Result<Self, Self::Error> {
        Self::from_config(&config)
    }
}

impl MotionModel {
    pub fn from_config(config: &MotionConfig) -> Result<Self, MotionError> {
        let stats = [
            config.walk,
            config.swim,
            config.climb,
            config.climb_walls,
            config.jump,
            config.fly,
            config.fall,
            config.destroy_obstacle,
        ];
        for kind in MoveKind::ALL {
            check_cost(kind, stats[kind.index()].cost)?;
        }
        Ok(Self {
            stats,
            faction: config.faction,
        })
    }

    /// A model with every kind disabled except `kinds`, all at cost 1 and speed 1.
    pub fn only(kinds: &[MoveKind]) -> Self {
        let mut stats = [MoveStats::new(false, 1.0, 1.0); 8];
        for kind in kinds {
            stats[kind.index()].enabled = true;
        }
        Self {
            stats,
            faction: FactionId::default(),
        }
    }

    pub fn to_config(&self) -> MotionConfig {
        let s = |kind: MoveKind| self.stats[kind.index()];
        MotionConfig {
            walk: s(MoveKind::Walk),
            swim: s(MoveKind::Swim),
            climb: s(MoveKind::Climb),
            climb_walls: s(MoveKind::ClimbWalls),
            jump: s(MoveKind::Jump),
            fly: s(MoveKind::Fly),
            fall: s(MoveKind::Fall),
            destroy_obstacle: s(MoveKind::DestroyObstacle),
            faction: self.faction,
        }
    }

    pub fn stats(&self, kind: MoveKind) -> MoveStats {
        self.stats[kind.index()]
    }

    pub fn can(&self, kind: MoveKind) -> bool {
        self.stats[kind.index()].enabled
    }

    pub fn cost(&self, kind: MoveKind) -> f32 {
        self.stats[kind.index()].cost
    }

    pub fn speed(&self, kind: MoveKind) -> f32 {
        self.stats[kind.index()].speed
    }

    pub fn set_enabled(&mut self, kind: MoveKind, enabled: bool) {
        self.stats[kind.index()].enabled = enabled;
    }

    pub fn set_cost(&mut self, kind: MoveKind, cost: f32) -> Result<(), MotionError> {
        check_cost(kind, cost)?;
        self.stats[kind.index()].cost = cost;
        Ok(())
    }

    /// Negative or NaN speeds are stored as zero.
    pub fn set_speed(&mut self, kind: MoveKind, speed: f32) {
        self.stats[kind.index()].speed = if speed > 0.0 { speed } else { 0.0 };
    }

    pub fn faction(&self) -> FactionId {
        self.faction
    }

    pub fn set_faction(&mut self, faction: FactionId) {
        self.faction = faction;
    }

    pub fn can_walk(&self) -> bool {
        self.can(MoveKind::Walk)
    }

    pub fn can_swim(&self) -> bool {
        self.can(MoveKind::Swim)
    }

    pub fn can_climb(&self) -> bool {
        self.can(MoveKind::Climb)
    }

    pub fn can_climb_walls(&self) -> bool {
        self.can(MoveKind::ClimbWalls)
    }

    pub fn can_fly(&self) -> bool {
        self.can(MoveKind::Fly)
    }

    pub fn set_can_walk(&mut self, enabled: bool) {
        self.set_enabled(MoveKind::Walk, enabled);
    }

    pub fn set_can_swim(&mut self, enabled: bool) {
        self.set_enabled(MoveKind::Swim, enabled);
    }

    pub fn set_can_climb(&mut self, enabled: bool) {
        self.set_enabled(MoveKind::Climb, enabled);
    }

    pub fn set_can_climb_walls(&mut self, enabled: bool) {
        self.set_enabled(MoveKind::ClimbWalls, enabled);
    }

    pub fn set_can_fly(&mut self, enabled: bool) {
        self.set_enabled(MoveKind::Fly, enabled);
    }

    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::default();
        for kind in MoveKind::ALL {
            if self.can(kind) {
                caps.insert(kind);
            }
        }
        caps
    }

    /// Candidate moves out of `cell`, resolved against the surrounding 3x3x3 block.
    ///
    /// Output order is deterministic for a given snapshot. Destinations are always in bounds and
    /// empty or liquid; barriers the agent may not pass are either turned into
    /// [`MoveKind::DestroyObstacle`] moves or dropped.
    pub fn generate_successors(&self, voxels: &dyn VoxelView, cell: Cell) -> Vec<MoveAction> {
        let in_water = voxels.is_submerged(cell);
        let mut standing = !voxels.is_cell_empty(cell.down());
        let top_covered = voxels.is_solid(cell.up());
        let footing_nearby = cell.lateral_neighbors().any(|n| voxels.is_solid(n));
        let swimming = in_water && self.can_swim();

        let mut out = Vec::with_capacity(16);
        let mut push = |dest: Cell, kind: MoveKind| out.push(MoveAction::new(cell, dest, kind));
        let mut climbing = false;

        if self.can_climb() && voxels.objects_at(cell).iter().any(|o| o.is_climbable()) {
            climbing = true;
            if !standing {
                push(cell.down(), MoveKind::Climb);
            }
            standing = true;
            push(cell.up(), MoveKind::Climb);
        }

        if self.can_climb_walls()
            && !top_covered
            && Cell::ORTHOGONAL
                .iter()
                .any(|&(dx, dz)| voxels.is_solid(cell.offset(dx, 0, dz)))
        {
            climbing = true;
            push(cell.up(), MoveKind::ClimbWalls);
            if !standing {
                push(cell.down(), MoveKind::ClimbWalls);
            }
        }

        if (standing && self.can_walk()) || swimming {
            let kind = if in_water {
                MoveKind::Swim
            } else {
                MoveKind::Walk
            };
            for (dx, dz) in Cell::ORTHOGONAL {
                push(cell.offset(dx, 0, dz), kind);
            }
            if !footing_nearby {
                for (dx, dz) in Cell::DIAGONAL {
                    push(cell.offset(dx, 0, dz), kind);
                }
            }
        }

        if self.can(MoveKind::Jump) && !top_covered && (standing || swimming || climbing) {
            for lateral in cell.lateral_neighbors() {
                if voxels.is_solid(lateral) {
                    push(lateral.up(), MoveKind::Jump);
                }
            }
        }

        if !standing && !in_water {
            push(cell.down(), MoveKind::Fall);
        }

        if self.can_fly() && !in_water {
            for neighbor in cell.ring() {
                push(neighbor, MoveKind::Fly);
            }
        }

        let mut resolved = Vec::with_capacity(out.len());
        for mut action in out {
            let dest = action.destination;
            if !voxels.contains(dest)
                || !(voxels.is_cell_empty(dest) || voxels.liquid_level(dest) > 0)
            {
                continue;
            }
            let barrier = voxels.objects_at(dest).iter().find(|o| match o.kind {
                ObjectKind::Barrier { owner } => {
                    voxels.relationship(self.faction, owner) != Relationship::Loving
                }
                _ => false,
            });
            if let Some(barrier) = barrier {
                if !self.can(MoveKind::DestroyObstacle) {
                    continue;
                }
                action.kind = MoveKind::DestroyObstacle;
                action.interact_target = Some(barrier.id);
            }
            resolved.push(action);
        }
        resolved
    }
}

fn check_cost(kind: MoveKind, cost: f32) -> Result<(), MotionError> {
    if cost > 0.0 && cost.is_finite() {
        Ok(())
    } else {
        Err(MotionError::NonPositiveCost { kind, cost })
    }
}
