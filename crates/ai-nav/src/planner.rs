//! Budgeted weighted A* over [`MotionModel`] successors.

use core::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Cell, GoalRegion, MotionModel, MoveAction, MoveKind, NavPath, VoxelView};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Hard cap on open-set pops per query.
    pub max_expansions: u32,
    /// `f = g + heuristic_weight * h`. 1.0 keeps paths optimal.
    pub heuristic_weight: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 1000,
            heuristic_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("goal cannot be reached from anywhere")]
    GoalImpossible,
    #[error("no path found after {expansions} expansions")]
    NotFound { expansions: u32 },
    #[error("plan worker dropped the request without a result")]
    WorkerGone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: u32,
    /// Times the open set ran dry and the start cell was re-expanded.
    pub fallbacks: u32,
}

#[derive(Debug)]
struct OpenNode {
    f: f32,
    g: f32,
    cell: Cell,
    tie: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

/// Planner with a fixed configuration that remembers stats from its last query.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    config: PlannerConfig,
    last: SearchStats,
}

impl PathPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            last: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn last_stats(&self) -> SearchStats {
        self.last
    }

    pub fn find_path(
        &mut self,
        voxels: &dyn VoxelView,
        motion: &MotionModel,
        start: Cell,
        goal: &dyn GoalRegion,
    ) -> Result<NavPath, PlanError> {
        let (result, stats) = search(
            voxels,
            motion,
            start,
            goal,
            self.config.max_expansions,
            self.config.heuristic_weight,
        );
        self.last = stats;
        result
    }
}

/// One-shot search. See [`PathPlanner`] for a reusable, configured planner.
pub fn find_path(
    voxels: &dyn VoxelView,
    motion: &MotionModel,
    start: Cell,
    goal: &dyn GoalRegion,
    expansion_budget: u32,
    heuristic_weight: f32,
) -> Result<NavPath, PlanError> {
    search(
        voxels,
        motion,
        start,
        goal,
        expansion_budget,
        heuristic_weight,
    )
    .0
}

pub(crate) fn search(
    voxels: &dyn VoxelView,
    motion: &MotionModel,
    start: Cell,
    goal: &dyn GoalRegion,
    budget: u32,
    weight: f32,
) -> (Result<NavPath, PlanError>, SearchStats) {
    let mut stats = SearchStats::default();
    if !goal.is_possible(voxels) {
        tracing::debug!(%start, "goal impossible; skipping search");
        return (Err(PlanError::GoalImpossible), stats);
    }
    if goal.is_in_region(start) {
        return (Ok(NavPath::default()), stats);
    }
    let weight = if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        1.0
    };
    let weight = weight * heuristic_scale(motion);

    let mut open = BinaryHeap::<OpenNode>::new();
    let mut tie: u64 = 0;
    let mut g_score: HashMap<Cell, f32> = HashMap::new();
    let mut came_from: HashMap<Cell, MoveAction> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();

    g_score.insert(start, 0.0);
    open.push(OpenNode {
        f: weight * goal.heuristic(start),
        g: 0.0,
        cell: start,
        tie,
    });
    tie += 1;

    let mut fell_back = false;
    loop {
        if stats.expansions >= budget {
            tracing::debug!(%start, expansions = stats.expansions, "expansion budget exhausted");
            return (
                Err(PlanError::NotFound {
                    expansions: stats.expansions,
                }),
                stats,
            );
        }

        let (current, g) = match open.pop() {
            Some(node) => {
                let best = g_score.get(&node.cell).copied().unwrap_or(f32::INFINITY);
                if closed.contains(&node.cell) || node.g > best {
                    // Stale heap entry.
                    continue;
                }
                (node.cell, node.g)
            }
            None if !fell_back => {
                // Re-expand the start once before giving up; charged double.
                fell_back = true;
                stats.fallbacks += 1;
                stats.expansions = stats.expansions.saturating_add(1);
                (start, 0.0)
            }
            None => {
                tracing::debug!(%start, expansions = stats.expansions, "open set exhausted");
                return (
                    Err(PlanError::NotFound {
                        expansions: stats.expansions,
                    }),
                    stats,
                );
            }
        };
        stats.expansions = stats.expansions.saturating_add(1);
        tracing::trace!(cell = %current, g, "expand");

        if goal.is_in_region(current) {
            let path = reconstruct(&came_from, start, current);
            tracing::debug!(%start, len = path.len(), expansions = stats.expansions, "path found");
            return (Ok(path), stats);
        }

        if let Some(target) = goal.representative_cell() {
            if current.is_axis_adjacent(target) {
                let mut path = reconstruct(&came_from, start, current);
                path.actions
                    .push(MoveAction::new(current, target, MoveKind::Walk));
                tracing::debug!(
                    %start,
                    len = path.len(),
                    expansions = stats.expansions,
                    "path found via adjacency"
                );
                return (Ok(path), stats);
            }
        }

        closed.insert(current);
        for action in motion.generate_successors(voxels, current) {
            let next = action.destination;
            if closed.contains(&next) {
                continue;
            }
            let tentative = g + action.edge_cost(motion, voxels);
            if g_score.get(&next).is_some_and(|&old| tentative >= old) {
                continue;
            }
            came_from.insert(next, action);
            g_score.insert(next, tentative);
            open.push(OpenNode {
                f: tentative + weight * goal.heuristic(next),
                g: tentative,
                cell: next,
                tie,
            });
            tie += 1;
        }
    }
}

/// Euclidean distance only bounds edge cost from below while every usable kind costs at least 1.
/// Walk is always counted because the adjacency shortcut finishes with a walk step.
fn heuristic_scale(motion: &MotionModel) -> f32 {
    motion
        .capabilities()
        .iter()
        .chain(std::iter::once(MoveKind::Walk))
        .map(|kind| motion.cost(kind))
        .fold(1.0_f32, f32::min)
}

fn reconstruct(came_from: &HashMap<Cell, MoveAction>, start: Cell, mut cell: Cell) -> NavPath {
    let mut actions = Vec::new();
    while cell != start {
        let Some(action) = came_from.get(&cell) else {
            break;
        };
        actions.push(*action);
        cell = action.origin;
    }
    actions.reverse();
    NavPath::new(actions)
}
