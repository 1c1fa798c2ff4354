//! Weighted A* at weight 1.0 against an exhaustive Dijkstra over the same successor graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use ai_nav::{find_path, Bounds, Cell, CellGoal, MotionModel, MoveKind, VoxelGrid, VoxelView};
use proptest::prelude::*;

const SIZE: i32 = 8;

#[derive(PartialEq)]
struct Entry(f32, Cell);

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.total_cmp(&self.0).then_with(|| other.1.cmp(&self.1))
    }
}

fn dijkstra(world: &VoxelGrid, motion: &MotionModel, start: Cell, goal: Cell) -> Option<f32> {
    let mut best: HashMap<Cell, f32> = HashMap::new();
    let mut heap = BinaryHeap::new();
    best.insert(start, 0.0);
    heap.push(Entry(0.0, start));

    while let Some(Entry(g, cell)) = heap.pop() {
        if cell == goal {
            return Some(g);
        }
        if g > best.get(&cell).copied().unwrap_or(f32::INFINITY) {
            continue;
        }
        for action in motion.generate_successors(world, cell) {
            let next = g + action.edge_cost(motion, world);
            if next < best.get(&action.destination).copied().unwrap_or(f32::INFINITY) {
                best.insert(action.destination, next);
                heap.push(Entry(next, action.destination));
            }
        }
    }
    None
}

fn world_with_pillars(pillars: &[bool]) -> VoxelGrid {
    let mut world = VoxelGrid::with_floor(Bounds::new(SIZE as u32, 3, SIZE as u32));
    for (i, &solid) in pillars.iter().enumerate() {
        let i = i as i32;
        world.set_solid(Cell::new(i % SIZE, 1, i / SIZE), solid);
    }
    world
}

fn cell_at(index: usize) -> Cell {
    let i = index as i32;
    Cell::new(i % SIZE, 1, i / SIZE)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn weight_one_matches_exhaustive_search(
        pillars in prop::collection::vec(prop::bool::weighted(0.25), (SIZE * SIZE) as usize),
        start in 0..(SIZE * SIZE) as usize,
        goal in 0..(SIZE * SIZE) as usize,
        walk_cost in 0.05f32..=2.0,
    ) {
        let mut world = world_with_pillars(&pillars);
        let start = cell_at(start);
        let goal = cell_at(goal);
        world.set_solid(start, false);
        world.set_solid(goal, false);
        let mut motion = MotionModel::only(&[MoveKind::Walk]);
        motion.set_cost(MoveKind::Walk, walk_cost).expect("positive cost");

        let reference = dijkstra(&world, &motion, start, goal);
        let planned = find_path(&world, &motion, start, &CellGoal(goal), u32::MAX, 1.0);

        match reference {
            Some(cost) => {
                let path = planned.expect("reference found a path");
                prop_assert!(path.total_cost(&motion, &world) <= cost + 1e-3 * cost.max(1.0));
                prop_assert!(path.is_connected());
                if start != goal {
                    prop_assert_eq!(path.origin(), Some(start));
                    prop_assert_eq!(path.destination(), Some(goal));
                }
            }
            None => prop_assert!(planned.is_err()),
        }
        prop_assert!(world.is_cell_empty(start));
    }
}
