use ai_nav::{
    Bounds, Cell, CellGoal, EdgeGoal, MotionModel, PathPlanner, PlannerConfig, VoxelGrid,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn maze(size: u32) -> VoxelGrid {
    let mut world = VoxelGrid::with_floor(Bounds::new(size, 4, size));
    // Every fourth row is a wall with a gap at alternating ends.
    for z in (3..size as i32 - 1).step_by(4) {
        let gap = if (z / 4) % 2 == 0 { size as i32 - 2 } else { 1 };
        for x in 0..size as i32 {
            if x != gap {
                world.set_solid(Cell::new(x, 1, z), true);
                world.set_solid(Cell::new(x, 2, z), true);
            }
        }
    }
    world
}

fn bench_planner(c: &mut Criterion) {
    let world = maze(48);
    let motion = MotionModel::default();
    let start = Cell::new(1, 1, 1);
    let goal = CellGoal(Cell::new(46, 1, 46));

    let mut group = c.benchmark_group("ai-nav/planner");

    let mut optimal = PathPlanner::new(PlannerConfig {
        max_expansions: 100_000,
        heuristic_weight: 1.0,
    });
    group.bench_function("maze_weight_1", |b| {
        b.iter(|| {
            let path = optimal
                .find_path(&world, &motion, start, &goal)
                .expect("path");
            black_box(path.len());
        })
    });

    let mut greedy = PathPlanner::new(PlannerConfig {
        max_expansions: 100_000,
        heuristic_weight: 2.0,
    });
    group.bench_function("maze_weight_2", |b| {
        b.iter(|| {
            let path = greedy.find_path(&world, &motion, start, &goal).expect("path");
            black_box(path.len());
        })
    });

    let edge = EdgeGoal(Bounds::new(48, 4, 48));
    group.bench_function("edge_goal", |b| {
        b.iter(|| {
            let path = optimal
                .find_path(&world, &motion, Cell::new(24, 1, 24), &edge)
                .expect("path");
            black_box(path.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_planner);
criterion_main!(benches);
