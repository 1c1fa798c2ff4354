use ai_core::{TickContext, WorldMut, WorldView};
use ai_nav::{
    Bounds, Cell, MotionModel, MoveAction, NavAgent, NavWorldMut, NavWorldView, VoxelGrid,
    VoxelView,
};
use ai_task::{tick_agents, Agent, Task, TaskPriority, TaskScheduler, WaitScript, WanderIdle};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

struct BenchWorld {
    voxels: VoxelGrid,
    moves: u64,
}

impl WorldView for BenchWorld {
    type Agent = u32;
}

impl WorldMut for BenchWorld {}

impl NavWorldView for BenchWorld {
    fn voxels(&self) -> &dyn VoxelView {
        &self.voxels
    }
}

impl NavWorldMut for BenchWorld {
    fn apply_move(&mut self, _agent: u32, _action: &MoveAction, _speed: f32) {
        self.moves += 1;
    }
}

const PRIORITIES: [TaskPriority; 4] = [
    TaskPriority::Eventually,
    TaskPriority::Low,
    TaskPriority::Medium,
    TaskPriority::High,
];

fn crowd(count: u32, tasks_per_agent: u32) -> Vec<Agent<BenchWorld>> {
    (0..count)
        .map(|id| {
            let cell = Cell::new((id % 30) as i32 + 1, 1, (id / 30) as i32 + 1);
            let mut agent = Agent::new(
                NavAgent::new(id, MotionModel::default(), cell),
                TaskScheduler::default().with_idle(WanderIdle::default()),
            );
            for n in 0..tasks_per_agent {
                let seconds = 1.0 + (n % 3) as f32;
                agent.enqueue(
                    Task::new(format!("job-{n}"), move || WaitScript::new(seconds))
                        .with_priority(PRIORITIES[(n as usize + id as usize) % PRIORITIES.len()])
                        .with_cost(move |_, _| (n % 5) as f32),
                );
            }
            agent
        })
        .collect()
}

fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("ai-task/scheduler");

    group.bench_function("tick_256_agents_16_tasks", |b| {
        let mut world = BenchWorld {
            voxels: VoxelGrid::with_floor(Bounds::new(32, 4, 32)),
            moves: 0,
        };
        let mut agents = crowd(256, 16);
        let mut ctx = TickContext::new(0, 0.25, 99);
        b.iter(|| {
            let reports = tick_agents(&ctx, &mut world, &mut agents);
            ctx = ctx.next();
            black_box(reports.len());
        })
    });

    group.bench_function("select_from_512_pending", |b| {
        let world = BenchWorld {
            voxels: VoxelGrid::with_floor(Bounds::new(8, 4, 8)),
            moves: 0,
        };
        b.iter_batched(
            || (crowd(1, 512), TickContext::new(0, 0.25, 1)),
            |(mut agents, ctx)| {
                let mut world = BenchWorld {
                    voxels: world.voxels.clone(),
                    moves: 0,
                };
                let report = agents[0].tick(&ctx, &mut world);
                black_box(report.selected);
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_scheduler);
criterion_main!(benches);
