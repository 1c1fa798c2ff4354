use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ai_nav::{
    Bounds, Cell, CellGoal, MotionModel, MoveKind, PlanError, PlanPoll, PlanResult, PlanTicket,
    PlanWorker, PlannerConfig, VoxelGrid, VoxelSnapshot,
};

fn corridor() -> VoxelSnapshot {
    let mut world = VoxelGrid::new(Bounds::new(5, 3, 1));
    for x in 0..5 {
        world.set_solid(Cell::new(x, 0, 0), true);
        world.set_solid(Cell::new(x, 2, 0), true);
    }
    Arc::new(world)
}

fn wait(ticket: &mut PlanTicket) -> PlanResult {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        match ticket.poll() {
            PlanPoll::Ready(result) => return result,
            PlanPoll::Pending => {
                assert!(Instant::now() < deadline, "plan worker timed out");
                thread::sleep(Duration::from_millis(1));
            }
        }
    }
}

#[test]
fn worker_delivers_the_same_path_as_inline_search() {
    let worker = PlanWorker::new(PlannerConfig::default());
    let voxels = corridor();
    let motion = MotionModel::only(&[MoveKind::Walk]);

    let mut ticket = worker.request(
        voxels.clone(),
        motion.clone(),
        Cell::new(0, 1, 0),
        CellGoal(Cell::new(4, 1, 0)),
    );
    let path = wait(&mut ticket).expect("path");

    let inline = ai_nav::find_path(
        voxels.as_ref(),
        &motion,
        Cell::new(0, 1, 0),
        &CellGoal(Cell::new(4, 1, 0)),
        1000,
        1.0,
    )
    .expect("path");
    assert_eq!(path, inline);
    assert_eq!(ticket.stats().map(|s| s.expansions), Some(4));
}

#[test]
fn result_is_taken_exactly_once() {
    let worker = PlanWorker::default();
    let mut ticket = worker.request(
        corridor(),
        MotionModel::default(),
        Cell::new(0, 1, 0),
        CellGoal(Cell::new(2, 0, 0)),
    );

    assert_eq!(wait(&mut ticket), Err(PlanError::GoalImpossible));
    assert!(matches!(
        ticket.poll(),
        PlanPoll::Ready(Err(PlanError::WorkerGone))
    ));
}

#[test]
fn dropping_a_ticket_discards_the_result() {
    let worker = PlanWorker::default();
    let ticket = worker.request(
        corridor(),
        MotionModel::default(),
        Cell::new(0, 1, 0),
        CellGoal(Cell::new(4, 1, 0)),
    );
    drop(ticket);

    // A fresh request still works after an abandoned one.
    let mut next = worker.request(
        corridor(),
        MotionModel::default(),
        Cell::new(0, 1, 0),
        CellGoal(Cell::new(3, 1, 0)),
    );
    assert_eq!(wait(&mut next).map(|p| p.len()), Ok(3));
}
