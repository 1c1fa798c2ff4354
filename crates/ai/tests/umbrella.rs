#[cfg(feature = "full")]
#[test]
fn full_feature_reexports_every_subsystem() {
    use ai::nav::{find_path, Bounds, Cell, CellGoal, MotionModel, MoveKind, VoxelGrid};

    let voxels = VoxelGrid::with_floor(Bounds::new(4, 3, 1));
    let path = find_path(
        &voxels,
        &MotionModel::only(&[MoveKind::Walk]),
        Cell::new(0, 1, 0),
        &CellGoal(Cell::new(3, 1, 0)),
        100,
        1.0,
    )
    .expect("path");

    assert_eq!(path.len(), 3);
    assert_eq!(ai::task::TaskPriority::default(), ai::task::TaskPriority::Eventually);
    assert_eq!(ai::core::TickContext::new(0, 1.0, 0).next().tick, 1);
    assert!(ai::tools::TraceLog::default().events.is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn serde_feature_reaches_the_config_types() {
    let json = serde_json::to_value(ai::nav::PlannerConfig::default()).expect("json");
    assert_eq!(json["max_expansions"], 1000);
}
