#![cfg(feature = "serde")]

use ai_nav::{
    find_path, Bounds, Cell, CellGoal, MotionConfig, MotionModel, MoveKind, NavPath,
    PlannerConfig, VoxelGrid,
};

#[test]
fn motion_config_roundtrips_and_fills_defaults() {
    let mut motion = MotionModel::default();
    motion.set_can_fly(true);
    motion.set_cost(MoveKind::Fly, 4.0).unwrap();

    let json = serde_json::to_string(&motion.to_config()).expect("serialize");
    let config: MotionConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(MotionModel::try_from(config).unwrap(), motion);

    let partial: MotionConfig =
        serde_json::from_str(r#"{"fly":{"enabled":true,"cost":2.0,"speed":3.0}}"#)
            .expect("deserialize");
    let model = MotionModel::try_from(partial).unwrap();
    assert!(model.can_fly());
    assert_eq!(model.speed(MoveKind::Fly), 3.0);
    assert_eq!(model.cost(MoveKind::Walk), 1.0);
}

#[test]
fn planner_config_defaults_from_empty_object() {
    let config: PlannerConfig = serde_json::from_str("{}").expect("deserialize");
    assert_eq!(config, PlannerConfig::default());
}

#[test]
fn nav_path_roundtrips() {
    let world = VoxelGrid::with_floor(Bounds::new(6, 3, 6));
    let motion = MotionModel::default();
    let path = find_path(
        &world,
        &motion,
        Cell::new(0, 1, 0),
        &CellGoal(Cell::new(5, 1, 3)),
        1000,
        1.0,
    )
    .expect("path");

    let json = serde_json::to_string(&path).expect("serialize");
    let back: NavPath = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, path);
}
