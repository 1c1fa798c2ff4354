use ai_core::ActionStatus;

#[test]
fn only_running_is_running() {
    assert!(ActionStatus::Running.is_running());
    assert!(!ActionStatus::Success.is_running());
    assert!(!ActionStatus::Failure.is_running());
}
