#![cfg(feature = "serde")]

use ai_core::{ActionStatus, AgentHandle, Timer};

#[test]
fn timer_state_survives_a_save() {
    let mut timer = Timer::once(30.0);
    timer.update(12.5);

    let json = serde_json::to_string(&timer).expect("serialize");
    let back: Timer = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back, timer);
    assert_eq!(back.remaining_seconds(), 17.5);
}

#[test]
fn handles_and_statuses_are_plain_values() {
    assert_eq!(serde_json::to_string(&AgentHandle(7)).expect("handle"), "7");
    assert_eq!(
        serde_json::to_string(&ActionStatus::Running).expect("status"),
        "\"Running\""
    );
}
