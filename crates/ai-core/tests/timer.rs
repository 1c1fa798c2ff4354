use ai_core::Timer;

#[test]
fn once_timer_latches_until_reset() {
    let mut timer = Timer::once(1.0);
    timer.update(0.25);
    assert!(!timer.has_triggered());
    timer.update(0.75);
    assert!(timer.has_triggered());

    // Further updates keep it latched and do not accumulate.
    timer.update(10.0);
    assert!(timer.has_triggered());
    assert_eq!(timer.elapsed_seconds(), 1.0);

    timer.reset(2.0);
    assert!(!timer.has_triggered());
    assert_eq!(timer.target_seconds(), 2.0);
    assert_eq!(timer.remaining_seconds(), 2.0);
}

#[test]
fn negative_and_nan_dt_do_not_run_backwards() {
    let mut timer = Timer::once(1.0);
    timer.update(0.5);
    timer.update(-3.0);
    timer.update(f32::NAN);
    assert_eq!(timer.elapsed_seconds(), 0.5);
}
