use std::cell::RefCell;
use std::rc::Rc;

use ai_core::Blackboard;
use ai_tools::{emit, TraceEvent, TraceLog, TraceSink, TRACE_LOG, TRACE_SINK};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[test]
fn emit_writes_to_trace_log_when_present() {
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::default());

    emit(
        &mut bb,
        TraceEvent::new(1, "task.select")
            .with_subject("Flee")
            .with_a(10)
            .with_b(20),
    );

    let log = bb.get(TRACE_LOG).unwrap();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].tick, 1);
    assert_eq!(log.events[0].tag, "task.select");
    assert_eq!(log.events[0].subject.as_deref(), Some("Flee"));
    assert_eq!(log.events[0].a, 10);
    assert_eq!(log.events[0].b, 20);
}

#[test]
fn emit_writes_to_sink_when_present() {
    let mut bb = Blackboard::new();
    let handle = RcSink::default();
    let shared = handle.0.clone();
    bb.set(TRACE_SINK, Box::new(handle) as Box<dyn TraceSink>);

    emit(&mut bb, TraceEvent::new(2, "nav.plan.found"));

    let events = shared.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].tick, 2);
    assert_eq!(events[0].tag, "nav.plan.found");
    assert!(events[0].subject.is_none());
}

#[test]
fn emit_without_log_or_sink_is_a_no_op() {
    let mut bb = Blackboard::new();
    emit(&mut bb, TraceEvent::new(0, "task.idle"));
    assert!(bb.is_empty());
}

#[test]
fn log_helpers_filter_by_tag() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(0, "task.fail").with_subject("Chop"));
    log.push(TraceEvent::new(1, "task.select").with_subject("Flee"));
    log.push(TraceEvent::new(2, "task.fail").with_subject("Mine"));

    assert_eq!(log.count("task.fail"), 2);
    assert_eq!(log.count("task.locked"), 0);
    assert_eq!(log.subjects("task.fail"), vec!["Chop", "Mine"]);
    assert_eq!(log.tagged("task.select").next().map(|e| e.tick), Some(1));
}

#[test]
fn subjects_outlive_the_tag_they_were_queried_with() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(0, "task.success").with_subject("Build"));
    log.push(TraceEvent::new(3, "task.success"));

    let subjects = {
        let tag = format!("task.{}", "success");
        log.subjects(&tag)
    };
    assert_eq!(subjects, vec!["Build"]);
}
