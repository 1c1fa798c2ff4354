//! Per-agent task scheduler.
//!
//! One [`TaskScheduler::tick`] runs five passes in a fixed order: lockout timers, preemption,
//! garbage collection of stale pending tasks, driving the active script, and selection (which
//! falls back to the idle behavior).
//!
//! Known fairness gap: a failed or preempted task that may retry is demoted to
//! [`TaskPriority::Eventually`]. Under a steady stream of higher-priority work such a task can
//! wait indefinitely.

use std::collections::BTreeMap;

use ai_core::{ActionStatus, Blackboard, TickContext};
use ai_nav::{NavAgent, NavWorldMut};
use ai_tools::{emit as trace_emit, TraceEvent};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::idle::IdleBehavior;
use crate::task::TaskName;
use crate::{LockoutConfig, Task, TaskHistory, TaskPriority};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    pub lockout: LockoutConfig,
}

/// Per-agent decision problems. None of these escape [`TaskScheduler::tick`]; they are reported
/// in [`TickReport::errors`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task `{name}` is locked out after repeated failures")]
    Locked { name: TaskName },
    #[error("task `{name}` failed ({failures} recent failures)")]
    ScriptFailed { name: TaskName, failures: u32 },
}

/// What happened during one scheduler tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// The task that was cancelled by preemption.
    pub preempted: Option<TaskName>,
    /// The task that became active this tick (by preemption, selection or idle fallback).
    pub selected: Option<TaskName>,
    /// Result of driving the active script, if one was driven.
    pub outcome: Option<ActionStatus>,
    /// The failed task stayed active with a fresh script.
    pub retried: bool,
    /// Selection found nothing and the idle behavior supplied a task.
    pub idle: bool,
    pub errors: Vec<TaskError>,
}

pub struct TaskScheduler<W>
where
    W: NavWorldMut + 'static,
{
    config: SchedulerConfig,
    pending: Vec<Task<W>>,
    active: Option<Task<W>>,
    history: BTreeMap<TaskName, TaskHistory>,
    idle: Option<Box<dyn IdleBehavior<W>>>,
}

impl<W> Default for TaskScheduler<W>
where
    W: NavWorldMut + 'static,
{
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl<W> TaskScheduler<W>
where
    W: NavWorldMut + 'static,
{
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
            active: None,
            history: BTreeMap::new(),
            idle: None,
        }
    }

    pub fn with_idle(mut self, idle: impl IdleBehavior<W> + 'static) -> Self {
        self.idle = Some(Box::new(idle));
        self
    }

    pub fn set_idle(&mut self, idle: Option<Box<dyn IdleBehavior<W>>>) {
        self.idle = idle;
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Queue a task. Returns `false` (and drops it) when a task of the same name is already
    /// pending or active.
    pub fn enqueue(&mut self, task: Task<W>) -> bool {
        if self.has_task_named(task.name()) {
            return false;
        }
        self.pending.push(task);
        true
    }

    pub fn active_task(&self) -> Option<&Task<W>> {
        self.active.as_ref()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Task<W>> {
        self.pending.iter()
    }

    pub fn has_task_named(&self, name: &str) -> bool {
        self.active.as_ref().is_some_and(|t| t.name() == name)
            || self.pending.iter().any(|t| t.name() == name)
    }

    pub fn history_for(&self, name: &str) -> Option<&TaskHistory> {
        self.history.get(name)
    }

    pub fn is_locked(&self, name: &str) -> bool {
        self.history
            .get(name)
            .is_some_and(|h| h.is_locked(&self.config.lockout))
    }

    /// Cancel the active task and drop everything pending. Failure history is kept.
    pub fn cancel_all(&mut self, ctx: &TickContext, agent: &NavAgent<W::Agent>, world: &mut W) {
        if let Some(mut task) = self.active.take() {
            task.cancel(ctx, agent, world);
        }
        self.pending.clear();
    }

    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> TickReport {
        let mut report = TickReport::default();

        self.update_lockouts(ctx);
        self.preempt(ctx, agent, world, blackboard, &mut report);
        self.collect_garbage(agent, world);
        self.drive(ctx, agent, world, blackboard, &mut report);
        if self.active.is_none() {
            self.select(ctx, agent, world, blackboard, &mut report);
        }

        report
    }

    fn update_lockouts(&mut self, ctx: &TickContext) {
        let dt = ctx.dt();
        for (name, history) in self.history.iter_mut() {
            if history.update(dt, &self.config.lockout) {
                tracing::debug!(
                    task = %name,
                    next_window = history.lockout().target_seconds(),
                    "lockout window expired"
                );
            }
        }
    }

    fn preempt(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
        report: &mut TickReport,
    ) {
        let Some(active_priority) = self.active.as_ref().map(Task::priority) else {
            return;
        };
        let found = self.pending.iter().position(|task| {
            task.priority() > active_priority
                && !self.is_locked(task.name())
                && task.is_feasible(agent, world)
        });
        let Some(index) = found else {
            return;
        };

        let mut next = self.pending.remove(index);
        if let Some(mut cancelled) = self.active.take() {
            cancelled.cancel(ctx, agent, world);
            let name = cancelled.name_cow();
            tracing::debug!(task = %name, by = next.name(), "task preempted");
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "task.preempt")
                    .with_subject(name.clone())
                    .with_a(next.priority() as u64),
            );
            if cancelled.retry_policy().allows_retry() && !self.is_locked(&name) {
                cancelled.set_priority(TaskPriority::LOWEST);
                self.pending.push(cancelled);
            }
            report.preempted = Some(name);
        }

        next.start(ctx, agent, world);
        self.activate(ctx, next, blackboard, report);
    }

    fn collect_garbage(&mut self, agent: &NavAgent<W::Agent>, world: &W) {
        self.pending.retain(|task| {
            let stale = task.should_delete(agent, world);
            if stale {
                tracing::debug!(task = task.name(), "discarding stale task");
            }
            !stale
        });
    }

    fn drive(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
        report: &mut TickReport,
    ) {
        let Some(task) = self.active.as_mut() else {
            return;
        };
        let status = task.step(ctx, agent, world, blackboard);
        report.outcome = Some(status);
        let name = task.name_cow();

        let mut retried = false;
        match status {
            ActionStatus::Running => {}
            ActionStatus::Success => {
                self.history.remove(&name);
                tracing::debug!(task = %name, "task succeeded");
                trace_emit(
                    blackboard,
                    TraceEvent::new(ctx.tick, "task.success").with_subject(name.clone()),
                );
            }
            ActionStatus::Failure => {
                let failures = match self.history.get_mut(&name) {
                    Some(history) => history.record_failure(),
                    None => {
                        let history = TaskHistory::new(&self.config.lockout);
                        let failures = history.failures();
                        self.history.insert(name.clone(), history);
                        failures
                    }
                };
                tracing::debug!(task = %name, failures, "task failed");
                trace_emit(
                    blackboard,
                    TraceEvent::new(ctx.tick, "task.fail")
                        .with_subject(name.clone())
                        .with_a(failures as u64),
                );
                report.errors.push(TaskError::ScriptFailed {
                    name: name.clone(),
                    failures,
                });

                let locked = self.is_locked(&name);
                if locked {
                    tracing::debug!(task = %name, "task locked out");
                    trace_emit(
                        blackboard,
                        TraceEvent::new(ctx.tick, "task.locked").with_subject(name.clone()),
                    );
                    report.errors.push(TaskError::Locked { name: name.clone() });
                } else if let Some(task) = self.active.as_mut() {
                    if task.retry_policy().allows_retry() {
                        // Retried in place rather than re-enqueued; at the lowest tier pending work preempts it.
                        task.set_priority(TaskPriority::LOWEST);
                        task.start(ctx, agent, world);
                        retried = true;
                        trace_emit(
                            blackboard,
                            TraceEvent::new(ctx.tick, "task.retry").with_subject(name.clone()),
                        );
                    }
                }
            }
        }

        report.retried = retried;
        if !status.is_running() && !retried {
            self.active = None;
        }
    }

    fn select(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
        report: &mut TickReport,
    ) {
        let mut best: Option<(usize, TaskPriority, f32)> = None;
        for (index, task) in self.pending.iter().enumerate() {
            if self.is_locked(task.name()) {
                report.errors.push(TaskError::Locked {
                    name: task.name_cow(),
                });
                continue;
            }
            if !task.is_feasible(agent, world) {
                continue;
            }
            let priority = task.priority();
            let cost = task.cost(agent, world);
            let better = match best {
                None => true,
                Some((_, best_priority, best_cost)) => {
                    priority > best_priority || (priority == best_priority && cost < best_cost)
                }
            };
            if better {
                best = Some((index, priority, cost));
            }
        }

        if let Some((index, _, _)) = best {
            let mut task = self.pending.remove(index);
            task.start(ctx, agent, world);
            self.activate(ctx, task, blackboard, report);
            return;
        }

        let Some(idle) = self.idle.as_mut() else {
            return;
        };
        if let Some(mut task) = idle.produce_idle_task(ctx, agent, world) {
            task.start(ctx, agent, world);
            report.idle = true;
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "task.idle").with_subject(task.name_cow()),
            );
            self.activate(ctx, task, blackboard, report);
        }
    }

    fn activate(
        &mut self,
        ctx: &TickContext,
        task: Task<W>,
        blackboard: &mut Blackboard,
        report: &mut TickReport,
    ) {
        let name = task.name_cow();
        tracing::debug!(task = %name, priority = %task.priority(), "task selected");
        trace_emit(
            blackboard,
            TraceEvent::new(ctx.tick, "task.select")
                .with_subject(name.clone())
                .with_a(task.priority() as u64),
        );
        report.selected = Some(name);
        self.active = Some(task);
    }
}
