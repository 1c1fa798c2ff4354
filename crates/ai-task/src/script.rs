//! The resumable-script contract and a few generic combinators.

use ai_core::{ActionStatus, Blackboard, TickContext, Timer};
use ai_nav::{NavAgent, NavWorldMut};

/// A resumable unit of behavior, advanced once per scheduler drive.
///
/// `initialize` is called every time the owning task becomes active (including retries), so a
/// script must not assume it only runs once. `cancel` is called when the task is preempted.
pub trait Script<W>: 'static
where
    W: NavWorldMut + 'static,
{
    fn initialize(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &W) {}

    fn step(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActionStatus;

    fn cancel(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &mut W) {}
}

/// Runs children in order; fails on the first failure. Resumes at the running child.
pub struct Sequence<W>
where
    W: NavWorldMut + 'static,
{
    children: Vec<Box<dyn Script<W>>>,
    index: usize,
}

impl<W> Sequence<W>
where
    W: NavWorldMut + 'static,
{
    pub fn new(children: Vec<Box<dyn Script<W>>>) -> Self {
        Self { children, index: 0 }
    }
}

impl<W> Script<W> for Sequence<W>
where
    W: NavWorldMut + 'static,
{
    fn initialize(&mut self, ctx: &TickContext, agent: &NavAgent<W::Agent>, world: &W) {
        self.index = 0;
        if let Some(first) = self.children.first_mut() {
            first.initialize(ctx, agent, world);
        }
    }

    fn step(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActionStatus {
        while let Some(child) = self.children.get_mut(self.index) {
            match child.step(ctx, agent, world, blackboard) {
                ActionStatus::Running => return ActionStatus::Running,
                ActionStatus::Failure => return ActionStatus::Failure,
                ActionStatus::Success => {
                    self.index += 1;
                    if let Some(next) = self.children.get_mut(self.index) {
                        next.initialize(ctx, agent, world);
                    }
                }
            }
        }
        ActionStatus::Success
    }

    fn cancel(&mut self, ctx: &TickContext, agent: &NavAgent<W::Agent>, world: &mut W) {
        if let Some(child) = self.children.get_mut(self.index) {
            child.cancel(ctx, agent, world);
        }
    }
}

/// Tries children in order until one succeeds. Resumes at the running child.
pub struct Select<W>
where
    W: NavWorldMut + 'static,
{
    children: Vec<Box<dyn Script<W>>>,
    index: usize,
}

impl<W> Select<W>
where
    W: NavWorldMut + 'static,
{
    pub fn new(children: Vec<Box<dyn Script<W>>>) -> Self {
        Self { children, index: 0 }
    }
}

impl<W> Script<W> for Select<W>
where
    W: NavWorldMut + 'static,
{
    fn initialize(&mut self, ctx: &TickContext, agent: &NavAgent<W::Agent>, world: &W) {
        self.index = 0;
        if let Some(first) = self.children.first_mut() {
            first.initialize(ctx, agent, world);
        }
    }

    fn step(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActionStatus {
        while let Some(child) = self.children.get_mut(self.index) {
            match child.step(ctx, agent, world, blackboard) {
                ActionStatus::Running => return ActionStatus::Running,
                ActionStatus::Success => return ActionStatus::Success,
                ActionStatus::Failure => {
                    self.index += 1;
                    if let Some(next) = self.children.get_mut(self.index) {
                        next.initialize(ctx, agent, world);
                    }
                }
            }
        }
        ActionStatus::Failure
    }

    fn cancel(&mut self, ctx: &TickContext, agent: &NavAgent<W::Agent>, world: &mut W) {
        if let Some(child) = self.children.get_mut(self.index) {
            child.cancel(ctx, agent, world);
        }
    }
}

/// Succeeds once `seconds` of simulation time have passed.
#[derive(Debug, Clone)]
pub struct WaitScript {
    timer: Timer,
}

impl WaitScript {
    pub fn new(seconds: f32) -> Self {
        Self {
            timer: Timer::once(seconds),
        }
    }
}

impl<W> Script<W> for WaitScript
where
    W: NavWorldMut + 'static,
{
    fn initialize(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &W) {
        let target = self.timer.target_seconds();
        self.timer.reset(target);
    }

    fn step(
        &mut self,
        ctx: &TickContext,
        _agent: &mut NavAgent<W::Agent>,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> ActionStatus {
        self.timer.update(ctx.dt());
        if self.timer.has_triggered() {
            ActionStatus::Success
        } else {
            ActionStatus::Running
        }
    }
}
