use core::fmt;
use std::borrow::Cow;

use ai_core::{ActionStatus, Blackboard, TickContext};
use ai_nav::{Bounds, EdgeGoal, NavAgent, NavWorldMut};

use crate::movement::{GoToScript, GreedyStepScript};
use crate::script::{Script, Select};
use crate::{RetryPolicy, TaskPriority};

pub type TaskName = Cow<'static, str>;

type AgentOf<W> = <W as ai_core::WorldView>::Agent;
type CostFn<W> = Box<dyn Fn(&NavAgent<AgentOf<W>>, &W) -> f32>;
type CheckFn<W> = Box<dyn Fn(&NavAgent<AgentOf<W>>, &W) -> bool>;
type MakeScript<W> = Box<dyn FnMut() -> Box<dyn Script<W>>>;

/// A named, prioritized unit of work with a script factory.
///
/// Two tasks with the same name are the same logical task. A fresh script is built every time the
/// task becomes active, so retries never resume a half-finished script.
pub struct Task<W>
where
    W: NavWorldMut + 'static,
{
    name: TaskName,
    priority: TaskPriority,
    retry: RetryPolicy,
    cost_fn: Option<CostFn<W>>,
    feasible_fn: Option<CheckFn<W>>,
    stale_fn: Option<CheckFn<W>>,
    make_script: MakeScript<W>,
    script: Option<Box<dyn Script<W>>>,
}

impl<W> Task<W>
where
    W: NavWorldMut + 'static,
{
    pub fn new<S>(name: impl Into<TaskName>, mut make_script: impl FnMut() -> S + 'static) -> Self
    where
        S: Script<W>,
    {
        Self::from_boxed(name, move || Box::new(make_script()) as Box<dyn Script<W>>)
    }

    pub fn from_boxed(
        name: impl Into<TaskName>,
        make_script: impl FnMut() -> Box<dyn Script<W>> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            priority: TaskPriority::default(),
            retry: RetryPolicy::default(),
            cost_fn: None,
            feasible_fn: None,
            stale_fn: None,
            make_script: Box::new(make_script),
            script: None,
        }
    }

    /// Walk off the nearest lateral edge of the world, falling back to greedy steps when no full
    /// path can be planned.
    pub fn leave_world(bounds: Bounds) -> Self {
        Self::new("LeaveWorld", move || {
            Select::new(vec![
                Box::new(GoToScript::new(EdgeGoal(bounds))) as Box<dyn Script<W>>,
                Box::new(GreedyStepScript::new(EdgeGoal(bounds))),
            ])
        })
        .with_priority(TaskPriority::Urgent)
        .with_retry(RetryPolicy::Auto)
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cost(mut self, cost: impl Fn(&NavAgent<W::Agent>, &W) -> f32 + 'static) -> Self {
        self.cost_fn = Some(Box::new(cost));
        self
    }

    pub fn with_feasibility(
        mut self,
        feasible: impl Fn(&NavAgent<W::Agent>, &W) -> bool + 'static,
    ) -> Self {
        self.feasible_fn = Some(Box::new(feasible));
        self
    }

    /// Predicate for the garbage pass: `true` means the task should be discarded from pending.
    pub fn with_staleness(
        mut self,
        stale: impl Fn(&NavAgent<W::Agent>, &W) -> bool + 'static,
    ) -> Self {
        self.stale_fn = Some(Box::new(stale));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_cow(&self) -> TaskName {
        self.name.clone()
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub(crate) fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Cost estimate for ranking; NaN ranks as infinitely expensive.
    pub fn cost(&self, agent: &NavAgent<W::Agent>, world: &W) -> f32 {
        let cost = self.cost_fn.as_ref().map_or(0.0, |f| f(agent, world));
        if cost.is_nan() {
            f32::INFINITY
        } else {
            cost
        }
    }

    pub fn is_feasible(&self, agent: &NavAgent<W::Agent>, world: &W) -> bool {
        self.feasible_fn.as_ref().is_none_or(|f| f(agent, world))
    }

    pub fn should_delete(&self, agent: &NavAgent<W::Agent>, world: &W) -> bool {
        self.stale_fn.as_ref().is_some_and(|f| f(agent, world))
    }

    /// Whether a script is currently instantiated.
    pub fn is_started(&self) -> bool {
        self.script.is_some()
    }

    pub(crate) fn start(&mut self, ctx: &TickContext, agent: &NavAgent<W::Agent>, world: &W) {
        let mut script = (self.make_script)();
        script.initialize(ctx, agent, world);
        self.script = Some(script);
    }

    pub(crate) fn step(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActionStatus {
        match self.script.as_mut() {
            Some(script) => script.step(ctx, agent, world, blackboard),
            None => ActionStatus::Failure,
        }
    }

    pub(crate) fn cancel(&mut self, ctx: &TickContext, agent: &NavAgent<W::Agent>, world: &mut W) {
        if let Some(mut script) = self.script.take() {
            script.cancel(ctx, agent, world);
        }
    }
}

impl<W> PartialEq for Task<W>
where
    W: NavWorldMut + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<W> Eq for Task<W> where W: NavWorldMut + 'static {}

impl<W> fmt::Debug for Task<W>
where
    W: NavWorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("retry", &self.retry)
            .field("started", &self.script.is_some())
            .finish()
    }
}
