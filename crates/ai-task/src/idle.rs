use ai_core::{DeterministicRng, TickContext};
use ai_nav::{NavAgent, NavWorldMut};

use crate::movement::WanderScript;
use crate::script::WaitScript;
use crate::{RetryPolicy, Task, TaskPriority};

const IDLE_STREAM: u64 = 0x4944_4c45;

/// Fallback consulted when selection finds nothing eligible.
pub trait IdleBehavior<W>
where
    W: NavWorldMut + 'static,
{
    fn produce_idle_task(
        &mut self,
        ctx: &TickContext,
        agent: &NavAgent<W::Agent>,
        world: &W,
    ) -> Option<Task<W>>;
}

impl<W, F> IdleBehavior<W> for F
where
    W: NavWorldMut + 'static,
    F: FnMut(&TickContext, &NavAgent<W::Agent>, &W) -> Option<Task<W>>,
{
    fn produce_idle_task(
        &mut self,
        ctx: &TickContext,
        agent: &NavAgent<W::Agent>,
        world: &W,
    ) -> Option<Task<W>> {
        self(ctx, agent, world)
    }
}

/// Default idle: usually wander a few cells, sometimes sit still for a moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderIdle {
    pub wander_moves: u32,
    pub sit_seconds: f32,
    /// Probability of sitting instead of wandering.
    pub sit_chance: f32,
}

impl Default for WanderIdle {
    fn default() -> Self {
        Self {
            wander_moves: 3,
            sit_seconds: 2.0,
            sit_chance: 0.25,
        }
    }
}

impl<W> IdleBehavior<W> for WanderIdle
where
    W: NavWorldMut + 'static,
{
    fn produce_idle_task(
        &mut self,
        ctx: &TickContext,
        agent: &NavAgent<W::Agent>,
        _world: &W,
    ) -> Option<Task<W>> {
        let mut rng = ctx.rng_for_agent(agent.id, IDLE_STREAM);
        let task = if rng.chance(self.sit_chance) {
            let seconds = self.sit_seconds;
            Task::new("IdleSit", move || WaitScript::new(seconds))
        } else {
            let moves = self.wander_moves;
            Task::new("IdleWander", move || WanderScript::new(moves))
        };
        Some(
            task.with_priority(TaskPriority::Eventually)
                .with_retry(RetryPolicy::Never),
        )
    }
}
