use ai_core::{AgentId, Blackboard, TickContext};
use ai_nav::{NavAgent, NavWorldMut};

use crate::{Task, TaskScheduler, TickReport};

/// An AI-controlled creature: movement body, scheduler and scratch memory.
///
/// The three parts are separate fields so a tick can borrow them independently.
pub struct Agent<W>
where
    W: NavWorldMut + 'static,
{
    pub nav: NavAgent<W::Agent>,
    pub scheduler: TaskScheduler<W>,
    pub blackboard: Blackboard,
}

impl<W> Agent<W>
where
    W: NavWorldMut + 'static,
{
    pub fn new(nav: NavAgent<W::Agent>, scheduler: TaskScheduler<W>) -> Self {
        Self {
            nav,
            scheduler,
            blackboard: Blackboard::new(),
        }
    }

    pub fn id(&self) -> W::Agent {
        self.nav.id
    }

    pub fn enqueue(&mut self, task: Task<W>) -> bool {
        self.scheduler.enqueue(task)
    }

    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) -> TickReport {
        self.scheduler
            .tick(ctx, &mut self.nav, world, &mut self.blackboard)
    }
}

/// Tick every agent once, in stable-id order. Returns each agent's report in that order.
pub fn tick_agents<W>(
    ctx: &TickContext,
    world: &mut W,
    agents: &mut [Agent<W>],
) -> Vec<(W::Agent, TickReport)>
where
    W: NavWorldMut + 'static,
{
    let mut order: Vec<usize> = (0..agents.len()).collect();
    order.sort_by_key(|&i| (agents[i].id().stable_id(), agents[i].id()));

    order
        .into_iter()
        .map(|i| {
            let agent = &mut agents[i];
            let report = agent.tick(ctx, world);
            (agent.id(), report)
        })
        .collect()
}
