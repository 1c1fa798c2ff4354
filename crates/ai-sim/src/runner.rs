use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use ai_core::{ActionStatus, AgentHandle, TickContext};
use ai_nav::{Cell, MoveKind};
use ai_task::{tick_agents, TaskError};
use ai_tools::{TraceEvent, TRACE_LOG};

use crate::Scenario;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentSummary {
    pub id: u32,
    pub final_cell: Cell,
    /// Task names in the order they succeeded.
    pub completed: Vec<String>,
    pub failures: u32,
    pub preemptions: u32,
    /// Tasks that were locked out at some point during the run.
    pub locked_out: Vec<String>,
    pub active: Option<String>,
    pub pending: usize,
    pub traces: Vec<TraceEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub moves: BTreeMap<MoveKind, u64>,
    pub agents: Vec<AgentSummary>,
}

impl RunSummary {
    pub fn agent(&self, id: u32) -> Option<&AgentSummary> {
        self.agents.iter().find(|agent| agent.id == id)
    }
}

/// Run a scenario for its configured number of ticks, or `ticks` when given.
pub fn run(scenario: &Scenario, ticks: Option<u64>) -> Result<RunSummary> {
    scenario.validate()?;
    let mut world = scenario.build_world();
    let mut agents = scenario.build_agents()?;
    let ticks = ticks.unwrap_or(scenario.sim.ticks);

    let mut summaries: BTreeMap<AgentHandle, AgentSummary> = agents
        .iter()
        .map(|agent| {
            let id = agent.id();
            (
                id,
                AgentSummary {
                    id: id.0,
                    ..AgentSummary::default()
                },
            )
        })
        .collect();

    tracing::info!(
        agents = agents.len(),
        ticks,
        seed = scenario.sim.seed,
        "starting scenario"
    );

    let mut ctx = TickContext::new(0, scenario.sim.dt_seconds, scenario.sim.seed);
    for _ in 0..ticks {
        for (id, report) in tick_agents(&ctx, &mut world, &mut agents) {
            let Some(summary) = summaries.get_mut(&id) else {
                continue;
            };
            if let Some(name) = &report.preempted {
                summary.preemptions += 1;
                tracing::info!(tick = ctx.tick, agent = %id, task = %name, "preempted");
            }
            if let Some(name) = &report.selected {
                tracing::info!(tick = ctx.tick, agent = %id, task = %name, idle = report.idle, "started");
            }
            for error in &report.errors {
                tracing::debug!(tick = ctx.tick, agent = %id, %error, "task problem");
                if let TaskError::Locked { name } = error {
                    if !summary.locked_out.iter().any(|n| n == name) {
                        summary.locked_out.push(name.to_string());
                    }
                }
            }
            if report.outcome == Some(ActionStatus::Failure) {
                summary.failures += 1;
            }
        }
        ctx = ctx.next();
    }

    for agent in &agents {
        let Some(summary) = summaries.get_mut(&agent.id()) else {
            continue;
        };
        summary.final_cell = agent.nav.cell();
        summary.active = agent.scheduler.active_task().map(|t| t.name().to_owned());
        summary.pending = agent.scheduler.pending_len();
        if let Some(log) = agent.blackboard.get(TRACE_LOG) {
            summary.completed = log
                .subjects("task.success")
                .into_iter()
                .map(str::to_owned)
                .collect();
            summary.traces = log.events.clone();
        }
        tracing::info!(
            agent = summary.id,
            cell = %summary.final_cell,
            completed = summary.completed.len(),
            failures = summary.failures,
            "agent finished"
        );
    }

    Ok(RunSummary {
        ticks,
        moves: world.moves().clone(),
        agents: summaries.into_values().collect(),
    })
}
