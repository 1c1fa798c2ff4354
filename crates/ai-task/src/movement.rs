//! Stock scripts that move an agent through the voxel world.

use ai_core::{ActionStatus, Blackboard, DeterministicRng, TickContext};
use ai_nav::{
    GoalRegion, NavAgent, NavPath, NavWorldMut, PathFollower, PathPlanner, PlanPoll, PlanTicket,
    PlanWorker, PlannerConfig, SearchStats,
};
use ai_tools::{emit as trace_emit, TraceEvent};

use crate::script::Script;

const GREEDY_STREAM: u64 = 0x6752_4545_4459;
const WANDER_STREAM: u64 = 0x5741_4e44_4552;

fn trace_plan(blackboard: &mut Blackboard, ctx: &TickContext, tag: &'static str, a: u64, b: u64) {
    trace_emit(blackboard, TraceEvent::new(ctx.tick, tag).with_a(a).with_b(b));
}

enum GoToState {
    Idle,
    Planning(PlanTicket),
    Following(PathFollower),
}

/// Plan a path to a goal region, then follow it.
///
/// Plans inline by default. With [`GoToScript::off_thread`] the search runs on a [`PlanWorker`]
/// whenever the world can hand out a voxel snapshot, and the script reports `Running` until the
/// result arrives.
pub struct GoToScript<G> {
    goal: G,
    planner: PlannerConfig,
    worker: Option<PlanWorker>,
    state: GoToState,
}

impl<G> GoToScript<G>
where
    G: GoalRegion + Clone + Send + 'static,
{
    pub fn new(goal: G) -> Self {
        Self {
            goal,
            planner: PlannerConfig::default(),
            worker: None,
            state: GoToState::Idle,
        }
    }

    pub fn with_planner(mut self, planner: PlannerConfig) -> Self {
        self.planner = planner;
        if self.worker.is_some() {
            self.worker = Some(PlanWorker::new(planner));
        }
        self
    }

    pub fn off_thread(mut self) -> Self {
        self.worker = Some(PlanWorker::new(self.planner));
        self
    }

    pub fn goal(&self) -> &G {
        &self.goal
    }

    fn plan_found(
        blackboard: &mut Blackboard,
        ctx: &TickContext,
        path: NavPath,
        stats: SearchStats,
    ) -> GoToState {
        trace_plan(
            blackboard,
            ctx,
            "nav.plan.found",
            path.len() as u64,
            stats.expansions as u64,
        );
        GoToState::Following(PathFollower::new(path))
    }
}

impl<W, G> Script<W> for GoToScript<G>
where
    W: NavWorldMut + 'static,
    G: GoalRegion + Clone + Send + 'static,
{
    fn initialize(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &W) {
        self.state = GoToState::Idle;
    }

    fn step(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> ActionStatus {
        loop {
            let next = match &mut self.state {
                GoToState::Idle => {
                    let start = agent.cell();
                    if self.goal.is_in_region(start) {
                        return ActionStatus::Success;
                    }
                    let snapshot = self
                        .worker
                        .as_ref()
                        .and_then(|worker| world.voxel_snapshot().map(|s| (worker, s)));
                    if let Some((worker, snapshot)) = snapshot {
                        let ticket =
                            worker.request(snapshot, agent.motion.clone(), start, self.goal.clone());
                        trace_plan(blackboard, ctx, "nav.plan.pending", 0, 0);
                        self.state = GoToState::Planning(ticket);
                        return ActionStatus::Running;
                    }

                    let mut planner = PathPlanner::new(self.planner);
                    let result = planner.find_path(world.voxels(), &agent.motion, start, &self.goal);
                    let stats = planner.last_stats();
                    match result {
                        Ok(path) => Self::plan_found(blackboard, ctx, path, stats),
                        Err(err) => {
                            tracing::debug!(%start, error = %err, "go-to planning failed");
                            trace_plan(blackboard, ctx, "nav.plan.failed", stats.expansions as u64, 0);
                            return ActionStatus::Failure;
                        }
                    }
                }
                GoToState::Planning(ticket) => match ticket.poll() {
                    PlanPoll::Pending => return ActionStatus::Running,
                    PlanPoll::Ready(Ok(path)) => {
                        let stats = ticket.stats().unwrap_or_default();
                        Self::plan_found(blackboard, ctx, path, stats)
                    }
                    PlanPoll::Ready(Err(err)) => {
                        tracing::debug!(error = %err, "go-to worker planning failed");
                        trace_plan(blackboard, ctx, "nav.plan.failed", 0, 0);
                        return ActionStatus::Failure;
                    }
                },
                GoToState::Following(follower) => return follower.tick(ctx, agent, world),
            };
            self.state = next;
        }
    }

    fn cancel(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &mut W) {
        // Dropping an in-flight ticket discards its result.
        self.state = GoToState::Idle;
    }
}

/// Take one successor per move, the one that looks closest to the goal (plus random jitter).
///
/// A fallback for when a full plan cannot be found; fails after `max_steps` moves or when the
/// agent has nowhere to go.
pub struct GreedyStepScript<G> {
    goal: G,
    jitter: f32,
    max_steps: u32,
    steps: u32,
    current: Option<PathFollower>,
}

impl<G> GreedyStepScript<G>
where
    G: GoalRegion + 'static,
{
    pub fn new(goal: G) -> Self {
        Self {
            goal,
            jitter: 5.0,
            max_steps: 100,
            steps: 0,
            current: None,
        }
    }

    /// Upper bound of the uniform noise added to each candidate's heuristic.
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter.max(0.0);
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl<W, G> Script<W> for GreedyStepScript<G>
where
    W: NavWorldMut + 'static,
    G: GoalRegion + 'static,
{
    fn initialize(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &W) {
        self.steps = 0;
        self.current = None;
    }

    fn step(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> ActionStatus {
        if let Some(follower) = self.current.as_mut() {
            match follower.tick(ctx, agent, world) {
                ActionStatus::Running => return ActionStatus::Running,
                ActionStatus::Failure => return ActionStatus::Failure,
                ActionStatus::Success => self.current = None,
            }
            return if self.goal.is_in_region(agent.cell()) {
                ActionStatus::Success
            } else {
                ActionStatus::Running
            };
        }

        if self.goal.is_in_region(agent.cell()) {
            return ActionStatus::Success;
        }
        if self.steps >= self.max_steps {
            return ActionStatus::Failure;
        }

        let mut rng = ctx.rng_for_agent(agent.id, GREEDY_STREAM ^ self.steps as u64);
        let mut best = None;
        let mut best_score = f32::INFINITY;
        for action in agent.motion.generate_successors(world.voxels(), agent.cell()) {
            let score = self.goal.heuristic(action.destination) + rng.next_range_f32(0.0, self.jitter);
            if score < best_score {
                best_score = score;
                best = Some(action);
            }
        }
        let Some(action) = best else {
            return ActionStatus::Failure;
        };

        self.steps += 1;
        let mut follower = PathFollower::new(NavPath::new(vec![action]));
        let status = follower.tick(ctx, agent, world);
        match status {
            ActionStatus::Running => {
                self.current = Some(follower);
                ActionStatus::Running
            }
            ActionStatus::Failure => ActionStatus::Failure,
            ActionStatus::Success if self.goal.is_in_region(agent.cell()) => ActionStatus::Success,
            ActionStatus::Success => ActionStatus::Running,
        }
    }

    fn cancel(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &mut W) {
        self.current = None;
    }
}

/// Random walk of a fixed number of moves.
#[derive(Debug, Clone)]
pub struct WanderScript {
    moves: u32,
    done: u32,
    current: Option<PathFollower>,
}

impl WanderScript {
    pub fn new(moves: u32) -> Self {
        Self {
            moves,
            done: 0,
            current: None,
        }
    }
}

impl<W> Script<W> for WanderScript
where
    W: NavWorldMut + 'static,
{
    fn initialize(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &W) {
        self.done = 0;
        self.current = None;
    }

    fn step(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> ActionStatus {
        if let Some(follower) = self.current.as_mut() {
            match follower.tick(ctx, agent, world) {
                ActionStatus::Running => return ActionStatus::Running,
                // Blocked mid-wander: just stop.
                ActionStatus::Failure => return ActionStatus::Success,
                ActionStatus::Success => self.current = None,
            }
        }
        if self.done >= self.moves {
            return ActionStatus::Success;
        }

        let options = agent.motion.generate_successors(world.voxels(), agent.cell());
        let mut rng = ctx.rng_for_agent(agent.id, WANDER_STREAM ^ self.done as u64);
        let Some(action) = rng.next_index(options.len()).map(|i| options[i]) else {
            return ActionStatus::Success;
        };
        self.done += 1;
        self.current = Some(PathFollower::new(NavPath::new(vec![action])));
        ActionStatus::Running
    }

    fn cancel(&mut self, _ctx: &TickContext, _agent: &NavAgent<W::Agent>, _world: &mut W) {
        self.current = None;
    }
}
