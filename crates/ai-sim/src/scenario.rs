//! YAML scenario format.
//!
//! Every field has a default, so the smallest valid scenario is an empty document. See
//! `scenarios/courtyard.yaml` for a full example.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use ai_core::AgentHandle;
use ai_nav::{
    AdjacentGoal, Bounds, Cell, CellGoal, FactionId, InteractiveObject, MotionConfig, MotionModel,
    NavAgent, ObjectId, ObjectKind, PlannerConfig, Relationship, VoxelGrid,
};
use ai_task::{
    Agent, GoToScript, RetryPolicy, SchedulerConfig, Task, TaskPriority, TaskScheduler,
    WaitScript, WanderIdle, WanderScript,
};
use ai_tools::{TraceLog, TRACE_LOG};

use crate::SimWorld;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub sim: SimConfig,
    pub world: WorldSpec,
    pub scheduler: SchedulerConfig,
    /// Planner settings shared by every go-to task.
    pub planner: PlannerConfig,
    pub agents: Vec<AgentSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub ticks: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 200,
            dt_seconds: 0.25,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSpec {
    pub size: Bounds,
    /// Make the bottom layer solid.
    pub floor: bool,
    pub solid: Vec<Cell>,
    pub liquid: Vec<LiquidSpec>,
    pub objects: Vec<ObjectSpec>,
    pub relationships: Vec<RelationshipSpec>,
    pub default_relationship: Relationship,
}

impl Default for WorldSpec {
    fn default() -> Self {
        Self {
            size: Bounds::new(16, 4, 16),
            floor: true,
            solid: Vec::new(),
            liquid: Vec::new(),
            objects: Vec::new(),
            relationships: Vec::new(),
            default_relationship: Relationship::Indifferent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidSpec {
    pub cell: Cell,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectSpec {
    Ladder { id: u64, cell: Cell },
    Door { id: u64, cell: Cell, owner: u32 },
    Prop { id: u64, cell: Cell },
}

impl ObjectSpec {
    fn placed(&self) -> (Cell, InteractiveObject) {
        match *self {
            ObjectSpec::Ladder { id, cell } => {
                (cell, InteractiveObject::new(ObjectId(id), ObjectKind::Climbable))
            }
            ObjectSpec::Door { id, cell, owner } => (
                cell,
                InteractiveObject::new(
                    ObjectId(id),
                    ObjectKind::Barrier {
                        owner: FactionId(owner),
                    },
                ),
            ),
            ObjectSpec::Prop { id, cell } => {
                (cell, InteractiveObject::new(ObjectId(id), ObjectKind::Prop))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationshipSpec {
    pub a: u32,
    pub b: u32,
    pub relationship: Relationship,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSpec {
    pub id: u32,
    pub start: Cell,
    pub motion: MotionConfig,
    pub base_speed: f32,
    /// Wander when there is nothing else to do.
    pub idle: bool,
    pub tasks: Vec<TaskSpec>,
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            id: 0,
            start: Cell::new(1, 1, 1),
            motion: MotionConfig::default(),
            base_speed: 1.0,
            idle: false,
            tasks: Vec::new(),
        }
    }
}

/// A task queued on an agent at the start of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskSpec {
    /// Walk to a cell.
    GoTo {
        name: String,
        target: Cell,
        #[serde(default)]
        priority: TaskPriority,
        #[serde(default)]
        retry: RetryPolicy,
        /// Plan on a worker thread.
        #[serde(default)]
        off_thread: bool,
    },
    /// Walk next to a cell, which may itself be solid.
    Approach {
        name: String,
        target: Cell,
        #[serde(default)]
        priority: TaskPriority,
        #[serde(default)]
        retry: RetryPolicy,
    },
    Wait {
        name: String,
        seconds: f32,
        #[serde(default)]
        priority: TaskPriority,
    },
    Wander {
        name: String,
        moves: u32,
        #[serde(default)]
        priority: TaskPriority,
    },
    LeaveWorld,
}

impl TaskSpec {
    pub fn build(&self, planner: PlannerConfig, bounds: Bounds) -> Task<SimWorld> {
        match self.clone() {
            TaskSpec::GoTo {
                name,
                target,
                priority,
                retry,
                off_thread,
            } => Task::new(name, move || {
                let script = GoToScript::new(CellGoal(target)).with_planner(planner);
                if off_thread {
                    script.off_thread()
                } else {
                    script
                }
            })
            .with_priority(priority)
            .with_retry(retry),
            TaskSpec::Approach {
                name,
                target,
                priority,
                retry,
            } => Task::new(name, move || {
                GoToScript::new(AdjacentGoal(target)).with_planner(planner)
            })
            .with_priority(priority)
            .with_retry(retry),
            TaskSpec::Wait {
                name,
                seconds,
                priority,
            } => Task::new(name, move || WaitScript::new(seconds))
                .with_priority(priority)
                .with_retry(RetryPolicy::Never),
            TaskSpec::Wander {
                name,
                moves,
                priority,
            } => Task::new(name, move || WanderScript::new(moves))
                .with_priority(priority)
                .with_retry(RetryPolicy::Never),
            TaskSpec::LeaveWorld => Task::leave_world(bounds),
        }
    }
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = self.world.size;
        if bounds.is_empty() {
            bail!("world size must be non-zero in every dimension");
        }
        if !(self.sim.dt_seconds.is_finite() && self.sim.dt_seconds > 0.0) {
            bail!("dt_seconds must be positive, got {}", self.sim.dt_seconds);
        }

        let mut ids = BTreeSet::new();
        for agent in &self.agents {
            if !ids.insert(agent.id) {
                bail!("duplicate agent id {}", agent.id);
            }
            if !bounds.contains(agent.start) {
                bail!("agent {} starts outside the world at {}", agent.id, agent.start);
            }
            MotionModel::from_config(&agent.motion)
                .with_context(|| format!("agent {} has an invalid motion config", agent.id))?;
        }
        Ok(())
    }

    pub fn build_world(&self) -> SimWorld {
        let spec = &self.world;
        let mut voxels = if spec.floor {
            VoxelGrid::with_floor(spec.size)
        } else {
            VoxelGrid::new(spec.size)
        };
        for &cell in &spec.solid {
            voxels.set_solid(cell, true);
        }
        for liquid in &spec.liquid {
            voxels.set_liquid(liquid.cell, liquid.level);
        }
        for object in &spec.objects {
            let (cell, object) = object.placed();
            voxels.add_object(cell, object);
        }
        voxels.set_default_relationship(spec.default_relationship);
        for rel in &spec.relationships {
            voxels.set_relationship(FactionId(rel.a), FactionId(rel.b), rel.relationship);
        }

        let mut world = SimWorld::new(voxels);
        world.share_snapshots = self.agents.iter().any(|agent| {
            agent
                .tasks
                .iter()
                .any(|task| matches!(task, TaskSpec::GoTo { off_thread: true, .. }))
        });
        world
    }

    pub fn build_agents(&self) -> Result<Vec<Agent<SimWorld>>> {
        self.agents
            .iter()
            .map(|spec| {
                let motion = MotionModel::from_config(&spec.motion)
                    .with_context(|| format!("agent {} has an invalid motion config", spec.id))?;
                let nav = NavAgent::new(AgentHandle::new(spec.id), motion, spec.start)
                    .with_base_speed(spec.base_speed);
                let mut scheduler = TaskScheduler::new(self.scheduler);
                if spec.idle {
                    scheduler = scheduler.with_idle(WanderIdle::default());
                }
                let mut agent = Agent::new(nav, scheduler);
                agent.blackboard.set(TRACE_LOG, TraceLog::default());
                for task in &spec.tasks {
                    let task = task.build(self.planner, self.world.size);
                    let name = task.name().to_owned();
                    if !agent.enqueue(task) {
                        tracing::warn!(agent = spec.id, task = %name, "duplicate task name ignored");
                    }
                }
                Ok(agent)
            })
            .collect()
    }
}
