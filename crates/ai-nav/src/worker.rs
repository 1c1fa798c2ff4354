//! Off-thread planning with a single-writer completion slot.

use std::sync::Arc;
use std::thread;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::planner::search;
use crate::{Cell, GoalRegion, MotionModel, NavPath, PlanError, PlannerConfig, SearchStats, VoxelView};

/// Shared, read-only voxel snapshot handed to worker threads.
pub type VoxelSnapshot = Arc<dyn VoxelView + Send + Sync>;

pub type PlanResult = Result<NavPath, PlanError>;

#[derive(Debug)]
pub enum PlanPoll {
    Pending,
    Ready(PlanResult),
}

impl PlanPoll {
    pub fn is_pending(&self) -> bool {
        matches!(self, PlanPoll::Pending)
    }
}

/// Handle to an in-flight request. Dropping it discards the result.
#[derive(Debug)]
pub struct PlanTicket {
    rx: Option<oneshot::Receiver<(PlanResult, SearchStats)>>,
    stats: Option<SearchStats>,
}

impl PlanTicket {
    /// Check for a result without blocking. `Ready` is returned exactly once; later polls report
    /// [`PlanError::WorkerGone`].
    pub fn poll(&mut self) -> PlanPoll {
        let Some(rx) = self.rx.as_mut() else {
            return PlanPoll::Ready(Err(PlanError::WorkerGone));
        };
        match rx.try_recv() {
            Ok((result, stats)) => {
                self.rx = None;
                self.stats = Some(stats);
                PlanPoll::Ready(result)
            }
            Err(TryRecvError::Empty) => PlanPoll::Pending,
            Err(TryRecvError::Closed) => {
                self.rx = None;
                PlanPoll::Ready(Err(PlanError::WorkerGone))
            }
        }
    }

    /// Search stats, once the result has been taken.
    pub fn stats(&self) -> Option<SearchStats> {
        self.stats
    }
}

/// Spawns one background search per request.
#[derive(Debug, Clone, Default)]
pub struct PlanWorker {
    config: PlannerConfig,
}

impl PlanWorker {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn request<G>(
        &self,
        voxels: VoxelSnapshot,
        motion: MotionModel,
        start: Cell,
        goal: G,
    ) -> PlanTicket
    where
        G: GoalRegion + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let PlannerConfig {
            max_expansions,
            heuristic_weight,
        } = self.config;

        let spawned = thread::Builder::new()
            .name("ai-nav-plan".to_string())
            .spawn(move || {
                let outcome = search(
                    voxels.as_ref(),
                    &motion,
                    start,
                    &goal,
                    max_expansions,
                    heuristic_weight,
                );
                // The ticket may be gone already; the result is then simply dropped.
                let _ = tx.send(outcome);
            });
        if let Err(err) = spawned {
            // The sender was moved into the failed closure and is dropped with it, so the
            // ticket reports `WorkerGone` on its first poll.
            tracing::warn!(error = %err, "failed to spawn plan worker thread");
        }

        PlanTicket {
            rx: Some(rx),
            stats: None,
        }
    }
}
