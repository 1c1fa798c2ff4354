use ai_core::{ActionStatus, TickContext};

use crate::{NavAgent, NavPath, NavWorldMut, Position};

/// Advances a [`NavAgent`] along a [`NavPath`], one tick at a time.
///
/// Each action takes `distance / (base_speed * motion.speed(kind))` seconds. The world receives
/// one `apply_move` intent when an action starts.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: NavPath,
    next_index: usize,
    progress: f32,
    announced: bool,
}

impl PathFollower {
    pub fn new(path: NavPath) -> Self {
        Self {
            path,
            next_index: 0,
            progress: 0.0,
            announced: false,
        }
    }

    pub fn path(&self) -> &NavPath {
        &self.path
    }

    pub fn remaining(&self) -> usize {
        self.path.len().saturating_sub(self.next_index)
    }

    pub fn is_finished(&self) -> bool {
        self.next_index >= self.path.len()
    }

    pub fn tick<W>(
        &mut self,
        ctx: &TickContext,
        agent: &mut NavAgent<W::Agent>,
        world: &mut W,
    ) -> ActionStatus
    where
        W: NavWorldMut,
    {
        let mut time_left = ctx.dt();

        while let Some(action) = self.path.actions.get(self.next_index).copied() {
            if agent.position.cell != action.origin {
                tracing::debug!(
                    expected = %action.origin,
                    actual = %agent.position.cell,
                    "agent left its path"
                );
                return ActionStatus::Failure;
            }
            let rate = agent.base_speed * agent.motion.speed(action.kind);
            if !(rate > 0.0 && rate.is_finite()) {
                return ActionStatus::Failure;
            }
            if !self.announced {
                if !world.voxels().contains(action.destination) {
                    return ActionStatus::Failure;
                }
                world.apply_move(agent.id, &action, rate);
                self.announced = true;
            }
            if time_left <= 0.0 {
                break;
            }

            let length = action.origin.distance(action.destination);
            let needed = (length - self.progress) / rate;
            if needed <= time_left {
                time_left -= needed;
                agent.position = Position::at(action.destination);
                self.progress = 0.0;
                self.announced = false;
                self.next_index += 1;
                continue;
            }

            self.progress += rate * time_left;
            let direction =
                (action.destination.center() - action.origin.center()).normalize_or_zero();
            agent.position.offset = direction * self.progress;
            break;
        }

        if self.is_finished() {
            ActionStatus::Success
        } else {
            ActionStatus::Running
        }
    }
}
