use crate::AgentId;

/// Read-only world access.
///
/// The core crate does not prescribe which queries a world must expose; the navigation crate
/// layers voxel occupancy on top of this, and task scripts layer movement intents on top of that.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink.
///
/// Scripts only ever write intents through this; the simulation that owns the world decides how
/// those intents turn into physics or animation.
pub trait WorldMut: WorldView {}
