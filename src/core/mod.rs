pub mod config;
pub mod events;
pub mod storage;
pub mod world;

pub use self::config::SimulationConfig;
pub use self::events::{CollisionEvent, CollisionListener};
pub use self::storage::BodyStorage;
pub use self::world::PhysicsWorld;

/// A unique identifier for a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Handle of a body not yet added to a world
    pub(crate) const INVALID: Self = Self(0);
}
