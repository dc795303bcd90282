use crate::core::BodyHandle;
use crate::math::Vec2;

/// Callback invoked once per collision manifold, before any impulses are
/// applied for that step.
pub type CollisionListener = Box<dyn FnMut(&CollisionEvent)>;

/// A collision between two bodies, as seen by the host.
///
/// The velocity fields are snapshots taken at detection time, before the
/// solver has run, so the host can compute impact force or damage from the
/// true incoming closing speed rather than the post-impulse velocities.
#[derive(Debug, Clone)]
pub struct CollisionEvent {
    /// The first body in the collision
    pub body_a: BodyHandle,

    /// The second body in the collision
    pub body_b: BodyHandle,

    /// Contact normal, pointing from body A to body B
    pub normal: Vec2,

    /// Penetration depth along the normal
    pub depth: f32,

    /// World-space contact points (at least one)
    pub contacts: Vec<Vec2>,

    /// Body A's linear velocity at detection time
    pub velocity_a: Vec2,

    /// Body B's linear velocity at detection time
    pub velocity_b: Vec2,

    /// Body A's angular velocity at detection time
    pub angular_velocity_a: f32,

    /// Body B's angular velocity at detection time
    pub angular_velocity_b: f32,
}

impl CollisionEvent {
    /// Relative speed along the contact normal at detection time.
    /// Negative values mean the bodies were approaching.
    pub fn closing_speed(&self) -> f32 {
        (self.velocity_b - self.velocity_a).dot(&self.normal)
    }
}
