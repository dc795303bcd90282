use crate::collision::CollisionPair;
use crate::math::Vec2;

/// Contact information for a colliding pair of bodies.
#[derive(Debug, Clone)]
pub struct ContactManifold {
    /// The pair of bodies in contact
    pub pair: CollisionPair,

    /// Unit contact normal, pointing from body A towards body B
    pub normal: Vec2,

    /// Penetration depth along the normal (non-negative)
    pub depth: f32,

    /// World-space contact points (at least one)
    pub contacts: Vec<Vec2>,
}

impl ContactManifold {
    /// Creates a new contact manifold with a single contact point
    pub fn new(pair: CollisionPair, normal: Vec2, depth: f32, contact: Vec2) -> Self {
        Self {
            pair,
            normal,
            depth,
            contacts: vec![contact],
        }
    }
}
