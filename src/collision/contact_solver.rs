//! Sequential impulse contact resolution.
//!
//! Velocity resolution applies a restitution impulse along the contact
//! normal and a Coulomb-clamped friction impulse along the tangent, one
//! manifold at a time. Positional correction bleeds off a fraction of the
//! remaining penetration each step instead of removing it all at once, so
//! stacked bodies settle without gaining energy.

use crate::bodies::Body;
use crate::collision::ContactManifold;
use crate::core::{BodyStorage, SimulationConfig};
use crate::math::Vec2;

/// Per-body state gathered before impulses are computed, so the storage is
/// only borrowed mutably at apply time.
struct ContactBody {
    position: Vec2,
    velocity: Vec2,
    angular_velocity: f32,
    inv_mass: f32,
    inv_inertia: f32,
    restitution: f32,
    friction: f32,
    is_static: bool,
}

impl ContactBody {
    fn gather(body: &Body) -> Self {
        Self {
            position: body.get_position(),
            velocity: body.get_velocity(),
            angular_velocity: body.get_angular_velocity(),
            inv_mass: body.get_inverse_mass(),
            inv_inertia: body.get_inverse_inertia(),
            restitution: body.get_restitution(),
            friction: body.get_friction(),
            is_static: body.is_static(),
        }
    }

    /// Velocity of the body at a contact point offset `r` from its center.
    /// The 2D cross of a scalar spin and a lever arm is `(-w*r.y, w*r.x)`.
    fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.velocity
            + Vec2::new(
                -self.angular_velocity * r.y,
                self.angular_velocity * r.x,
            )
    }
}

/// Resolves contact manifolds by applying impulses at contact points.
pub struct SequentialImpulseSolver {
    restitution_velocity_threshold: f32,
    friction_velocity_threshold: f32,
    penetration_slop: f32,
    position_correction_percent: f32,
}

impl SequentialImpulseSolver {
    /// Creates a solver using the thresholds from the given configuration
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            restitution_velocity_threshold: config.restitution_velocity_threshold,
            friction_velocity_threshold: config.friction_velocity_threshold,
            penetration_slop: config.penetration_slop,
            position_correction_percent: config.position_correction_percent,
        }
    }

    /// Applies normal and friction impulses for one manifold.
    ///
    /// Separating contacts are skipped. Restitution is forced to zero when
    /// the closing speed is below the resting-contact threshold, which
    /// suppresses gravity-induced micro-bounce.
    pub fn solve_velocity(&self, bodies: &mut BodyStorage, manifold: &ContactManifold) {
        let (a, b) = match (
            bodies.get(manifold.pair.body_a),
            bodies.get(manifold.pair.body_b),
        ) {
            (Some(a), Some(b)) => (ContactBody::gather(a), ContactBody::gather(b)),
            _ => return,
        };

        let normal = manifold.normal;
        let contact = manifold.contacts.first().copied().unwrap_or(a.position);
        let r_a = contact - a.position;
        let r_b = contact - b.position;

        let relative_velocity = b.velocity_at(r_b) - a.velocity_at(r_a);
        let closing_speed = relative_velocity.dot(&normal);

        // Already separating
        if closing_speed > 0.0 {
            return;
        }

        let mut restitution = a.restitution.min(b.restitution);
        if closing_speed > -self.restitution_velocity_threshold {
            restitution = 0.0;
        }

        let r_a_cross_n = r_a.cross(&normal);
        let r_b_cross_n = r_b.cross(&normal);
        let inv_mass_sum = a.inv_mass
            + b.inv_mass
            + r_a_cross_n * r_a_cross_n * a.inv_inertia
            + r_b_cross_n * r_b_cross_n * b.inv_inertia;

        // Two static or otherwise immovable bodies
        if inv_mass_sum <= 0.0 {
            return;
        }

        let j = -(1.0 + restitution) * closing_speed / inv_mass_sum;
        let impulse = normal * j;

        if !a.is_static {
            if let Some(body) = bodies.get_mut(manifold.pair.body_a) {
                body.apply_impulse_at(-impulse, r_a);
            }
        }
        if !b.is_static {
            if let Some(body) = bodies.get_mut(manifold.pair.body_b) {
                body.apply_impulse_at(impulse, r_b);
            }
        }

        // Friction, from the pre-impulse relative velocity
        let tangent_velocity = relative_velocity - normal * closing_speed;
        let tangent_speed = tangent_velocity.length();

        // Below this, friction only injects jitter
        if tangent_speed < self.friction_velocity_threshold {
            return;
        }

        let tangent = tangent_velocity / tangent_speed;

        let r_a_cross_t = r_a.cross(&tangent);
        let r_b_cross_t = r_b.cross(&tangent);
        let inv_mass_sum_tangent = a.inv_mass
            + b.inv_mass
            + r_a_cross_t * r_a_cross_t * a.inv_inertia
            + r_b_cross_t * r_b_cross_t * b.inv_inertia;

        if inv_mass_sum_tangent <= 0.0 {
            return;
        }

        // Impulse that would cancel all tangential motion, clamped to the
        // Coulomb cone of the normal impulse
        let jt = -relative_velocity.dot(&tangent) / inv_mass_sum_tangent;
        let mu = (a.friction * b.friction).sqrt();
        let max_jt = j * mu;

        let friction_magnitude = if jt.abs() < max_jt {
            jt
        } else if jt > 0.0 {
            max_jt
        } else {
            -max_jt
        };
        let friction_impulse = tangent * friction_magnitude;

        if !a.is_static {
            if let Some(body) = bodies.get_mut(manifold.pair.body_a) {
                body.apply_impulse_at(-friction_impulse, r_a);
            }
        }
        if !b.is_static {
            if let Some(body) = bodies.get_mut(manifold.pair.body_b) {
                body.apply_impulse_at(friction_impulse, r_b);
            }
        }
    }

    /// Pushes the pair apart along the normal to reduce penetration.
    ///
    /// Penetration within the slop is tolerated; the remainder is corrected
    /// by a fixed percentage, split between the bodies proportional to
    /// inverse mass. Static bodies never move.
    pub fn solve_position(&self, bodies: &mut BodyStorage, manifold: &ContactManifold) {
        let (a, b) = match (
            bodies.get(manifold.pair.body_a),
            bodies.get(manifold.pair.body_b),
        ) {
            (Some(a), Some(b)) => (ContactBody::gather(a), ContactBody::gather(b)),
            _ => return,
        };

        let inv_mass_sum = a.inv_mass + b.inv_mass;
        if inv_mass_sum <= 0.0 {
            return;
        }

        let correction_magnitude = (manifold.depth - self.penetration_slop).max(0.0)
            / inv_mass_sum
            * self.position_correction_percent;
        if correction_magnitude <= 0.0 {
            return;
        }

        let correction = manifold.normal * correction_magnitude;

        if !a.is_static {
            if let Some(body) = bodies.get_mut(manifold.pair.body_a) {
                body.set_position(a.position - correction * a.inv_mass);
            }
        }
        if !b.is_static {
            if let Some(body) = bodies.get_mut(manifold.pair.body_b) {
                body.set_position(b.position + correction * b.inv_mass);
            }
        }
    }
}
