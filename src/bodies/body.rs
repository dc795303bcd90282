use crate::bodies::body_flags::BodyFlags;
use crate::bodies::{BodyRole, Shape};
use crate::core::{BodyHandle, SimulationConfig};
use crate::math::Vec2;

/// A rigid body for 2D physics simulation.
///
/// Kinematic state is integrated in two phases: `update_velocity` applies
/// accumulated forces, gravity, damping and the sleep heuristic, and
/// `update_position` performs semi-implicit Euler integration. The world
/// drives both; collision impulses arrive between the two through
/// `apply_impulse_at`.
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    force: Vec2,

    angle: f32,
    angular_velocity: f32,
    torque: f32,

    mass: f32,
    inv_mass: f32,
    inertia: f32,
    inv_inertia: f32,

    /// Coefficient of restitution (bounciness), nominally 0-1
    restitution: f32,

    /// Coefficient of friction, nominally 0-1
    friction: f32,

    shape: Shape,
    is_static: bool,

    flags: BodyFlags,

    /// How long the body has been below the sleep thresholds
    sleep_timer: f32,

    /// Stable identity, assigned by the world's storage on add
    pub(crate) id: BodyHandle,

    /// Host-assigned tag, never inspected by the core
    role: BodyRole,
}

impl Body {
    /// Creates a new dynamic body with the given shape and position.
    /// Mass defaults to 1, restitution and friction to 0.5.
    pub fn new(shape: Shape, position: Vec2) -> Self {
        let mut body = Self {
            position,
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            angle: 0.0,
            angular_velocity: 0.0,
            torque: 0.0,
            mass: 1.0,
            inv_mass: 0.0,
            inertia: 0.0,
            inv_inertia: 0.0,
            restitution: 0.5,
            friction: 0.5,
            shape,
            is_static: false,
            flags: BodyFlags::CAN_SLEEP,
            sleep_timer: 0.0,
            id: BodyHandle::INVALID,
            role: BodyRole::None,
        };
        body.recalculate_mass_properties();
        body
    }

    /// Creates a new static body with the given shape and position
    pub fn new_static(shape: Shape, position: Vec2) -> Self {
        let mut body = Self::new(shape, position);
        body.is_static = true;
        body.recalculate_mass_properties();
        body
    }

    /// Returns the body's identity within its world
    pub fn get_id(&self) -> BodyHandle {
        self.id
    }

    /// Returns the body's position
    pub fn get_position(&self) -> Vec2 {
        self.position
    }

    /// Sets the body's position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Returns the body's linear velocity
    pub fn get_velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Sets the body's linear velocity and wakes the body
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.wake();
    }

    /// Returns the body's rotation angle in radians
    pub fn get_angle(&self) -> f32 {
        self.angle
    }

    /// Sets the body's rotation angle in radians
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Returns the body's angular velocity in radians per second
    pub fn get_angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Sets the body's angular velocity and wakes the body
    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
        self.wake();
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the body's mass and recomputes the derived mass properties
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.recalculate_mass_properties();
    }

    /// Returns the body's inverse mass (0 for static or zero-mass bodies)
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Returns the body's moment of inertia
    pub fn get_inertia(&self) -> f32 {
        self.inertia
    }

    /// Returns the body's inverse moment of inertia
    pub fn get_inverse_inertia(&self) -> f32 {
        self.inv_inertia
    }

    /// Returns the body's restitution coefficient
    pub fn get_restitution(&self) -> f32 {
        self.restitution
    }

    /// Sets the body's restitution coefficient
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution;
    }

    /// Returns the body's friction coefficient
    pub fn get_friction(&self) -> f32 {
        self.friction
    }

    /// Sets the body's friction coefficient
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction;
    }

    /// Returns the body's collision shape
    pub fn get_shape(&self) -> Shape {
        self.shape
    }

    /// Sets the body's collision shape and recomputes mass properties
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.recalculate_mass_properties();
    }

    /// Returns the host-assigned role tag
    pub fn get_role(&self) -> BodyRole {
        self.role
    }

    /// Sets the host-assigned role tag
    pub fn set_role(&mut self, role: BodyRole) {
        self.role = role;
    }

    /// Returns whether the body is static
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Toggles the body between static and dynamic.
    ///
    /// Becoming static zeroes all motion state; becoming dynamic wakes the
    /// body. Mass properties are recomputed either way.
    pub fn set_static(&mut self, is_static: bool) {
        if self.is_static == is_static {
            return;
        }

        self.is_static = is_static;

        if is_static {
            self.velocity = Vec2::zero();
            self.angular_velocity = 0.0;
            self.force = Vec2::zero();
            self.torque = 0.0;
        } else {
            self.wake();
        }

        self.recalculate_mass_properties();
    }

    /// Returns whether the body is sleeping
    pub fn is_sleeping(&self) -> bool {
        self.flags.contains(BodyFlags::SLEEPING)
    }

    /// Returns whether the body is allowed to sleep
    pub fn can_sleep(&self) -> bool {
        self.flags.contains(BodyFlags::CAN_SLEEP)
    }

    /// Sets whether the body is allowed to sleep; disallowing wakes it
    pub fn set_can_sleep(&mut self, can_sleep: bool) {
        if can_sleep {
            self.flags.insert(BodyFlags::CAN_SLEEP);
        } else {
            self.flags.remove(BodyFlags::CAN_SLEEP);
            self.wake();
        }
    }

    /// Wakes the body and resets its sleep timer
    pub fn wake(&mut self) {
        self.flags.remove(BodyFlags::SLEEPING);
        self.sleep_timer = 0.0;
    }

    /// Puts a dynamic body to sleep, zeroing its velocities
    pub fn put_to_sleep(&mut self) {
        if !self.is_static && self.can_sleep() {
            self.flags.insert(BodyFlags::SLEEPING);
            self.velocity = Vec2::zero();
            self.angular_velocity = 0.0;
        }
    }

    /// Returns the accumulated sleep timer in seconds
    pub fn get_sleep_timer(&self) -> f32 {
        self.sleep_timer
    }

    /// Accumulates a force on the body. No-op for static bodies.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
    }

    /// Accumulates a torque on the body. No-op for static bodies.
    pub fn apply_torque(&mut self, torque: f32) {
        if self.is_static {
            return;
        }
        self.torque += torque;
    }

    /// Applies an impulse at the center of mass. No-op for static bodies.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.inv_mass;
    }

    /// Applies an impulse with a lever arm from the center of mass to the
    /// contact point. The angular change is the 2D scalar cross of the
    /// lever arm and the impulse, scaled by the inverse inertia.
    pub fn apply_impulse_at(&mut self, impulse: Vec2, contact_offset: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += contact_offset.cross(&impulse) * self.inv_inertia;
    }

    /// Integrates forces into velocities, applies damping, and runs the
    /// sleep heuristic. No-op for static or sleeping bodies.
    pub fn update_velocity(&mut self, dt: f32, gravity: Vec2, config: &SimulationConfig) {
        if self.is_static || self.is_sleeping() {
            return;
        }

        self.apply_force(gravity * self.mass);
        self.velocity += self.force * self.inv_mass * dt;
        self.angular_velocity += self.torque * self.inv_inertia * dt;

        self.force = Vec2::zero();
        self.torque = 0.0;

        // Flat per-call damping, tuned for playability rather than derived
        // from a drag model.
        self.velocity *= config.linear_damping;
        self.angular_velocity *= config.angular_damping;

        let speed = self.velocity.length();
        let angular_speed = self.angular_velocity.abs();

        if speed < config.linear_sleep_threshold && angular_speed < config.angular_sleep_threshold {
            self.sleep_timer += dt;
            if config.allow_sleeping
                && self.can_sleep()
                && self.sleep_timer > config.sleep_time_threshold
            {
                self.flags.insert(BodyFlags::SLEEPING);
                self.velocity = Vec2::zero();
                self.angular_velocity = 0.0;
            }
        } else {
            self.sleep_timer = 0.0;
            self.flags.remove(BodyFlags::SLEEPING);
        }
    }

    /// Semi-implicit Euler position integration. No-op for static or
    /// sleeping bodies.
    pub fn update_position(&mut self, dt: f32) {
        if self.is_static || self.is_sleeping() {
            return;
        }

        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
    }

    /// Returns the four world-space corners of a rectangle body, or `None`
    /// for circles.
    pub fn get_vertices(&self) -> Option<[Vec2; 4]> {
        match self.shape {
            Shape::Rectangle { width, height } => {
                let hw = width / 2.0;
                let hh = height / 2.0;

                let corners = [
                    Vec2::new(-hw, -hh),
                    Vec2::new(hw, -hh),
                    Vec2::new(hw, hh),
                    Vec2::new(-hw, hh),
                ];

                Some(corners.map(|corner| corner.rotate(self.angle) + self.position))
            }
            Shape::Circle { .. } => None,
        }
    }

    /// Recomputes inverse mass and inertia. Static or zero-mass bodies get
    /// inverse mass and inertia of exactly zero, never a NaN from 1/0.
    fn recalculate_mass_properties(&mut self) {
        if self.is_static || self.mass == 0.0 {
            self.inv_mass = 0.0;
            self.inertia = 0.0;
            self.inv_inertia = 0.0;
            return;
        }

        self.inv_mass = 1.0 / self.mass;
        self.inertia = self.shape.inertia(self.mass);
        self.inv_inertia = if self.inertia == 0.0 {
            0.0
        } else {
            1.0 / self.inertia
        };
    }
}
