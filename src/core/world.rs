use crate::bodies::Body;
use crate::collision::{broad_phase, narrow_phase, ContactManifold, SequentialImpulseSolver};
use crate::core::{BodyHandle, BodyStorage, CollisionEvent, CollisionListener, SimulationConfig};
use crate::error::PhysicsError;
use crate::math::Vec2;
use crate::Result;

/// Standard gravitational acceleration in meters per second squared
pub const EARTH_GRAVITY: f32 = 9.81;

/// Scale factor between world units (pixels) and meters
pub const PIXELS_PER_METER: f32 = 25.0;

/// The physics world: owns all bodies and advances the simulation.
///
/// Coordinates are y-down screen pixels, so the default gravity points in
/// positive y. Stepping is single-threaded and deterministic for a given
/// sequence of `step` calls and body insertions.
pub struct PhysicsWorld {
    /// All bodies in the world, in insertion order
    bodies: BodyStorage,

    /// Gravitational acceleration applied to every dynamic body
    gravity: Vec2,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Collision callbacks, invoked once per manifold per step
    listeners: Vec<CollisionListener>,
}

impl PhysicsWorld {
    /// Creates a new world with default configuration and downward gravity
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates a new world with the given gravity
    pub fn with_gravity(gravity: Vec2) -> Self {
        let mut world = Self::new();
        world.gravity = gravity;
        world
    }

    /// Creates a new world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            gravity: Vec2::new(0.0, EARTH_GRAVITY * PIXELS_PER_METER),
            config,
            listeners: Vec::new(),
        }
    }

    /// Gets the current gravity
    pub fn get_gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Sets the gravity for the simulation
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns a mutable reference to the simulation configuration
    pub fn get_config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Adds a body to the world and returns its handle
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = self.bodies.add(body);
        log::debug!("added body {:?}", handle);
        handle
    }

    /// Removes a body from the world, returning it
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body> {
        log::debug!("removing body {:?}", handle);
        self.bodies.remove(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle))
        })
    }

    /// Gets a reference to a body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies.get_body_mut(handle)
    }

    /// Iterates all bodies in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter()
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Registers a collision callback.
    ///
    /// Callbacks fire once per contact manifold per step, after detection
    /// and before any impulses are applied, so the event carries the true
    /// incoming velocities.
    pub fn on_collision(&mut self, listener: impl FnMut(&CollisionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Removes all bodies from the world. Registered listeners are kept.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// The pipeline runs in a fixed order every step: integrate forces into
    /// velocities, detect contacts, notify listeners, resolve velocities
    /// iteratively, integrate positions, then correct residual penetration.
    pub fn step(&mut self, dt: f32) {
        // Large frame hitches would otherwise tunnel bodies through each other
        let dt = dt.min(self.config.max_time_step);

        for (_, body) in self.bodies.iter_mut() {
            body.update_velocity(dt, self.gravity, &self.config);
        }

        let manifolds = self.detect_contacts();

        self.dispatch_events(&manifolds);

        let solver = SequentialImpulseSolver::new(&self.config);
        for _ in 0..self.config.velocity_iterations {
            for manifold in &manifolds {
                solver.solve_velocity(&mut self.bodies, manifold);
            }
        }

        for (_, body) in self.bodies.iter_mut() {
            body.update_position(dt);
        }

        // Depths were measured before integration and may be slightly stale
        // here; correcting a fraction of them is still enough to keep stacks
        // from sinking.
        for manifold in &manifolds {
            solver.solve_position(&mut self.bodies, manifold);
        }
    }

    /// Runs broad and narrow phase, waking sleeping bodies that an awake
    /// body has come into contact with.
    fn detect_contacts(&mut self) -> Vec<ContactManifold> {
        let mut manifolds = Vec::new();

        for pair in broad_phase::candidate_pairs(&self.bodies) {
            let (Some(a), Some(b)) = (self.bodies.get(pair.body_a), self.bodies.get(pair.body_b))
            else {
                continue;
            };

            let Some(manifold) = narrow_phase::detect(pair, a, b) else {
                continue;
            };

            let wake_b = !a.is_static() && !a.is_sleeping() && b.is_sleeping();
            let wake_a = !b.is_static() && !b.is_sleeping() && a.is_sleeping();

            if wake_a {
                if let Some(body) = self.bodies.get_mut(pair.body_a) {
                    body.wake();
                }
            }
            if wake_b {
                if let Some(body) = self.bodies.get_mut(pair.body_b) {
                    body.wake();
                }
            }

            manifolds.push(manifold);
        }

        manifolds
    }

    /// Builds events with pre-resolution velocity snapshots and hands them
    /// to every registered listener.
    fn dispatch_events(&mut self, manifolds: &[ContactManifold]) {
        if self.listeners.is_empty() || manifolds.is_empty() {
            return;
        }

        let events: Vec<CollisionEvent> = manifolds
            .iter()
            .filter_map(|manifold| {
                let a = self.bodies.get(manifold.pair.body_a)?;
                let b = self.bodies.get(manifold.pair.body_b)?;
                Some(CollisionEvent {
                    body_a: manifold.pair.body_a,
                    body_b: manifold.pair.body_b,
                    normal: manifold.normal,
                    depth: manifold.depth,
                    contacts: manifold.contacts.clone(),
                    velocity_a: a.get_velocity(),
                    velocity_b: b.get_velocity(),
                    angular_velocity_a: a.get_angular_velocity(),
                    angular_velocity_b: b.get_angular_velocity(),
                })
            })
            .collect();

        for event in &events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
