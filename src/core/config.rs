#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for the physics simulation.
///
/// The defaults are tuned for a canvas-scale playground (lengths in pixels,
/// y-down, gravity around 245 px/s^2). Every threshold here is
/// scale-dependent; a host working in other units should retune them rather
/// than rely on the defaults.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Safety ceiling applied to the `dt` passed to `step`, bounding
    /// per-step integration error under frame hitches
    pub max_time_step: f32,

    /// Number of Gauss-Seidel passes over the contact manifolds per step
    pub velocity_iterations: u32,

    /// Per-update multiplier on linear velocity
    pub linear_damping: f32,

    /// Per-update multiplier on angular velocity
    pub angular_damping: f32,

    /// Linear speed below which a body accumulates sleep time (px/s)
    pub linear_sleep_threshold: f32,

    /// Angular speed below which a body accumulates sleep time (rad/s)
    pub angular_sleep_threshold: f32,

    /// Time a body must stay below both thresholds before sleeping (s)
    pub sleep_time_threshold: f32,

    /// Whether bodies are allowed to sleep at all
    pub allow_sleeping: bool,

    /// Closing speeds slower than this are treated as resting contact and
    /// resolved with zero restitution, suppressing gravity-induced
    /// micro-bounce (px/s)
    pub restitution_velocity_threshold: f32,

    /// Tangential speeds below this skip friction entirely to avoid jitter
    /// (px/s)
    pub friction_velocity_threshold: f32,

    /// Penetration depth tolerated without positional correction (px)
    pub penetration_slop: f32,

    /// Fraction of the remaining penetration corrected per step
    pub position_correction_percent: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_time_step: 0.05,
            velocity_iterations: 10,
            linear_damping: 0.995,
            angular_damping: 0.9,
            linear_sleep_threshold: 2.0,
            angular_sleep_threshold: 0.1,
            sleep_time_threshold: 0.5,
            allow_sleeping: true,
            restitution_velocity_threshold: 20.0,
            friction_velocity_threshold: 0.1,
            penetration_slop: 0.05,
            position_correction_percent: 0.2,
        }
    }
}
