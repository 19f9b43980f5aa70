//! Braitenberg Maze - a reactive vehicle navigating a line-segment maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, sensing, collisions, stepping)
//! - `sweep`: Sensitivity sweep experiment harness
//! - `settings`: Simulation parameters and JSON-backed configuration
//! - `cli`: Command-line interface for the headless runner

pub mod cli;
pub mod settings;
pub mod sim;
pub mod sweep;

pub use settings::{Settings, SimParams, SweepSettings, UserInputs};
pub use sweep::{RunResult, SweepOutcome, performance_score, run_sweep, run_trial};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec2;

    /// Simulated seconds per step (one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Course layout (screen space, y grows downward)
    pub const START_POS: Vec2 = Vec2::new(100.0, 100.0);
    pub const FINISH_POS: Vec2 = Vec2::new(900.0, 900.0);
    pub const CAPTURE_RADIUS: f32 = 30.0;
    /// Initial facing in degrees (270 moves toward +y on screen)
    pub const START_HEADING: f32 = 270.0;

    /// Vehicle body
    pub const ROBOT_SIZE: f32 = 40.0;
    pub const ROBOT_RADIUS: f32 = ROBOT_SIZE / 2.0;

    /// Target speed falls to 20% of max when a sensor saturates
    pub const OBSTACLE_SLOWDOWN: f32 = 0.8;

    /// Sweep defaults
    pub const TRIAL_TIMEOUT_SECS: f32 = 90.0;
    pub const SENSITIVITY_CANDIDATES: [f32; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];
    /// Seconds of score per collision
    pub const COLLISION_PENALTY: f32 = 2.0;
    pub const DEFAULT_SWEEP_SEED: u64 = 42;
}

/// Normalize a heading to [0, 360) degrees (display only)
#[inline]
pub fn normalize_heading(heading: f32) -> f32 {
    let h = heading.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if h >= 360.0 { 0.0 } else { h }
}

/// Unit direction for a heading in degrees.
///
/// Screen-space convention: positive angles turn counterclockwise on screen,
/// so the y component is negated.
#[inline]
pub fn heading_to_direction(heading: f32) -> Vec2 {
    let rad = heading.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}
