//! Fixed timestep simulation step
//!
//! Advances one run by a single step. No I/O and no hidden state: an
//! interactive loop and the headless sweep call the same function.

use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::is_colliding;
use super::controller::{ManualCommand, braitenberg, teleoperate};
use super::maze::Course;
use super::sensor::read_sensors;
use super::state::{RunPhase, VehicleState};
use crate::heading_to_direction;
use crate::settings::SimParams;

/// Source of the random heading kick applied after a collision
pub trait JitterSource {
    /// Sample uniformly from [-range, +range] degrees
    fn heading_kick(&mut self, range: f32) -> f32;
}

impl JitterSource for Pcg32 {
    fn heading_kick(&mut self, range: f32) -> f32 {
        if range > 0.0 {
            self.random_range(-range..=range)
        } else {
            0.0
        }
    }
}

/// Who is driving this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriveMode {
    /// Braitenberg controller steers from sensor readings
    #[default]
    Autonomous,
    /// Operator commands bypass the controller
    Manual(ManualCommand),
}

/// Input commands for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    pub drive: DriveMode,
}

impl StepInput {
    pub fn manual(command: ManualCommand) -> Self {
        Self {
            drive: DriveMode::Manual(command),
        }
    }
}

/// Advance the run by one step.
///
/// Order: sense, control, tentative move, collision recovery, goal check,
/// timeout. Terminal states are left untouched.
pub fn step<J: JitterSource + ?Sized>(
    state: &mut VehicleState,
    input: &StepInput,
    course: &Course,
    params: &SimParams,
    jitter: &mut J,
) {
    if state.is_finished() {
        return;
    }

    state.ticks += 1;
    state.elapsed = state.ticks as f32 * params.step_dt;

    // Sensors are read every step so both modes can display them
    state.readings = read_sensors(&state.pose, params, &course.walls);

    let control = match input.drive {
        DriveMode::Autonomous => braitenberg(state.readings, state.pose.speed, params),
        DriveMode::Manual(command) => teleoperate(command, state.pose.speed, params),
    };
    state.pose.heading += control.heading_delta;
    state.pose.speed = control.speed;

    let previous = state.pose.position;
    let tentative = previous + heading_to_direction(state.pose.heading) * state.pose.speed;

    if is_colliding(tentative, params.robot_radius, &course.walls) {
        // Reject the move, kick the heading and back off
        state.pose.position = previous;
        state.pose.heading += jitter.heading_kick(params.collision_recovery_turn_range);
        state.pose.speed = -state.pose.speed * params.collision_speed_damping;
        state.collisions += 1;
        log::debug!(
            "Collision #{} at ({:.1}, {:.1})",
            state.collisions,
            previous.x,
            previous.y
        );
    } else {
        state.pose.position = tentative;
    }

    state.record_trail();

    if course.reached_finish(state.pose.position) {
        state.phase = RunPhase::Completed;
        log::info!(
            "Finish reached: time = {:.2}s, collisions = {}",
            state.elapsed,
            state.collisions
        );
        return;
    }

    if let Some(timeout) = params.timeout_secs {
        if state.elapsed >= timeout {
            state.phase = RunPhase::TimedOut;
            state.elapsed = timeout;
            log::info!("Run timed out after {timeout:.0}s");
        }
    }
}
