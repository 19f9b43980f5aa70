//! Motor control laws
//!
//! Both laws are pure: they read sensor values or operator commands plus the
//! current speed and return a heading delta and a new speed. The state
//! machine applies the result.

use super::sensor::SensorReading;
use crate::consts::OBSTACLE_SLOWDOWN;
use crate::settings::SimParams;

/// Result of one control update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlOutput {
    /// Added to the current heading (degrees)
    pub heading_delta: f32,
    /// Replaces the current speed
    pub speed: f32,
}

/// Move `current` toward `target`, limited per step and without overshoot
#[inline]
pub fn ramp_speed(current: f32, target: f32, acceleration: f32, deceleration: f32) -> f32 {
    if current < target {
        (current + acceleration).min(target)
    } else if current > target {
        (current - deceleration).max(target)
    } else {
        current
    }
}

/// Cross-wired Braitenberg law.
///
/// The right reading pushes the heading up (counterclockwise) and the left
/// reading pushes it down, so the vehicle turns away from the nearer wall.
/// Target speed drops toward 20% of max as either sensor saturates.
pub fn braitenberg(readings: SensorReading, current_speed: f32, params: &SimParams) -> ControlOutput {
    let heading_delta = (readings.right - readings.left) * params.turn_rate;

    let obstacle_factor = readings.strongest();
    let target_speed = params.max_speed * (1.0 - obstacle_factor * OBSTACLE_SLOWDOWN);

    ControlOutput {
        heading_delta,
        speed: ramp_speed(
            current_speed,
            target_speed,
            params.acceleration,
            params.deceleration,
        ),
    }
}

/// Operator commands for one step (held keys)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualCommand {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub reverse: bool,
}

/// Direct teleoperation.
///
/// Left/right turn by `turn_rate` (both cancel out). Forward takes priority
/// over reverse. With neither held, speed coasts toward zero.
pub fn teleoperate(command: ManualCommand, current_speed: f32, params: &SimParams) -> ControlOutput {
    let mut heading_delta = 0.0;
    if command.turn_left {
        heading_delta += params.turn_rate;
    }
    if command.turn_right {
        heading_delta -= params.turn_rate;
    }

    let speed = if command.forward {
        (current_speed + params.acceleration).min(params.max_speed)
    } else if command.reverse {
        (current_speed - params.acceleration).max(-params.max_speed)
    } else {
        ramp_speed(current_speed, 0.0, params.deceleration, params.deceleration)
    };

    ControlOutput {
        heading_delta,
        speed,
    }
}
