//! Simulation parameters and run settings
//!
//! Persisted as JSON. Anything missing or invalid falls back to defaults
//! with a warning instead of aborting.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable vehicle and sensor parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Maximum forward speed (units per step)
    pub max_speed: f32,
    /// Heading change per unit of sensor difference (degrees per step)
    pub turn_rate: f32,
    /// Sensor ray length
    pub sensor_range: f32,
    /// Multiplier applied to normalized proximity
    pub sensitivity: f32,
    /// Speed gain per step when below target
    pub acceleration: f32,
    /// Speed loss per step when above target
    pub deceleration: f32,
    /// Left sensor angle relative to heading (degrees)
    pub left_sensor_offset: f32,
    /// Right sensor angle relative to heading (degrees)
    pub right_sensor_offset: f32,
    /// Body radius, also the sensor mount distance from center
    pub robot_radius: f32,
    /// Heading kick after a collision is drawn from [-range, +range] degrees
    pub collision_recovery_turn_range: f32,
    /// Speed after a collision is `-speed * damping`
    pub collision_speed_damping: f32,
    /// Simulated seconds per step
    pub step_dt: f32,
    /// Trial timeout in simulated seconds (None = run until completed)
    pub timeout_secs: Option<f32>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            turn_rate: 2.0,
            sensor_range: 150.0,
            sensitivity: 0.6,
            acceleration: 0.2,
            deceleration: 0.1,
            left_sensor_offset: 45.0,
            right_sensor_offset: -45.0,
            robot_radius: ROBOT_RADIUS,
            collision_recovery_turn_range: 45.0,
            collision_speed_damping: 0.5,
            step_dt: SIM_DT,
            timeout_secs: Some(TRIAL_TIMEOUT_SECS),
        }
    }
}

/// Keep `value` if it passes `valid`, otherwise warn and use `fallback`
fn or_default(name: &str, value: f32, fallback: f32, valid: impl Fn(f32) -> bool) -> f32 {
    if value.is_finite() && valid(value) {
        value
    } else {
        log::warn!("Invalid {name} ({value}), using default {fallback}");
        fallback
    }
}

impl SimParams {
    /// Defaults for the manual teleoperation mode
    pub fn teleoperation() -> Self {
        Self {
            max_speed: 1.0,
            turn_rate: 1.0,
            timeout_secs: None,
            ..Self::default()
        }
    }

    /// Override the user-facing scalars that were supplied, then sanitise
    pub fn with_user_inputs(&self, inputs: &UserInputs) -> Self {
        Self {
            max_speed: inputs.max_speed.unwrap_or(self.max_speed),
            turn_rate: inputs.turn_rate.unwrap_or(self.turn_rate),
            sensor_range: inputs.sensor_range.unwrap_or(self.sensor_range),
            sensitivity: inputs.sensitivity.unwrap_or(self.sensitivity),
            ..self.clone()
        }
        .sanitized()
    }

    /// Same parameters with a different sensitivity
    pub fn with_sensitivity(&self, sensitivity: f32) -> Self {
        Self {
            sensitivity,
            ..self.clone()
        }
    }

    /// Replace non-finite or out-of-range values with defaults
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let positive = |v: f32| v > 0.0;
        let non_negative = |v: f32| v >= 0.0;

        let timeout_secs = match self.timeout_secs {
            Some(t) if t.is_finite() && t > 0.0 => Some(t),
            Some(t) => {
                log::warn!("Invalid timeout_secs ({t}), using default {TRIAL_TIMEOUT_SECS}");
                d.timeout_secs
            }
            None => None,
        };

        Self {
            max_speed: or_default("max_speed", self.max_speed, d.max_speed, positive),
            turn_rate: or_default("turn_rate", self.turn_rate, d.turn_rate, non_negative),
            sensor_range: or_default("sensor_range", self.sensor_range, d.sensor_range, positive),
            sensitivity: or_default("sensitivity", self.sensitivity, d.sensitivity, non_negative),
            acceleration: or_default("acceleration", self.acceleration, d.acceleration, positive),
            deceleration: or_default("deceleration", self.deceleration, d.deceleration, positive),
            left_sensor_offset: or_default(
                "left_sensor_offset",
                self.left_sensor_offset,
                d.left_sensor_offset,
                |_| true,
            ),
            right_sensor_offset: or_default(
                "right_sensor_offset",
                self.right_sensor_offset,
                d.right_sensor_offset,
                |_| true,
            ),
            robot_radius: or_default("robot_radius", self.robot_radius, d.robot_radius, positive),
            collision_recovery_turn_range: or_default(
                "collision_recovery_turn_range",
                self.collision_recovery_turn_range,
                d.collision_recovery_turn_range,
                non_negative,
            ),
            collision_speed_damping: or_default(
                "collision_speed_damping",
                self.collision_speed_damping,
                d.collision_speed_damping,
                |v| (0.0..=1.0).contains(&v),
            ),
            step_dt: or_default("step_dt", self.step_dt, d.step_dt, positive),
            timeout_secs,
        }
    }
}

/// The four scalars a user is prompted for, already parsed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserInputs {
    pub max_speed: Option<f32>,
    pub turn_rate: Option<f32>,
    pub sensor_range: Option<f32>,
    pub sensitivity: Option<f32>,
}

impl UserInputs {
    /// Parse raw text answers; absent, blank or malformed entries become `None`
    pub fn parse(
        max_speed: Option<&str>,
        turn_rate: Option<&str>,
        sensor_range: Option<&str>,
        sensitivity: Option<&str>,
    ) -> Self {
        fn field(raw: Option<&str>) -> Option<f32> {
            let raw = raw?.trim();
            if raw.is_empty() {
                return None;
            }
            match raw.parse::<f32>() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("Ignoring invalid numeric input '{raw}'");
                    None
                }
            }
        }

        Self {
            max_speed: field(max_speed),
            turn_rate: field(turn_rate),
            sensor_range: field(sensor_range),
            sensitivity: field(sensitivity),
        }
    }
}

/// Sweep experiment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Sensitivity values, tried in order
    pub candidates: Vec<f32>,
    /// Seed for collision-recovery randomness
    pub seed: u64,
    /// Where to write the JSON report (None = don't write)
    pub report_path: Option<String>,
    /// Wall-clock budget for the whole sweep, in seconds
    pub max_wall_secs: Option<f64>,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            candidates: SENSITIVITY_CANDIDATES.to_vec(),
            seed: DEFAULT_SWEEP_SEED,
            report_path: Some("sensitivity_analysis.json".to_string()),
            max_wall_secs: None,
        }
    }
}

/// Top-level settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub params: SimParams,
    pub sweep: SweepSettings,
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {e}; using default settings", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(mut settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.params = settings.params.sanitized();
                settings.sweep.candidates.retain(|s| {
                    let ok = s.is_finite() && *s >= 0.0;
                    if !ok {
                        log::warn!("Dropping invalid sensitivity candidate {s}");
                    }
                    ok
                });
                settings
            }
            Err(e) => {
                log::warn!("Malformed settings in {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
