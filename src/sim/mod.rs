//! Deterministic simulation module
//!
//! All navigation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through an injected `JitterSource`
//! - Stable wall iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod controller;
pub mod geometry;
pub mod maze;
pub mod sensor;
pub mod state;
pub mod tick;

pub use collision::{clearance, is_colliding};
pub use controller::{ControlOutput, ManualCommand, braitenberg, ramp_speed, teleoperate};
pub use geometry::{Segment, distance_point_to_segment, segment_intersection};
pub use maze::{Course, WallMap};
pub use sensor::{SensorRay, SensorReading, proximity, read_sensors, sensor_rays};
pub use state::{Pose, RngState, RunPhase, TRAIL_LENGTH, VehicleState};
pub use tick::{DriveMode, JitterSource, StepInput, step};
