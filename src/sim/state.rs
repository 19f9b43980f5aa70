//! Vehicle state and core simulation types
//!
//! `VehicleState` is the whole simulation context for one run. Nothing else
//! holds mutable simulation data; a new run starts from a fresh state.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::maze::Course;
use super::sensor::SensorReading;
use crate::normalize_heading;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Vehicle is still driving
    Running,
    /// Finish reached
    Completed,
    /// Timeout elapsed before the finish was reached
    TimedOut,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunPhase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Running => "running",
            RunPhase::Completed => "completed",
            RunPhase::TimedOut => "timed out",
        }
    }
}

/// Position, heading (degrees) and signed speed (units per step)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub heading: f32,
    pub speed: f32,
}

impl Pose {
    /// Heading in [0, 360) for display
    pub fn display_heading(&self) -> f32 {
        normalize_heading(self.heading)
    }
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 8192;

/// RNG seed wrapper for reproducible collision recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleState {
    pub pose: Pose,
    pub phase: RunPhase,
    /// Readings from the most recent step (display only)
    pub readings: SensorReading,
    /// Rejected moves so far
    pub collisions: u32,
    /// Steps taken
    pub ticks: u64,
    /// Simulated seconds; frozen once the run ends
    pub elapsed: f32,
    /// Visited positions, oldest first
    #[serde(skip)]
    pub trail: VecDeque<Vec2>,
}

impl VehicleState {
    /// Fresh state at the course start, standing still
    pub fn new(course: &Course) -> Self {
        Self {
            pose: Pose {
                position: course.start,
                heading: course.start_heading,
                speed: 0.0,
            },
            phase: RunPhase::Running,
            readings: SensorReading::default(),
            collisions: 0,
            ticks: 0,
            elapsed: 0.0,
            trail: VecDeque::new(),
        }
    }

    /// Discard everything and start over from the course start
    pub fn reset(&mut self, course: &Course) {
        *self = Self::new(course);
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self) {
        if self.trail.len() >= TRAIL_LENGTH {
            self.trail.pop_front();
        }
        self.trail.push_back(self.pose.position);
    }
}
