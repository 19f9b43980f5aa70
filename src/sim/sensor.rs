//! Directional proximity sensors
//!
//! Each sensor casts a single ray from its mount point on the body edge.
//! The nearest wall hit is turned into a proximity value: 0 when nothing is
//! within range, rising to 1 as a wall reaches the mount point, then scaled
//! by the sensitivity factor.
//!
//! Every ray is tested against every wall, so cost is linear in wall count.
//! That is fine for a hand-built maze; a large map would need a spatial index.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Segment, segment_intersection};
use super::maze::WallMap;
use super::state::Pose;
use crate::heading_to_direction;
use crate::settings::SimParams;

/// Left/right sensor values, each in [0, sensitivity]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub left: f32,
    pub right: f32,
}

impl SensorReading {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Strongest of the two readings
    #[inline]
    pub fn strongest(&self) -> f32 {
        self.left.max(self.right)
    }
}

/// A sensor ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRay {
    /// Mount point on the body edge
    pub origin: Vec2,
    /// Far end of the ray at full range
    pub end: Vec2,
}

impl SensorRay {
    /// Ray for a sensor mounted `mount_distance` from `position`, pointing
    /// along `angle` degrees, `range` long
    pub fn new(position: Vec2, angle: f32, mount_distance: f32, range: f32) -> Self {
        let dir = heading_to_direction(angle);
        let origin = position + dir * mount_distance;
        Self {
            origin,
            end: origin + dir * range,
        }
    }

    pub fn as_segment(&self) -> Segment {
        Segment::new(self.origin, self.end)
    }

    /// Distance from the mount point to the closest wall, capped at `range`
    pub fn nearest_hit(&self, range: f32, walls: &WallMap) -> f32 {
        let ray = self.as_segment();
        walls
            .iter()
            .filter_map(|wall| segment_intersection(&ray, wall))
            .map(|hit| hit.distance(self.origin))
            .fold(range, f32::min)
    }
}

/// Normalized proximity for a hit `distance` on a ray of length `range`
#[inline]
pub fn proximity(distance: f32, range: f32) -> f32 {
    if range <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / range).clamp(0.0, 1.0)
}

/// Left and right rays for the current pose
pub fn sensor_rays(pose: &Pose, params: &SimParams) -> [SensorRay; 2] {
    let ray = |offset: f32| {
        SensorRay::new(
            pose.position,
            pose.heading + offset,
            params.robot_radius,
            params.sensor_range,
        )
    };
    [ray(params.left_sensor_offset), ray(params.right_sensor_offset)]
}

/// Read both sensors against the wall map
pub fn read_sensors(pose: &Pose, params: &SimParams, walls: &WallMap) -> SensorReading {
    let [left, right] = sensor_rays(pose, params);
    let read = |ray: &SensorRay| {
        let distance = ray.nearest_hit(params.sensor_range, walls);
        proximity(distance, params.sensor_range) * params.sensitivity
    };
    SensorReading::new(read(&left), read(&right))
}
