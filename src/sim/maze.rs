//! Wall map and course layout
//!
//! The wall map is built once and shared read-only by the sensor model and
//! the collision detector. A course adds the start pose and finish target.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Segment;
use crate::consts::*;

/// Ordered collection of immutable wall segments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallMap {
    walls: Vec<Segment>,
}

impl WallMap {
    pub fn new() -> Self {
        Self { walls: Vec::new() }
    }

    /// Append a wall from raw coordinates
    pub fn add_wall(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.walls.push(Segment::from_coords(x1, y1, x2, y2));
    }

    /// Builder-style variant of [`WallMap::add_wall`]
    pub fn with_wall(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.add_wall(x1, y1, x2, y2);
        self
    }

    /// Rectangular boundary between `min` and `max` corners
    pub fn outer_boundary(min: f32, max: f32) -> Self {
        Self::new()
            .with_wall(min, min, max, min) // Top
            .with_wall(min, min, min, max) // Left
            .with_wall(min, max, max, max) // Bottom
            .with_wall(max, min, max, max) // Right
    }

    /// The standard maze: 900x900 boundary plus interior partitions
    pub fn standard_maze() -> Self {
        Self::outer_boundary(50.0, 950.0)
            // Horizontal partitions
            .with_wall(400.0, 200.0, 800.0, 200.0)
            .with_wall(200.0, 800.0, 600.0, 800.0)
            .with_wall(200.0, 400.0, 600.0, 400.0)
            .with_wall(400.0, 600.0, 800.0, 600.0)
            // Vertical partitions
            .with_wall(200.0, 50.0, 200.0, 800.0)
            .with_wall(800.0, 200.0, 800.0, 950.0)
    }

    pub fn walls(&self) -> &[Segment] {
        &self.walls
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.walls.iter()
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

/// A wall map with start pose and finish target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub walls: WallMap,
    pub start: Vec2,
    /// Initial heading in degrees
    pub start_heading: f32,
    pub finish: Vec2,
    pub capture_radius: f32,
}

impl Default for Course {
    fn default() -> Self {
        Self::standard()
    }
}

impl Course {
    /// Standard maze with the default start and finish
    pub fn standard() -> Self {
        Self::with_walls(WallMap::standard_maze())
    }

    /// Outer boundary only, no interior walls
    pub fn open_arena() -> Self {
        Self::with_walls(WallMap::outer_boundary(50.0, 950.0))
    }

    pub fn with_walls(walls: WallMap) -> Self {
        Self {
            walls,
            start: START_POS,
            start_heading: START_HEADING,
            finish: FINISH_POS,
            capture_radius: CAPTURE_RADIUS,
        }
    }

    #[inline]
    pub fn distance_to_finish(&self, position: Vec2) -> f32 {
        position.distance(self.finish)
    }

    /// Goal check: strictly inside the capture radius
    #[inline]
    pub fn reached_finish(&self, position: Vec2) -> bool {
        self.distance_to_finish(position) < self.capture_radius
    }
}
