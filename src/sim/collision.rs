//! Body-versus-wall collision detection
//!
//! The vehicle is a disk. It collides when its center comes closer than its
//! radius to any wall segment. Recovery only needs a yes/no answer, so no
//! contact point or normal is reported.

use glam::Vec2;

use super::geometry::distance_point_to_segment;
use super::maze::WallMap;

/// True if a disk at `position` overlaps any wall
pub fn is_colliding(position: Vec2, radius: f32, walls: &WallMap) -> bool {
    clearance(position, walls) < radius
}

/// Distance from `position` to the nearest wall (infinite for an empty map)
pub fn clearance(position: Vec2, walls: &WallMap) -> f32 {
    walls
        .iter()
        .map(|wall| distance_point_to_segment(position, wall))
        .fold(f32::INFINITY, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_far_from_walls_is_clear() {
        let walls = WallMap::outer_boundary(50.0, 950.0);
        assert!(!is_colliding(Vec2::new(500.0, 500.0), 20.0, &walls));
        assert!(!is_colliding(Vec2::new(100.0, 100.0), 20.0, &walls));
    }

    #[test]
    fn test_within_radius_collides() {
        let walls = WallMap::outer_boundary(50.0, 950.0);
        assert!(is_colliding(Vec2::new(65.0, 500.0), 20.0, &walls));
        assert!(is_colliding(Vec2::new(500.0, 940.0), 20.0, &walls));
    }

    #[test]
    fn test_exactly_at_radius_is_clear() {
        let walls = WallMap::new().with_wall(0.0, 0.0, 100.0, 0.0);
        assert!(!is_colliding(Vec2::new(50.0, 20.0), 20.0, &walls));
        assert!(is_colliding(Vec2::new(50.0, 19.9), 20.0, &walls));
    }

    #[test]
    fn test_wall_end_cap() {
        // Beyond the end of a short wall, distance is to the endpoint
        let walls = WallMap::new().with_wall(0.0, 0.0, 100.0, 0.0);
        assert!(!is_colliding(Vec2::new(115.0, 15.0), 20.0, &walls));
        assert!(is_colliding(Vec2::new(110.0, 10.0), 20.0, &walls));
    }

    #[test]
    fn test_empty_map_never_collides() {
        let walls = WallMap::new();
        assert!(!is_colliding(Vec2::ZERO, 1000.0, &walls));
        assert_eq!(clearance(Vec2::ZERO, &walls), f32::INFINITY);
    }

    #[test]
    fn test_clearance_picks_nearest() {
        let walls = WallMap::outer_boundary(50.0, 950.0);
        assert!((clearance(Vec2::new(100.0, 300.0), &walls) - 50.0).abs() < 1e-4);
    }
}
