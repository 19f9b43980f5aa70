//! Line segment geometry for maze walls and sensor rays
//!
//! Two primitives carry all of the spatial reasoning in the simulation:
//! - point-to-segment distance (collision, body clearance)
//! - segment-segment intersection (sensor rays against walls)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A finite line segment from `a` to `b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Build from raw `(x1, y1, x2, y2)` coordinates
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let line_vec = self.b - self.a;
        let len_sq = line_vec.length_squared();

        if len_sq == 0.0 {
            return self.a;
        }

        let t = ((p - self.a).dot(line_vec) / len_sq).clamp(0.0, 1.0);
        self.a + line_vec * t
    }

    /// Point at parameter `t` along the segment (0 = a, 1 = b)
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.a + (self.b - self.a) * t
    }
}

/// Euclidean distance from `point` to the closest point on `segment`.
///
/// A zero-length segment degenerates to point-to-point distance.
pub fn distance_point_to_segment(point: Vec2, segment: &Segment) -> f32 {
    (point - segment.closest_point(point)).length()
}

/// Intersection point of two finite segments, if they cross.
///
/// Both parametric coordinates must lie in [0, 1] (endpoints count as hits).
/// Parallel and collinear segments have a zero determinant and report no
/// intersection, including collinear overlap.
pub fn segment_intersection(s1: &Segment, s2: &Segment) -> Option<Vec2> {
    let d1 = s1.b - s1.a;
    let d2 = s2.b - s2.a;

    let den = d2.y * d1.x - d2.x * d1.y;
    if den == 0.0 {
        return None;
    }

    let offset = s1.a - s2.a;
    let ua = (d2.x * offset.y - d2.y * offset.x) / den;
    let ub = (d1.x * offset.y - d1.y * offset.x) / den;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Some(s1.point_at(ua))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance_perpendicular() {
        let wall = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        assert!((distance_point_to_segment(Vec2::new(5.0, 3.0), &wall) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_past_endpoint() {
        // Projection falls beyond b, so distance is to the endpoint
        let wall = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        let d = distance_point_to_segment(Vec2::new(13.0, 4.0), &wall);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_degenerate_segment() {
        let dot = Segment::from_coords(2.0, 2.0, 2.0, 2.0);
        let d = distance_point_to_segment(Vec2::new(5.0, 6.0), &dot);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_intersection_crossing() {
        let s1 = Segment::from_coords(0.0, 0.0, 10.0, 10.0);
        let s2 = Segment::from_coords(0.0, 10.0, 10.0, 0.0);
        let hit = segment_intersection(&s1, &s2).expect("segments cross");
        assert!((hit - Vec2::new(5.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_intersection_touching_endpoint() {
        let s1 = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        let s2 = Segment::from_coords(10.0, -5.0, 10.0, 5.0);
        let hit = segment_intersection(&s1, &s2).expect("endpoint touch counts");
        assert!((hit - Vec2::new(10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_intersection_short_of_wall() {
        let s1 = Segment::from_coords(0.0, 0.0, 9.0, 0.0);
        let s2 = Segment::from_coords(10.0, -5.0, 10.0, 5.0);
        assert!(segment_intersection(&s1, &s2).is_none());
    }

    #[test]
    fn test_intersection_parallel() {
        let s1 = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        let s2 = Segment::from_coords(0.0, 1.0, 10.0, 1.0);
        assert!(segment_intersection(&s1, &s2).is_none());
    }

    #[test]
    fn test_intersection_collinear_overlap_is_miss() {
        // Zero determinant: overlapping collinear segments are not reported
        let s1 = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        let s2 = Segment::from_coords(5.0, 0.0, 15.0, 0.0);
        assert!(segment_intersection(&s1, &s2).is_none());
    }

    proptest! {
        #[test]
        fn prop_distance_non_negative(
            px in -1000.0f32..1000.0, py in -1000.0f32..1000.0,
            x1 in -1000.0f32..1000.0, y1 in -1000.0f32..1000.0,
            x2 in -1000.0f32..1000.0, y2 in -1000.0f32..1000.0,
        ) {
            let seg = Segment::from_coords(x1, y1, x2, y2);
            prop_assert!(distance_point_to_segment(Vec2::new(px, py), &seg) >= 0.0);
        }

        #[test]
        fn prop_point_on_segment_has_zero_distance(
            x1 in -500.0f32..500.0, y1 in -500.0f32..500.0,
            x2 in -500.0f32..500.0, y2 in -500.0f32..500.0,
            t in 0.0f32..=1.0,
        ) {
            let seg = Segment::from_coords(x1, y1, x2, y2);
            let p = seg.point_at(t);
            prop_assert!(distance_point_to_segment(p, &seg) < 1e-3);
        }

        #[test]
        fn prop_crossing_segments_meet_inside_both(
            cx in -500.0f32..500.0, cy in -500.0f32..500.0,
            angle in 0.0f32..std::f32::consts::PI,
            turn in 0.3f32..2.8,
            r1 in 5.0f32..200.0, r2 in 5.0f32..200.0,
        ) {
            // Two segments through a common center at clearly different angles
            let c = Vec2::new(cx, cy);
            let d1 = Vec2::new(angle.cos(), angle.sin());
            let d2 = Vec2::new((angle + turn).cos(), (angle + turn).sin());
            let s1 = Segment::new(c - d1 * r1, c + d1 * r1);
            let s2 = Segment::new(c - d2 * r2, c + d2 * r2);

            let hit = segment_intersection(&s1, &s2);
            prop_assert!(hit.is_some());
            let hit = hit.unwrap();
            prop_assert!(distance_point_to_segment(hit, &s1) < 1e-2);
            prop_assert!(distance_point_to_segment(hit, &s2) < 1e-2);
            prop_assert!((hit - c).length() < 1e-2);
        }

        #[test]
        fn prop_separated_segments_do_not_intersect(
            x1 in -500.0f32..500.0, x2 in -500.0f32..500.0,
            x3 in -500.0f32..500.0, x4 in -500.0f32..500.0,
            y1 in 0.0f32..10.0, y2 in 0.0f32..10.0,
            y3 in 20.0f32..30.0, y4 in 20.0f32..30.0,
        ) {
            // Disjoint horizontal bands can never cross
            let s1 = Segment::from_coords(x1, y1, x2, y2);
            let s2 = Segment::from_coords(x3, y3, x4, y4);
            prop_assert!(segment_intersection(&s1, &s2).is_none());
        }
    }
}
