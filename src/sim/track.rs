//! Track geometry
//!
//! The track is two overlapping circular lanes of the same radius, mirrored
//! across the vertical axis. The player drives the left lane, traffic the right.
//! Where they overlap in the middle the cars share road, which is where crashes
//! happen.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::polar_to_cartesian;

/// Which circular lane a position is measured on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Centered at (-arc_center_x, 0); the player's lane
    Left,
    /// Centered at (+arc_center_x, 0); the traffic lane
    Right,
}

/// Rotational sense of travel around a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Sign applied to angular progress (clockwise runs toward smaller angles)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => -1.0,
            Direction::CounterClockwise => 1.0,
        }
    }

    /// Offset from the radial angle to the tangent the vehicle travels along
    #[inline]
    pub fn heading_offset(self) -> f32 {
        self.sign() * FRAC_PI_2
    }

    pub fn is_clockwise(self) -> bool {
        self == Direction::Clockwise
    }
}

/// Horizontal distance from the origin to each lane's center
///
/// Chosen so the inner edge of one lane meets the outer edge of the other at
/// `ARC_ANGLE`, which keeps the overlapping middle section one track-width wide.
pub fn arc_center_x() -> f32 {
    let inner = TRACK_RADIUS - TRACK_WIDTH;
    let outer = TRACK_RADIUS + TRACK_WIDTH;

    let delta_y = ARC_ANGLE.sin() * inner;
    let outer_angle = (delta_y / outer).asin();

    (ARC_ANGLE.cos() * inner + outer_angle.cos() * outer) / 2.0
}

/// Center of a lane circle
pub fn lane_center(lane: Lane) -> Vec2 {
    match lane {
        Lane::Left => Vec2::new(-arc_center_x(), 0.0),
        Lane::Right => Vec2::new(arc_center_x(), 0.0),
    }
}

/// Point on a lane's centerline at `angle` (radians, measured around the lane center)
#[inline]
pub fn point_on_lane(lane: Lane, angle: f32) -> Vec2 {
    lane_center(lane) + polar_to_cartesian(TRACK_RADIUS, angle)
}

/// Facing rotation of a vehicle at `angle` travelling in `direction`
#[inline]
pub fn facing(angle: f32, direction: Direction) -> f32 {
    angle + direction.heading_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_arc_center_x_matches_track_layout() {
        let cx = arc_center_x();
        assert!((cx - 155.22).abs() < 0.05, "arc_center_x = {cx}");
    }

    #[test]
    fn test_lanes_are_mirrored() {
        let left = point_on_lane(Lane::Left, PI / 3.0);
        let right = point_on_lane(Lane::Right, PI - PI / 3.0);
        assert!((left.x + right.x).abs() < 1e-3);
        assert!((left.y - right.y).abs() < 1e-3);
    }

    #[test]
    fn test_player_start_point() {
        let start = point_on_lane(Lane::Left, PLAYER_ANGLE_INITIAL);
        assert!((start.x - (-TRACK_RADIUS - arc_center_x())).abs() < 1e-3);
        assert!(start.y.abs() < 1e-3);
    }

    #[test]
    fn test_facing_follows_direction() {
        assert!((facing(PI, Direction::Clockwise) - PI / 2.0).abs() < 1e-6);
        assert!((facing(0.0, Direction::CounterClockwise) - PI / 2.0).abs() < 1e-6);
    }
}
