//! Collision detection between the player and traffic
//!
//! Each vehicle is reduced to a few sample points ("hit zones") along its
//! heading: two for a car, three for the longer truck. A crash is any qualifying
//! pair of zones closer than `HIT_DISTANCE`. Only the player's front may hit
//! anything; the player's rear only counts when something drives into it
//! head-first.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::state::{PlayerCar, TrafficVehicle, VehicleKind};
use super::track::Direction;
use crate::consts::*;
use crate::settings::HitZoneHeading;

/// Sample points of one vehicle, front to rear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitZones {
    pub front: Vec2,
    /// Only trucks have a middle zone
    pub middle: Option<Vec2>,
    pub rear: Vec2,
}

impl HitZones {
    /// Zones for a vehicle at `center`, sitting at `angle` on its lane
    pub fn new(
        kind: VehicleKind,
        center: Vec2,
        angle: f32,
        direction: Direction,
        heading: HitZoneHeading,
    ) -> Self {
        let along = hit_zone_direction(angle, direction, heading);
        let at = |distance: f32| center + along * distance;

        match kind {
            VehicleKind::Car => Self {
                front: at(CAR_HIT_OFFSET),
                middle: None,
                rear: at(-CAR_HIT_OFFSET),
            },
            VehicleKind::Truck => Self {
                front: at(TRUCK_HIT_OFFSET),
                middle: Some(at(0.0)),
                rear: at(-TRUCK_HIT_OFFSET),
            },
        }
    }

    pub fn for_player(player: &PlayerCar, heading: HitZoneHeading) -> Self {
        Self::new(
            VehicleKind::Car,
            player.position,
            player.total_angle(),
            Direction::Clockwise,
            heading,
        )
    }

    pub fn for_vehicle(vehicle: &TrafficVehicle, heading: HitZoneHeading) -> Self {
        Self::new(
            vehicle.kind,
            vehicle.position,
            vehicle.angle,
            vehicle.direction,
            heading,
        )
    }

    /// Points front to rear, matching marker order
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        std::iter::once(self.front)
            .chain(self.middle)
            .chain(std::iter::once(self.rear))
    }
}

/// Unit vector hit zones are offset along
pub fn hit_zone_direction(angle: f32, direction: Direction, heading: HitZoneHeading) -> Vec2 {
    let theta = match heading {
        HitZoneHeading::Facing => angle + direction.heading_offset(),
        HitZoneHeading::Legacy => {
            // `angle + flag` used as the condition: any non-zero, non-NaN sum
            // selects the clockwise branch regardless of direction
            let flag = if direction.is_clockwise() { 1.0 } else { 0.0 };
            let biased = angle + flag;
            if biased != 0.0 && !biased.is_nan() {
                -FRAC_PI_2
            } else {
                FRAC_PI_2
            }
        }
    };
    Vec2::new(theta.cos(), theta.sin())
}

/// Whether two zones are close enough to collide (exactly `HIT_DISTANCE` is a miss)
#[inline]
pub fn zones_touch(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < HIT_DISTANCE
}

/// Player front against every zone of the vehicle, player rear against its front
pub fn zones_collide(player: &HitZones, vehicle: &HitZones) -> bool {
    if vehicle.points().any(|zone| zones_touch(player.front, zone)) {
        return true;
    }
    zones_touch(player.rear, vehicle.front)
}

/// Check the player against all traffic
pub fn detect_collision(
    player: &PlayerCar,
    traffic: &[TrafficVehicle],
    heading: HitZoneHeading,
) -> bool {
    let player_zones = HitZones::for_player(player, heading);
    traffic
        .iter()
        .any(|vehicle| zones_collide(&player_zones, &HitZones::for_vehicle(vehicle, heading)))
}
