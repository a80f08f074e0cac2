//! Traffic spawning
//!
//! One vehicle joins at the start of a run and one more every fifth lap. At most
//! one vehicle is added per frame, even if the lap count jumped past several
//! thresholds at once.

use rand::Rng;

use super::state::VehicleKind;
use super::track::Direction;
use crate::consts::LAPS_PER_VEHICLE;

/// Rolled attributes of a new traffic vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRoll {
    pub kind: VehicleKind,
    pub speed: f32,
    pub direction: Direction,
}

/// Whether traffic lags the lap count: `count < (laps + 1) / 5`
#[inline]
pub fn needs_vehicle(laps: u32, count: usize) -> bool {
    (count as u64) * (LAPS_PER_VEHICLE as u64) < laps as u64 + 1
}

/// Speed multiplier for a vehicle type, uniform over its closed range
pub fn roll_speed<R: Rng>(rng: &mut R, kind: VehicleKind) -> f32 {
    let (min, max) = kind.speed_range();
    rng.random_range(min..=max)
}

/// Pick type, speed and direction for a new vehicle
pub fn roll_vehicle<R: Rng>(rng: &mut R) -> SpawnRoll {
    let kind = if rng.random_bool(0.5) {
        VehicleKind::Car
    } else {
        VehicleKind::Truck
    };
    let speed = roll_speed(rng, kind);
    let direction = if rng.random_bool(0.5) {
        Direction::Clockwise
    } else {
        Direction::CounterClockwise
    };

    SpawnRoll {
        kind,
        speed,
        direction,
    }
}
