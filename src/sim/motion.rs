//! Per-frame motion along the lanes
//!
//! Everything here is closed-form circular motion scaled by elapsed time, so the
//! result does not depend on the frame rate.

use super::state::{InputState, PlayerCar, TrafficVehicle};
use crate::consts::*;

/// Player angular speed (rad/ms) for the held controls
///
/// Accelerate wins when both controls are held.
pub fn player_speed(input: &InputState) -> f32 {
    if input.accelerate {
        BASE_SPEED * ACCELERATE_FACTOR
    } else if input.decelerate {
        BASE_SPEED * DECELERATE_FACTOR
    } else {
        BASE_SPEED
    }
}

/// Advance the player by `dt` milliseconds; the player always runs clockwise
pub fn move_player(player: &mut PlayerCar, input: &InputState, dt: f32) {
    let dt = dt.max(0.0);
    player.angle_moved -= player_speed(input) * dt;
    player.update_pose();
}

/// Advance one traffic vehicle by `dt` milliseconds in its own direction
pub fn move_vehicle(vehicle: &mut TrafficVehicle, dt: f32) {
    let dt = dt.max(0.0);
    vehicle.angle += vehicle.direction.sign() * BASE_SPEED * dt * vehicle.speed;
    vehicle.update_pose();
}

/// Advance all traffic, keeping spawn order
pub fn move_traffic(traffic: &mut [TrafficVehicle], dt: f32) {
    for vehicle in traffic {
        move_vehicle(vehicle, dt);
    }
}
