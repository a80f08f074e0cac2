//! Per-frame simulation tick
//!
//! Advances the game by one variable-length frame. Ordering is fixed:
//! player motion, lap count, spawn, traffic motion, collision.

use super::collision::{HitZones, detect_collision};
use super::motion::{move_player, move_traffic};
use super::spawn::{needs_vehicle, roll_vehicle};
use super::state::{GameEvent, GamePhase, GameState, InputState, TrafficVehicle};
use crate::laps_for;
use crate::scene::{SceneHandle, VehicleRole, build_vehicle};
use crate::settings::Config;

/// Advance the game state by `dt` milliseconds
///
/// Does nothing unless the game is running. Vehicle bodies (and hit zone markers
/// when enabled) are moved in `scene`; rendering is left to the caller.
pub fn tick<S: SceneHandle + ?Sized>(
    state: &mut GameState,
    input: &InputState,
    dt: f32,
    config: &Config,
    scene: &mut S,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Running {
        return events;
    }

    move_player(&mut state.player, input, dt);
    if let Some(visual) = &state.player.visual {
        visual.place(scene, state.player.position, state.player.rotation);
    }

    let laps = laps_for(state.player.angle_moved);
    if laps != state.score {
        state.score = laps;
        events.push(GameEvent::LapCompleted { laps });
    }

    if needs_vehicle(laps, state.traffic.len()) {
        let roll = roll_vehicle(&mut state.rng);
        let visual = build_vehicle(scene, roll.kind, VehicleRole::Traffic, config.show_hit_zones);
        log::debug!(
            "Spawned {:?} ({:?}, speed {:.2}) at lap {}",
            roll.kind,
            roll.direction,
            roll.speed,
            laps
        );
        state
            .traffic
            .push(TrafficVehicle::new(roll.kind, visual, roll.speed, roll.direction));
        events.push(GameEvent::VehicleSpawned {
            kind: roll.kind,
            direction: roll.direction,
        });
    }

    move_traffic(&mut state.traffic, dt);
    place_traffic(state, scene);

    if config.show_hit_zones {
        place_hit_zone_markers(state, config, scene);
    }

    if detect_collision(&state.player, &state.traffic, config.hit_zone_heading) {
        state.phase = GamePhase::Crashed;
        events.push(GameEvent::Collision);
    }

    events
}

/// Move traffic bodies to their current poses
pub fn place_traffic<S: SceneHandle + ?Sized>(state: &GameState, scene: &mut S) {
    for vehicle in &state.traffic {
        vehicle
            .visual
            .place(scene, vehicle.position, vehicle.rotation);
    }
}

/// Move hit zone markers of every vehicle, player included
pub fn place_hit_zone_markers<S: SceneHandle + ?Sized>(
    state: &GameState,
    config: &Config,
    scene: &mut S,
) {
    if let Some(visual) = &state.player.visual {
        let zones = HitZones::for_player(&state.player, config.hit_zone_heading);
        visual.place_hit_zones(scene, zones.points());
    }
    for vehicle in &state.traffic {
        let zones = HitZones::for_vehicle(vehicle, config.hit_zone_heading);
        vehicle.visual.place_hit_zones(scene, zones.points());
    }
}
