//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::track::{self, Direction, Lane};
use crate::consts::*;
use crate::scene::VehicleVisual;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first accelerate input
    Idle,
    /// Animation loop active
    Running,
    /// Loop halted after a collision, waiting for reset
    Crashed,
}

/// Traffic vehicle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Truck,
}

impl VehicleKind {
    /// Number of collision sample points along the vehicle
    pub fn hit_zone_count(self) -> usize {
        match self {
            VehicleKind::Car => 2,
            VehicleKind::Truck => 3,
        }
    }

    /// Closed range the spawn speed multiplier is drawn from
    pub fn speed_range(self) -> (f32, f32) {
        match self {
            VehicleKind::Car => CAR_SPEED_RANGE,
            VehicleKind::Truck => TRUCK_SPEED_RANGE,
        }
    }
}

/// Held controls, read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub accelerate: bool,
    pub decelerate: bool,
}

/// Events produced by a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Lap count changed
    LapCompleted { laps: u32 },
    /// A traffic vehicle joined the track
    VehicleSpawned { kind: VehicleKind, direction: Direction },
    /// Player hit traffic; the run is over
    Collision,
}

/// The player's car
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCar {
    /// Scene objects, once the controller has built them
    pub visual: Option<VehicleVisual>,
    /// Angle travelled since the start (radians, negative while driving)
    pub angle_moved: f32,
    pub position: Vec2,
    pub rotation: f32,
}

impl Default for PlayerCar {
    fn default() -> Self {
        let mut player = Self {
            visual: None,
            angle_moved: 0.0,
            position: Vec2::ZERO,
            rotation: 0.0,
        };
        player.update_pose();
        player
    }
}

impl PlayerCar {
    /// Absolute angle on the left lane
    #[inline]
    pub fn total_angle(&self) -> f32 {
        PLAYER_ANGLE_INITIAL + self.angle_moved
    }

    /// Recompute position and rotation from the current angle
    pub fn update_pose(&mut self) {
        let angle = self.total_angle();
        self.position = track::point_on_lane(Lane::Left, angle);
        self.rotation = track::facing(angle, Direction::Clockwise);
    }
}

/// A traffic vehicle on the right lane
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficVehicle {
    pub kind: VehicleKind,
    pub visual: VehicleVisual,
    /// Multiplier on the base speed, fixed at spawn
    pub speed: f32,
    /// Travel direction, fixed at spawn
    pub direction: Direction,
    /// Current angle on the right lane
    pub angle: f32,
    pub position: Vec2,
    pub rotation: f32,
}

impl TrafficVehicle {
    pub fn new(kind: VehicleKind, visual: VehicleVisual, speed: f32, direction: Direction) -> Self {
        // Clockwise traffic enters at the top of the lane, the rest at the bottom
        let angle = if direction.is_clockwise() {
            std::f32::consts::FRAC_PI_2
        } else {
            -std::f32::consts::FRAC_PI_2
        };
        let mut vehicle = Self {
            kind,
            visual,
            speed,
            direction,
            angle,
            position: Vec2::ZERO,
            rotation: 0.0,
        };
        vehicle.update_pose();
        vehicle
    }

    /// Recompute position and rotation from the current angle
    pub fn update_pose(&mut self) {
        self.position = track::point_on_lane(Lane::Right, self.angle);
        self.rotation = track::facing(self.angle, self.direction);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the random source started from
    pub seed: u64,
    /// Random source for spawning
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Player car
    pub player: PlayerCar,
    /// Traffic in spawn order
    pub traffic: Vec<TrafficVehicle>,
    /// Completed laps
    pub score: u32,
    /// Timestamp of the previous frame (ms); `None` until the first frame of a run
    pub last_timestamp: Option<f64>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            player: PlayerCar::default(),
            traffic: Vec::new(),
            score: 0,
            last_timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ObjectKind, SceneGraph, SceneHandle};
    use crate::sim::track::arc_center_x;

    fn visual(scene: &mut SceneGraph, kind: VehicleKind) -> VehicleVisual {
        VehicleVisual {
            body: scene.add(ObjectKind::Vehicle {
                kind,
                role: crate::scene::VehicleRole::Traffic,
            }),
            hit_zones: Vec::new(),
        }
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.traffic.is_empty());
        assert!(state.last_timestamp.is_none());
    }

    #[test]
    fn test_player_starts_facing_up() {
        let player = PlayerCar::default();
        assert!((player.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(player.position.x < -TRACK_RADIUS);
    }

    #[test]
    fn test_traffic_entry_points() {
        let mut scene = SceneGraph::new();

        let cw = TrafficVehicle::new(
            VehicleKind::Car,
            visual(&mut scene, VehicleKind::Car),
            1.5,
            Direction::Clockwise,
        );
        assert!((cw.position.x - arc_center_x()).abs() < 1e-3);
        assert!((cw.position.y - TRACK_RADIUS).abs() < 1e-3);

        let ccw = TrafficVehicle::new(
            VehicleKind::Truck,
            visual(&mut scene, VehicleKind::Truck),
            1.0,
            Direction::CounterClockwise,
        );
        assert!((ccw.position.y + TRACK_RADIUS).abs() < 1e-3);
        assert!(ccw.rotation.abs() < 1e-6);
    }
}
