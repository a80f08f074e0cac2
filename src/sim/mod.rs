//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Elapsed-time motion only (no fixed timestep)
//! - Injected seeded RNG only
//! - Traffic kept in spawn order
//! - No rendering or platform dependencies beyond the `SceneHandle` port

pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{HitZones, detect_collision, hit_zone_direction, zones_collide};
pub use motion::{move_player, move_traffic, player_speed};
pub use spawn::{SpawnRoll, needs_vehicle, roll_speed, roll_vehicle};
pub use state::{
    GameEvent, GamePhase, GameState, InputState, PlayerCar, TrafficVehicle, VehicleKind,
};
pub use tick::tick;
pub use track::{Direction, Lane, arc_center_x, point_on_lane};
