//! Oval Rush - An oval-track arcade driving game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (track, motion, spawning, collisions)
//! - `game`: Idle/Running/Crashed controller wiring the sim to its collaborators
//! - `scene`: Scene graph port and vehicle factory
//! - `hud`: Score readout and panels port
//! - `input`: Keyboard and on-screen button events
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Startup feature toggles

pub mod game;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use game::{Game, LoopControl};
pub use hud::{Display, HudState};
pub use input::{Control, InputEvent, InputSource};
pub use scene::{SceneGraph, SceneHandle};
pub use settings::{Config, HitZoneHeading};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Base angular speed in radians per millisecond
    pub const BASE_SPEED: f32 = 0.0017;
    /// Player speed multiplier while accelerating
    pub const ACCELERATE_FACTOR: f32 = 2.0;
    /// Player speed multiplier while decelerating
    pub const DECELERATE_FACTOR: f32 = 0.5;
    /// Player starts on the far left of its lane
    pub const PLAYER_ANGLE_INITIAL: f32 = PI;

    /// Track dimensions (world units)
    pub const TRACK_RADIUS: f32 = 225.0;
    pub const TRACK_WIDTH: f32 = 45.0;
    /// Inner arc of the lanes meets the outer arc at this angle
    pub const ARC_ANGLE: f32 = PI / 3.0;

    /// Hit zone offsets along the vehicle heading
    pub const CAR_HIT_OFFSET: f32 = 15.0;
    pub const TRUCK_HIT_OFFSET: f32 = 35.0;
    /// Two hit zones closer than this collide
    pub const HIT_DISTANCE: f32 = 40.0;

    /// Speed multiplier ranges sampled at spawn
    pub const CAR_SPEED_RANGE: (f32, f32) = (1.0, 2.0);
    pub const TRUCK_SPEED_RANGE: (f32, f32) = (0.6, 1.5);
    /// One more vehicle joins every this many laps
    pub const LAPS_PER_VEHICLE: u32 = 5;

    /// Visible world width of the orthographic camera
    pub const CAMERA_WIDTH: f32 = 960.0;
    /// Delay before the controls and instructions fade in (ms)
    pub const HINT_DELAY_MS: i32 = 4000;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Laps completed for a signed angular displacement
#[inline]
pub fn laps_for(angle_moved: f32) -> u32 {
    (angle_moved.abs() / std::f32::consts::TAU).floor() as u32
}
