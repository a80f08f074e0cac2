//! Game loop controller
//!
//! Owns the simulation state and its collaborators, turns input events into
//! Idle/Running/Crashed transitions and runs one tick per animation frame.

use crate::hud::Display;
use crate::input::{Control, InputEvent, InputSource};
use crate::scene::{SceneHandle, VehicleRole, build_vehicle};
use crate::settings::Config;
use crate::sim::tick::place_hit_zone_markers;
use crate::sim::{GameEvent, GamePhase, GameState, InputState, PlayerCar, VehicleKind, tick};

/// What the host should do with its animation loop after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Request another frame
    Continue,
    /// Stop requesting frames until the next start
    Stop,
}

/// A game session bound to a scene and a display
pub struct Game<S, D> {
    config: Config,
    state: GameState,
    input: InputState,
    scene: S,
    display: D,
}

impl<S: SceneHandle, D: Display> Game<S, D> {
    /// Build the player's car and park it on the start line, ready to go
    pub fn new(config: Config, seed: u64, mut scene: S, display: D) -> Self {
        let mut state = GameState::new(seed);
        state.player.visual = Some(build_vehicle(
            &mut scene,
            VehicleKind::Car,
            VehicleRole::Player,
            config.show_hit_zones,
        ));

        let mut game = Self {
            config,
            state,
            input: InputState::default(),
            scene,
            display,
        };
        game.reset();
        game
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts that stage scenarios (demos, tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Apply an input event; returns the new phase if it changed
    pub fn handle_input(&mut self, event: InputEvent) -> Option<GamePhase> {
        let before = self.state.phase;

        match event {
            InputEvent::Pressed(Control::Accelerate, _) => {
                self.start();
                self.input.accelerate = true;
            }
            InputEvent::Pressed(Control::Decelerate, source) => {
                // The on-screen brake also starts a run; the Down key does not
                if source == InputSource::Button {
                    self.start();
                }
                self.input.decelerate = true;
            }
            InputEvent::Pressed(Control::Reset, _) => self.reset(),
            InputEvent::Released(Control::Accelerate) => self.input.accelerate = false,
            InputEvent::Released(Control::Decelerate) => self.input.decelerate = false,
            InputEvent::Released(Control::Reset) => {}
        }

        let after = self.state.phase;
        (after != before).then_some(after)
    }

    /// Idle -> Running; returns whether a run started
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }

        self.state.phase = GamePhase::Running;
        self.display.show_score(0);
        self.display.set_controls_visible(true);
        self.display.set_instructions_visible(false);
        log::info!("Run started (seed {})", self.state.seed);
        true
    }

    /// Clear the track and return to Idle, from any phase
    pub fn reset(&mut self) {
        for vehicle in self.state.traffic.drain(..) {
            vehicle.visual.remove_from(&mut self.scene);
        }

        let visual = self.state.player.visual.take();
        self.state.player = PlayerCar {
            visual,
            ..PlayerCar::default()
        };
        self.state.score = 0;
        self.state.last_timestamp = None;
        self.state.phase = GamePhase::Idle;

        self.display.show_prompt();
        self.display.set_results_visible(false);

        if let Some(visual) = &self.state.player.visual {
            visual.place(
                &mut self.scene,
                self.state.player.position,
                self.state.player.rotation,
            );
        }
        if self.config.show_hit_zones {
            place_hit_zone_markers(&self.state, &self.config, &mut self.scene);
        }
        self.scene.render();

        log::info!("Game reset");
    }

    /// Fade in controls, and instructions too if nobody has started yet
    pub fn reveal_hints(&mut self) {
        if self.state.phase == GamePhase::Idle {
            self.display.set_instructions_visible(true);
        }
        self.display.set_controls_visible(true);
    }

    /// Run one animation frame at `timestamp` (ms)
    pub fn frame(&mut self, timestamp: f64) -> LoopControl {
        if self.state.phase != GamePhase::Running {
            return LoopControl::Stop;
        }

        // First frame of a run only establishes the time base
        let Some(last) = self.state.last_timestamp else {
            self.state.last_timestamp = Some(timestamp);
            return LoopControl::Continue;
        };
        let dt = (timestamp - last).max(0.0) as f32;

        let events = tick(
            &mut self.state,
            &self.input,
            dt,
            &self.config,
            &mut self.scene,
        );

        let mut crashed = false;
        for event in events {
            match event {
                GameEvent::LapCompleted { laps } => self.display.show_score(laps),
                GameEvent::VehicleSpawned { .. } => {}
                GameEvent::Collision => {
                    crashed = true;
                    self.display.set_results_visible(true);
                    log::info!(
                        "Crashed after {} laps with {} vehicles on track",
                        self.state.score,
                        self.state.traffic.len()
                    );
                }
            }
        }

        self.scene.render();
        self.state.last_timestamp = Some(timestamp);

        if crashed {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }
}
