//! Heads-up display port
//!
//! The score readout, start prompt, on-screen controls, instructions and the
//! results panel shown after a crash.

use crate::consts::CAMERA_WIDTH;
use crate::sim::arc_center_x;

/// Prompt shown in the score slot while waiting to start
pub const START_PROMPT: &str = "Press UP";

/// Everything the controller needs from the page
pub trait Display {
    /// Show the lap count in the score slot
    fn show_score(&mut self, laps: u32);
    /// Show the start prompt in the score slot
    fn show_prompt(&mut self);
    fn set_results_visible(&mut self, visible: bool);
    /// On-screen accelerate/decelerate buttons
    fn set_controls_visible(&mut self, visible: bool);
    fn set_instructions_visible(&mut self, visible: bool);
}

/// In-memory display, used natively and in tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudState {
    pub score_text: String,
    pub results_visible: bool,
    pub controls_visible: bool,
    pub instructions_visible: bool,
    /// How many times the score slot was rewritten
    pub score_updates: u32,
}

impl Display for HudState {
    fn show_score(&mut self, laps: u32) {
        self.score_text = laps.to_string();
        self.score_updates += 1;
    }

    fn show_prompt(&mut self) {
        self.score_text = START_PROMPT.to_string();
        self.score_updates += 1;
    }

    fn set_results_visible(&mut self, visible: bool) {
        self.results_visible = visible;
    }

    fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    fn set_instructions_visible(&mut self, visible: bool) {
        self.instructions_visible = visible;
    }
}

/// Pixel position (left, top) of the score label for a viewport
///
/// Sits over the middle of the player's lane.
pub fn score_label_position(viewport_width: f32, viewport_height: f32) -> (f32, f32) {
    let arc_center_px = arc_center_x() / CAMERA_WIDTH * viewport_width;
    (
        viewport_width / 2.0 - arc_center_px * 1.3,
        viewport_height / 2.0,
    )
}
