//! Input events from keyboard and on-screen buttons

/// A game control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Accelerate,
    Decelerate,
    Reset,
}

/// Where an input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    /// On-screen control button
    Button,
}

/// A press or release of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Control, InputSource),
    Released(Control),
}

impl InputEvent {
    /// Map a `KeyboardEvent.key` value; reset only reacts to presses
    pub fn from_key(key: &str, pressed: bool) -> Option<Self> {
        let control = match key {
            "ArrowUp" => Control::Accelerate,
            "ArrowDown" => Control::Decelerate,
            "r" | "R" => Control::Reset,
            _ => return None,
        };

        match (control, pressed) {
            (control, true) => Some(InputEvent::Pressed(control, InputSource::Keyboard)),
            (Control::Reset, false) => None,
            (control, false) => Some(InputEvent::Released(control)),
        }
    }
}
