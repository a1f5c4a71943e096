//! Gamepad state
//!
//! Sticks and buttons as last reported by the host. Stick values are raw;
//! the deadzone is applied when sampling.

use glam::Vec2;

/// Last known state of a single gamepad.
#[derive(Debug, Clone, Default)]
pub struct GamepadState {
    /// Whether a pad is present. A disconnected pad is ignored entirely.
    pub connected: bool,
    /// Movement stick (x = right, y = up/forward), each axis in [-1, 1]
    pub left_stick: Vec2,
    /// Look stick (x = right, y = up), each axis in [-1, 1]
    pub right_stick: Vec2,
    /// Sprint button held
    pub sprint: bool,
    /// Walk button held
    pub walk: bool,
    roll_held: bool,
    roll_edge: bool,
}

impl GamepadState {
    /// A connected pad at rest.
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    /// Report the roll button level; a released-to-held change registers a press.
    pub fn set_roll_button(&mut self, held: bool) {
        if held && !self.roll_held {
            self.roll_edge = true;
        }
        self.roll_held = held;
    }

    /// Consume the pending roll press.
    pub fn take_roll_press(&mut self) -> bool {
        std::mem::take(&mut self.roll_edge)
    }

    /// Drop the pad: sticks centred, buttons released.
    pub fn disconnect(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_button_edge() {
        let mut pad = GamepadState::connected();
        pad.set_roll_button(true);
        pad.set_roll_button(true);
        assert!(pad.take_roll_press());
        assert!(!pad.take_roll_press());

        pad.set_roll_button(false);
        pad.set_roll_button(true);
        assert!(pad.take_roll_press());
    }

    #[test]
    fn test_disconnect_resets() {
        let mut pad = GamepadState::connected();
        pad.left_stick = Vec2::new(0.5, 0.5);
        pad.disconnect();
        assert!(!pad.connected);
        assert_eq!(pad.left_stick, Vec2::ZERO);
    }
}
