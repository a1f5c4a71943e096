//! Device-backed input source
//!
//! Combines keyboard, gamepad and pointer state into one [`InputSnapshot`]
//! per tick:
//!
//! - **Movement, sprint, walk, roll** come from exactly one device. A
//!   connected gamepad wins; otherwise the keyboard is used. The two are
//!   never summed.
//! - **Look** sums every source: right stick (after the deadzone) plus the
//!   pointer delta, each with its own scale.

use glam::Vec2;

use super::{
    GamepadState, InputConfig, InputSnapshot, InputSource, KeyboardState, PointerState,
    apply_deadzone,
};

/// [`InputSource`] backed by device state the host keeps up to date.
#[derive(Debug, Clone, Default)]
pub struct DeviceInput {
    pub keyboard: KeyboardState,
    pub gamepad: GamepadState,
    pub pointer: PointerState,
    pub config: InputConfig,
}

impl DeviceInput {
    /// Create device input with the given tuning and a captured pointer.
    pub fn new(config: InputConfig) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            gamepad: GamepadState::default(),
            pointer: PointerState::new(),
            config,
        }
    }

    /// Whether movement currently comes from the gamepad.
    pub fn gamepad_active(&self) -> bool {
        self.gamepad.connected
    }
}

impl InputSource for DeviceInput {
    fn sample(&mut self) -> InputSnapshot {
        // Drain both edges so a press on the inactive device never fires later
        let key_roll = self.keyboard.take_roll_press();
        let pad_roll = self.gamepad.take_roll_press();

        let pointer = self.pointer.consume_delta();
        // Screen y grows downward; look y grows upward
        let mut look = Vec2::new(pointer.x, -pointer.y) * self.config.mouse_look_scale;

        let snapshot = if self.gamepad.connected {
            look += apply_deadzone(self.gamepad.right_stick, self.config.deadzone)
                * self.config.stick_look_scale;
            InputSnapshot::new(
                look,
                apply_deadzone(self.gamepad.left_stick, self.config.deadzone),
            )
            .with_sprint(self.gamepad.sprint)
            .with_walk(self.gamepad.walk)
            .with_roll(pad_roll)
        } else {
            InputSnapshot::new(look, self.keyboard.move_axis())
                .with_sprint(self.keyboard.movement.sprint)
                .with_walk(self.keyboard.movement.walk)
                .with_roll(key_roll)
        };

        log::trace!(
            "input sample: move={:?} look={:?} roll={}",
            snapshot.move_axis,
            snapshot.look_delta,
            snapshot.roll_pressed
        );
        snapshot
    }
}
