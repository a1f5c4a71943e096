//! Input Module
//!
//! Turns raw device state into the per-tick [`InputSnapshot`] the controller
//! consumes. The controller only ever sees snapshots through [`InputSource`],
//! so it never needs to know which devices exist.
//!
//! This module is decoupled from any specific windowing system; hosts forward
//! key, stick and pointer events into the device states.
//!
//! # Example
//!
//! ```rust,ignore
//! use third_person_engine::input::{DeviceInput, InputSource, KeyCode};
//!
//! let mut devices = DeviceInput::default();
//!
//! // From the event loop
//! devices.keyboard.handle_key(KeyCode::W, true);
//! devices.pointer.accumulate_delta(12.0, -3.0);
//!
//! // Once per tick
//! let snapshot = devices.sample();
//! ```

pub mod device;
pub mod gamepad;
pub mod keyboard;
pub mod pointer;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use device::DeviceInput;
pub use gamepad::GamepadState;
pub use keyboard::{KeyCode, KeyboardState};
pub use pointer::PointerState;

/// Everything the controller reads from input in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Camera look input (x = yaw right, y = look up)
    pub look_delta: Vec2,
    /// Movement axis (x = strafe right, y = forward), magnitude at most 1
    pub move_axis: Vec2,
    /// Sprint modifier held
    pub sprint_held: bool,
    /// Walk modifier held
    pub walk_held: bool,
    /// Roll button went down this tick
    pub roll_pressed: bool,
}

impl InputSnapshot {
    /// Build a snapshot, capping the move axis to unit length.
    pub fn new(look_delta: Vec2, move_axis: Vec2) -> Self {
        Self {
            look_delta,
            move_axis: move_axis.clamp_length_max(1.0),
            ..Self::default()
        }
    }

    /// Builder: set the sprint modifier.
    pub fn with_sprint(mut self, held: bool) -> Self {
        self.sprint_held = held;
        self
    }

    /// Builder: set the walk modifier.
    pub fn with_walk(mut self, held: bool) -> Self {
        self.walk_held = held;
        self
    }

    /// Builder: set the roll press.
    pub fn with_roll(mut self, pressed: bool) -> Self {
        self.roll_pressed = pressed;
        self
    }

    /// Length of the move axis.
    #[inline]
    pub fn move_magnitude(&self) -> f32 {
        self.move_axis.length()
    }
}

/// Anything that can produce one [`InputSnapshot`] per tick.
///
/// Sampling may consume accumulated state (pointer deltas, press edges), so it
/// takes `&mut self` and must be called exactly once per tick.
pub trait InputSource {
    fn sample(&mut self) -> InputSnapshot;
}

/// Replays a fixed snapshot every tick. Handy for scripted drivers.
impl InputSource for InputSnapshot {
    fn sample(&mut self) -> InputSnapshot {
        *self
    }
}

/// Device tuning: stick deadzone and look scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Stick magnitudes at or below this read as zero
    pub deadzone: f32,
    /// Look units per unit of right-stick deflection
    pub stick_look_scale: f32,
    /// Look units per pointer pixel
    pub mouse_look_scale: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            deadzone: 0.1,
            stick_look_scale: 1.0,
            mouse_look_scale: 0.05,
        }
    }
}

/// Radial deadzone: sticks at or inside `deadzone` read as zero, everything
/// else passes through unchanged.
#[inline]
pub fn apply_deadzone(stick: Vec2, deadzone: f32) -> Vec2 {
    if stick.length() <= deadzone {
        Vec2::ZERO
    } else {
        stick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_caps_move_axis() {
        let snapshot = InputSnapshot::new(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((snapshot.move_magnitude() - 1.0).abs() < 1e-5);

        let small = InputSnapshot::new(Vec2::ZERO, Vec2::new(0.3, 0.0));
        assert_eq!(small.move_axis, Vec2::new(0.3, 0.0));
    }

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(Vec2::new(0.1, 0.0), 0.1), Vec2::ZERO);
        assert_eq!(apply_deadzone(Vec2::new(0.05, 0.05), 0.1), Vec2::ZERO);
        assert_eq!(apply_deadzone(Vec2::new(0.2, 0.0), 0.1), Vec2::new(0.2, 0.0));
    }

    #[test]
    fn test_snapshot_replays_as_source() {
        let mut source = InputSnapshot::new(Vec2::X, Vec2::Y).with_sprint(true);
        let first = source.sample();
        assert_eq!(first, source.sample());
        assert!(first.sprint_held);
    }
}
