//! Keyboard Input Module
//!
//! Tracks the keys the controller cares about and turns them into a movement
//! axis and modifier flags. Decoupled from winit to use generic key codes.

use glam::Vec2;

/// Generic key codes, independent of windowing system.
///
/// Only keys with a controller binding are listed; hosts map everything else
/// to [`KeyCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,

    // Arrow keys (mirror WASD)
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    // Actions
    Space,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks the current state of movement keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementKeys {
    /// W / ArrowUp - move forward
    pub forward: bool,
    /// S / ArrowDown - move backward
    pub backward: bool,
    /// A / ArrowLeft - strafe left
    pub left: bool,
    /// D / ArrowRight - strafe right
    pub right: bool,
    /// Shift - sprint
    pub sprint: bool,
    /// Ctrl - walk
    pub walk: bool,
    /// Space - roll
    pub roll: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key has a binding and was handled.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::W | KeyCode::ArrowUp => &mut self.forward,
            KeyCode::S | KeyCode::ArrowDown => &mut self.backward,
            KeyCode::A | KeyCode::ArrowLeft => &mut self.left,
            KeyCode::D | KeyCode::ArrowRight => &mut self.right,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => &mut self.sprint,
            KeyCode::ControlLeft | KeyCode::ControlRight => &mut self.walk,
            KeyCode::Space => &mut self.roll,
            KeyCode::Unknown => return false,
        };
        *slot = pressed;
        true
    }

    /// Check if any directional key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }

    /// Reset all movement keys to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete keyboard state tracking.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Held key states
    pub movement: MovementKeys,
    /// Roll key went down since the last [`take_roll_press`](Self::take_roll_press)
    roll_edge: bool,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// OS key repeat (press while already held) does not register a new roll.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::Space && pressed && !self.movement.roll {
            self.roll_edge = true;
        }
        self.movement.handle_key(key, pressed)
    }

    /// Movement axis with diagonals normalized (x = right, y = forward).
    pub fn move_axis(&self) -> Vec2 {
        Vec2::new(
            self.movement.right_axis() as f32,
            self.movement.forward_axis() as f32,
        )
        .normalize_or_zero()
    }

    /// Consume the pending roll press.
    pub fn take_roll_press(&mut self) -> bool {
        std::mem::take(&mut self.roll_edge)
    }

    /// Reset all keyboard state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_default() {
        let keys = MovementKeys::new();
        assert!(!keys.any_pressed());
        assert_eq!(keys.forward_axis(), 0);
        assert_eq!(keys.right_axis(), 0);
    }

    #[test]
    fn test_movement_axes() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::S, true);
        // Both pressed cancels out
        assert_eq!(keys.forward_axis(), 0);

        keys.handle_key(KeyCode::D, true);
        assert_eq!(keys.right_axis(), 1);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::W, true);
        keyboard.handle_key(KeyCode::D, true);

        let axis = keyboard.move_axis();
        assert!((axis.length() - 1.0).abs() < 1e-5);
        assert!(axis.x > 0.0 && axis.y > 0.0);
    }

    #[test]
    fn test_modifiers() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::ShiftRight, true);
        keyboard.handle_key(KeyCode::ControlLeft, true);
        assert!(keyboard.movement.sprint);
        assert!(keyboard.movement.walk);

        keyboard.handle_key(KeyCode::ShiftRight, false);
        assert!(!keyboard.movement.sprint);
    }

    #[test]
    fn test_roll_press_is_edge_triggered() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::Space, true);
        // Key repeat while held
        keyboard.handle_key(KeyCode::Space, true);

        assert!(keyboard.take_roll_press());
        assert!(!keyboard.take_roll_press());

        keyboard.handle_key(KeyCode::Space, false);
        keyboard.handle_key(KeyCode::Space, true);
        assert!(keyboard.take_roll_press());
    }

    #[test]
    fn test_unknown_key() {
        let mut keyboard = KeyboardState::new();
        assert!(!keyboard.handle_key(KeyCode::Unknown, true));
        assert!(!keyboard.movement.any_pressed());
    }
}
