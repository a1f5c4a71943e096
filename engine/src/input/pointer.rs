//! Pointer delta tracker
//!
//! Raw mouse motion accumulates between ticks and is consumed once per
//! sample, so no motion is lost or counted twice regardless of how many OS
//! events arrive per frame.

use glam::Vec2;

/// Captured-pointer motion accumulator.
///
/// # Example
///
/// ```rust,ignore
/// use third_person_engine::input::PointerState;
///
/// let mut pointer = PointerState::new();
///
/// // In event loop: accumulate raw mouse motion
/// pointer.accumulate_delta(10.0, -5.0);
/// pointer.accumulate_delta(3.0, 2.0);
///
/// // In update loop
/// let delta = pointer.consume_delta(); // (13, -3)
/// ```
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Accumulated delta in pixels since last consume (y grows downward).
    delta: Vec2,
    /// Whether the cursor is captured (hidden and confined).
    captured: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    /// Create a new pointer state with zero delta and cursor captured.
    pub fn new() -> Self {
        Self {
            delta: Vec2::ZERO,
            captured: true,
        }
    }

    /// Accumulate raw mouse motion delta, in pixels.
    ///
    /// Ignored while the cursor is not captured.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if self.captured {
            self.delta += Vec2::new(dx, dy);
        }
    }

    /// Return the accumulated delta and reset it to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    /// Current accumulated delta without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> Vec2 {
        self.delta
    }

    /// Set whether the cursor is captured.
    #[inline]
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        // Avoid a camera jump from motion gathered while releasing
        if !captured {
            self.delta = Vec2::ZERO;
        }
    }

    /// Check if the cursor is currently captured.
    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_and_consume() {
        let mut pointer = PointerState::new();
        pointer.accumulate_delta(10.0, 5.0);
        pointer.accumulate_delta(3.0, -2.0);
        assert_eq!(pointer.peek_delta(), Vec2::new(13.0, 3.0));

        assert_eq!(pointer.consume_delta(), Vec2::new(13.0, 3.0));
        assert_eq!(pointer.consume_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_default_is_captured() {
        let mut pointer = PointerState::default();
        assert!(pointer.is_captured());
        pointer.accumulate_delta(4.0, 1.0);
        assert_eq!(pointer.consume_delta(), Vec2::new(4.0, 1.0));
    }

    #[test]
    fn test_release_clears_delta() {
        let mut pointer = PointerState::new();
        pointer.accumulate_delta(10.0, 5.0);
        pointer.set_captured(false);
        assert_eq!(pointer.peek_delta(), Vec2::ZERO);

        // Motion while released is dropped
        pointer.accumulate_delta(4.0, 4.0);
        assert_eq!(pointer.peek_delta(), Vec2::ZERO);
    }
}
