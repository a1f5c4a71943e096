//! Character state
//!
//! Plain data mutated by [`LocomotionController`](super::LocomotionController)
//! and read by the camera through [`CameraAnchor`].
//!
//! The position is the transform origin; the capsule and visual offsets are
//! relative to it. Capsule geometry can only change inside the roll
//! routine, which always restores the rest copy on exit.

use glam::{Quat, Vec3};

use super::roll::RollState;
use crate::camera::{CameraAnchor, rotation_from_yaw, yaw_from_direction};
use crate::physics::CapsuleGeometry;

/// Default height of the camera anchor above the transform origin (meters)
pub const DEFAULT_ANCHOR_HEIGHT: f32 = 1.5;

/// Player character driven by the locomotion controller.
#[derive(Debug, Clone)]
pub struct Character {
    /// Transform origin in world space
    pub position: Vec3,
    /// Yaw-only facing rotation
    pub rotation: Quat,
    /// Horizontal velocity from normal locomotion (m/s)
    pub horizontal_velocity: Vec3,
    /// Vertical velocity (m/s, positive = up)
    pub vertical_velocity: f32,
    /// Result of the last grounded query
    pub grounded: bool,
    /// Controller clock value of the last grounded tick
    pub last_grounded_time: f32,
    /// Height of the camera anchor above the origin
    pub anchor_height: f32,
    capsule: CapsuleGeometry,
    rest_capsule: CapsuleGeometry,
    visual_offset: Option<Vec3>,
    rest_visual_offset: Option<Vec3>,
    pub(crate) roll: RollState,
}

impl Default for Character {
    fn default() -> Self {
        Self::new(Vec3::ZERO, CapsuleGeometry::default())
    }
}

impl Character {
    /// Create a character at `position` with `capsule` as its rest geometry.
    ///
    /// The capsule is sanitized first, so the rest geometry is always valid.
    pub fn new(position: Vec3, capsule: CapsuleGeometry) -> Self {
        let capsule = capsule.sanitized();
        Self {
            position,
            rotation: Quat::IDENTITY,
            horizontal_velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            grounded: false,
            last_grounded_time: f32::NEG_INFINITY,
            anchor_height: DEFAULT_ANCHOR_HEIGHT,
            capsule,
            rest_capsule: capsule,
            visual_offset: None,
            rest_visual_offset: None,
            roll: RollState::default(),
        }
    }

    /// Attach a visual sub-model at `offset` from the origin.
    pub fn with_visual_offset(mut self, offset: Vec3) -> Self {
        self.visual_offset = Some(offset);
        self.rest_visual_offset = Some(offset);
        self
    }

    /// Builder: face `yaw_degrees`.
    pub fn with_facing_yaw(mut self, yaw_degrees: f32) -> Self {
        self.set_facing_yaw(yaw_degrees);
        self
    }

    /// Current collision capsule.
    #[inline]
    pub fn capsule(&self) -> &CapsuleGeometry {
        &self.capsule
    }

    /// Capsule restored after every roll.
    #[inline]
    pub fn rest_capsule(&self) -> &CapsuleGeometry {
        &self.rest_capsule
    }

    /// Current visual sub-model offset, if one is attached.
    #[inline]
    pub fn visual_offset(&self) -> Option<Vec3> {
        self.visual_offset
    }

    /// Roll state machine.
    #[inline]
    pub fn roll(&self) -> &RollState {
        &self.roll
    }

    /// Whether a roll chain is running.
    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.roll.is_rolling()
    }

    /// World Y of the capsule bottom.
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.position.y + self.capsule.feet_offset()
    }

    /// Horizontal facing direction (unit length).
    pub fn forward(&self) -> Vec3 {
        let forward = self.rotation * Vec3::NEG_Z;
        Vec3::new(forward.x, 0.0, forward.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Face `yaw_degrees` immediately.
    pub fn set_facing_yaw(&mut self, yaw_degrees: f32) {
        self.rotation = rotation_from_yaw(yaw_degrees);
    }

    /// Horizontal speed (m/s).
    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        self.horizontal_velocity.length()
    }

    /// Full velocity including the vertical component.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.horizontal_velocity + Vec3::Y * self.vertical_velocity
    }

    /// Move to `position` and clear all motion. A running roll continues
    /// from the new spot.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.horizontal_velocity = Vec3::ZERO;
        self.vertical_velocity = 0.0;
    }

    pub(crate) fn apply_roll_geometry(&mut self, capsule: CapsuleGeometry, visual_lift: f32) {
        self.capsule = capsule;
        self.visual_offset = self.rest_visual_offset.map(|o| o + Vec3::Y * visual_lift);
    }

    pub(crate) fn restore_rest_geometry(&mut self) {
        self.capsule = self.rest_capsule;
        self.visual_offset = self.rest_visual_offset;
    }
}

impl CameraAnchor for Character {
    fn anchor_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.anchor_height
    }

    fn facing_yaw(&self) -> f32 {
        yaw_from_direction(self.forward())
    }
}
