//! Player Module
//!
//! Character state and the per-tick locomotion controller.
//!
//! # Components
//!
//! - [`Character`] - Transform, velocity, grounded state and capsule geometry
//! - [`LocomotionController`] - Gravity, camera-relative movement and the dodge roll
//!   - Roll input buffering with coyote-time admission
//!   - Roll chaining once 75% of a roll has elapsed
//!   - Kinematic (curve-driven) or root-motion roll displacement
//! - [`RollCurve`] - Speed multiplier over normalized roll time

pub mod character;
pub mod config;
pub mod curve;
pub mod movement_controller;
pub mod roll;

pub use character::{Character, DEFAULT_ANCHOR_HEIGHT};
pub use config::{
    GRAVITY, GROUNDED_GRAVITY, LocomotionConfig, MOVE_THRESHOLD, RUN_SPEED, RollConfig,
    SPRINT_SPEED, WALK_SPEED,
};
pub use curve::{CurveInterpolation, CurveKey, RollCurve};
pub use movement_controller::{
    BLEND_IDLE, BLEND_RUN, BLEND_SPRINT, BLEND_WALK, LocomotionController,
    camera_relative_direction, speed_band, target_speed,
};
pub use roll::{RollMotion, RollPhase, RollState};
