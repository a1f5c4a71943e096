//! Locomotion and roll tuning
//!
//! Every field has a default so partial JSON configs deserialize cleanly.
//!
//! # Defaults
//!
//! | Setting | Value |
//! |---|---|
//! | Walk / run / sprint | 2.0 / 5.5 / 8.0 m/s |
//! | Acceleration / deceleration | 12 / 18 m/s² |
//! | Gravity | -9.81 m/s², grounded -2 m/s |
//! | Roll | 0.8 s at 8 m/s, half height |

use serde::{Deserialize, Serialize};

use super::curve::RollCurve;

/// Default walk speed in meters per second
pub const WALK_SPEED: f32 = 2.0;

/// Default run speed in meters per second
pub const RUN_SPEED: f32 = 5.5;

/// Default sprint speed in meters per second
pub const SPRINT_SPEED: f32 = 8.0;

/// Default gravity acceleration in meters per second squared (negative = down)
pub const GRAVITY: f32 = -9.81;

/// Vertical speed held while grounded, keeps the capsule pressed onto slopes
pub const GROUNDED_GRAVITY: f32 = -2.0;

/// Input magnitudes at or below this are treated as no input
pub const MOVE_THRESHOLD: f32 = 0.1;

/// Normal movement tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Speed with the walk modifier and a light stick push (m/s)
    pub walk_speed: f32,
    /// Default movement speed (m/s)
    pub run_speed: f32,
    /// Speed with the sprint modifier (m/s)
    pub sprint_speed: f32,
    /// Rate used when speeding up (m/s²)
    pub acceleration: f32,
    /// Rate used when slowing down (m/s²), usually higher than acceleration
    pub deceleration: f32,
    /// Facing slerp rate toward the velocity direction (per second)
    pub rotation_speed: f32,
    /// Gravity acceleration (m/s², negative = down)
    pub gravity: f32,
    /// Vertical velocity while grounded (m/s, negative)
    pub grounded_gravity: f32,
    /// Magnitude below which the walk modifier applies
    pub walk_threshold: f32,
    /// Added to walk/run speed to form the animation band edges
    pub band_margin: f32,
    /// Smoothing rate for the animation blend value (per second)
    pub blend_smoothing: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            run_speed: RUN_SPEED,
            sprint_speed: SPRINT_SPEED,
            acceleration: 12.0,
            deceleration: 18.0,
            rotation_speed: 10.0,
            gravity: GRAVITY,
            grounded_gravity: GROUNDED_GRAVITY,
            walk_threshold: 0.6,
            band_margin: 0.5,
            blend_smoothing: 10.0,
        }
    }
}

/// Dodge roll tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// Length of one roll (seconds)
    pub duration: f32,
    /// Peak kinematic roll speed (m/s), scaled by `curve`
    pub roll_speed: f32,
    /// Speed multiplier over normalized roll time
    pub curve: RollCurve,
    /// Capsule height while rolling, as a fraction of rest height
    pub height_ratio: f32,
    /// Capsule radius while rolling, as a multiple of rest radius
    pub radius_multiplier: f32,
    /// Upward offset applied to the visual model while rolling (meters)
    pub visual_lift: f32,
    /// Facing slerp rate toward input during a roll (per second, 0 = no steering)
    pub steering_rate: f32,
    /// Take roll displacement from animation root motion instead of `curve`
    pub use_root_motion: bool,
    /// How long a roll press stays armed (seconds)
    pub buffer_time: f32,
    /// How long after leaving the ground a roll is still admitted (seconds)
    pub grounded_grace: f32,
    /// Fraction of `duration` after which a queued roll may cut in
    pub chain_threshold: f32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            duration: 0.8,
            roll_speed: 8.0,
            curve: RollCurve::default(),
            height_ratio: 0.5,
            radius_multiplier: 1.0,
            visual_lift: 0.3,
            steering_rate: 4.0,
            use_root_motion: false,
            buffer_time: 0.2,
            grounded_grace: 0.2,
            chain_threshold: 0.75,
        }
    }
}
