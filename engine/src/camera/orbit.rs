//! Orbit Camera
//!
//! Third-person camera that orbits an anchor point on the character.
//!
//! # Per-tick pipeline
//!
//! 1. Look input accumulates into yaw/pitch (pitch is inverted-Y and clamped)
//! 2. The desired position sits `max_distance` behind the anchor along the
//!    orbit orientation
//! 3. A sphere is swept from the anchor toward that position. A hit snaps the
//!    distance in immediately so the camera never shows the inside of a wall,
//!    even for one frame; with a clear line the distance eases back out
//! 4. The camera position follows the collision-corrected point through a
//!    critically damped spring and then looks at the anchor
//!
//! # Angles
//!
//! Yaw and pitch are stored in degrees. Yaw 0 looks toward -Z and grows toward
//! +X. Positive pitch tilts the view down, so the default 20° looks down at the
//! character from above.
//!
//! # Usage
//!
//! ```rust,ignore
//! use third_person_engine::camera::{CameraConfig, OrbitCamera};
//!
//! let mut camera = OrbitCamera::new(CameraConfig::default());
//! camera.initialize(character.facing_yaw(), 20.0);
//! camera.snap_to(&character, &world);
//!
//! // Each frame, after the character has moved:
//! camera.update(dt, look_delta, Some(&character), &world);
//! ```

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::smoothing::{exp_approach, smooth_damp};
use crate::physics::{LayerMask, PhysicsWorld};

/// Something the camera can orbit.
///
/// The camera only ever reads through this trait; it never holds on to the
/// anchor between ticks.
pub trait CameraAnchor {
    /// World-space point the camera orbits and looks at.
    fn anchor_position(&self) -> Vec3;

    /// Facing yaw of the anchor in degrees (0 = -Z, positive toward +X).
    fn facing_yaw(&self) -> f32;
}

/// Tuning for [`OrbitCamera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Degrees of rotation per unit of look input
    pub sensitivity: f32,
    /// Lowest pitch in degrees (negative looks up)
    pub vertical_min: f32,
    /// Highest pitch in degrees (positive looks down)
    pub vertical_max: f32,
    /// Pitch applied by [`OrbitCamera::initialize`] at spawn
    pub start_pitch: f32,
    /// Closest the camera may get to the anchor
    pub min_distance: f32,
    /// Preferred orbit distance when nothing is in the way
    pub max_distance: f32,
    /// Radius of the swept collision sphere
    pub camera_radius: f32,
    /// Layers that block the camera
    pub collision_layers: LayerMask,
    /// Rate (per second) at which the distance recovers after an obstruction clears
    pub recovery_rate: f32,
    /// Smooth-damp time constant for the camera position (seconds)
    pub smooth_time: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 2.0,
            vertical_min: -30.0,
            vertical_max: 70.0,
            start_pitch: 20.0,
            min_distance: 1.0,
            max_distance: 5.0,
            camera_radius: 0.3,
            collision_layers: LayerMask::default(),
            recovery_rate: 10.0,
            smooth_time: 0.1,
        }
    }
}

/// Mutable orbit state.
///
/// Fields are private so the pitch and distance bounds cannot be broken from
/// outside; everything is readable through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    yaw: f32,
    pitch: f32,
    current_distance: f32,
    smoothed_position: Vec3,
    smoothing_velocity: Vec3,
    rotation: Quat,
}

impl CameraRig {
    /// Orbit yaw in degrees.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Orbit pitch in degrees.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Collision-corrected orbit distance.
    #[inline]
    pub fn current_distance(&self) -> f32 {
        self.current_distance
    }

    /// Camera world position after smoothing.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.smoothed_position
    }

    /// Velocity state carried by the smoothing spring.
    #[inline]
    pub fn smoothing_velocity(&self) -> Vec3 {
        self.smoothing_velocity
    }

    /// Camera world rotation (looking at the anchor).
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }
}

/// Quaternion for an orbit orientation given in degrees.
///
/// The result maps -Z (camera forward) to the viewing direction.
pub fn orbit_rotation(yaw_degrees: f32, pitch_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians()) * Quat::from_rotation_x(-pitch_degrees.to_radians())
}

/// Yaw-only rotation for a facing angle in degrees.
#[inline]
pub fn rotation_from_yaw(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}

/// Facing yaw in degrees of a direction, ignoring its vertical component.
#[inline]
pub fn yaw_from_direction(direction: Vec3) -> f32 {
    direction.x.atan2(-direction.z).to_degrees()
}

/// Rotation looking along `direction`, or `None` if it is degenerate.
fn look_rotation(direction: Vec3) -> Option<Quat> {
    let direction = direction.try_normalize()?;
    let pitch = (-direction.y).clamp(-1.0, 1.0).asin().to_degrees();
    Some(orbit_rotation(yaw_from_direction(direction), pitch))
}

/// Third-person orbit camera component.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    rig: CameraRig,
}

impl OrbitCamera {
    /// Create a camera at the origin, at full distance, with the configured start pitch.
    pub fn new(config: CameraConfig) -> Self {
        let pitch = config.start_pitch.clamp(config.vertical_min, config.vertical_max);
        Self {
            rig: CameraRig {
                yaw: 0.0,
                pitch,
                current_distance: config.max_distance,
                smoothed_position: Vec3::ZERO,
                smoothing_velocity: Vec3::ZERO,
                rotation: orbit_rotation(0.0, pitch),
            },
            config,
        }
    }

    /// Tuning currently in use.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Replace the tuning, re-clamping the rig into the new bounds.
    pub fn set_config(&mut self, config: CameraConfig) {
        self.config = config;
        self.rig.pitch = self.rig.pitch.clamp(config.vertical_min, config.vertical_max);
        self.rig.current_distance = self
            .rig
            .current_distance
            .clamp(config.min_distance, config.max_distance);
    }

    /// Orbit state.
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Camera world position.
    pub fn position(&self) -> Vec3 {
        self.rig.smoothed_position
    }

    /// Camera world rotation.
    pub fn rotation(&self) -> Quat {
        self.rig.rotation
    }

    /// Camera forward direction (unit length).
    pub fn forward(&self) -> Vec3 {
        self.rig.rotation * Vec3::NEG_Z
    }

    /// Camera right direction (unit length).
    pub fn right(&self) -> Vec3 {
        self.rig.rotation * Vec3::X
    }

    /// Orbit orientation built from the current yaw and pitch.
    pub fn orbit_orientation(&self) -> Quat {
        orbit_rotation(self.rig.yaw, self.rig.pitch)
    }

    /// Reset the orbit angles and distance.
    ///
    /// Yaw comes from the character's facing at spawn; pitch is clamped into
    /// the configured range. The distance starts fully zoomed out.
    pub fn initialize(&mut self, initial_yaw: f32, start_pitch: f32) {
        self.rig.yaw = initial_yaw;
        self.rig.pitch = start_pitch.clamp(self.config.vertical_min, self.config.vertical_max);
        self.rig.current_distance = self.config.max_distance;
        self.rig.smoothing_velocity = Vec3::ZERO;
        self.rig.rotation = self.orbit_orientation();
    }

    /// Place the camera at its collision-corrected orbit position immediately,
    /// skipping smoothing. Used at spawn and after teleports.
    pub fn snap_to(&mut self, target: &dyn CameraAnchor, world: &dyn PhysicsWorld) {
        let anchor = target.anchor_position();
        let forward = self.orbit_orientation() * Vec3::NEG_Z;
        self.resolve_distance(anchor, forward, world, 0.0);

        self.rig.smoothed_position = anchor - forward * self.rig.current_distance;
        self.rig.smoothing_velocity = Vec3::ZERO;
        self.rig.rotation = look_rotation(anchor - self.rig.smoothed_position)
            .unwrap_or_else(|| self.orbit_orientation());
    }

    /// Advance the camera by one tick.
    ///
    /// Does nothing when `target` is `None`.
    pub fn update(
        &mut self,
        dt: f32,
        look_input: Vec2,
        target: Option<&dyn CameraAnchor>,
        world: &dyn PhysicsWorld,
    ) {
        let Some(target) = target else {
            return;
        };
        let dt = dt.max(0.0);

        // Inverted-Y: pushing up (positive y) lowers pitch, looking up
        self.rig.yaw += look_input.x * self.config.sensitivity;
        self.rig.pitch = (self.rig.pitch - look_input.y * self.config.sensitivity)
            .clamp(self.config.vertical_min, self.config.vertical_max);

        let orientation = self.orbit_orientation();
        let forward = orientation * Vec3::NEG_Z;
        let anchor = target.anchor_position();

        self.resolve_distance(anchor, forward, world, dt);

        let final_position = anchor - forward * self.rig.current_distance;
        self.rig.smoothed_position = smooth_damp(
            self.rig.smoothed_position,
            final_position,
            &mut self.rig.smoothing_velocity,
            self.config.smooth_time,
            dt,
        );

        self.rig.rotation =
            look_rotation(anchor - self.rig.smoothed_position).unwrap_or(orientation);
    }

    /// Sweep from the anchor toward the desired position and update the
    /// orbit distance.
    ///
    /// `dt == 0` with no hit jumps straight to `max_distance` (used when
    /// snapping).
    fn resolve_distance(&mut self, anchor: Vec3, forward: Vec3, world: &dyn PhysicsWorld, dt: f32) {
        let min = self.config.min_distance;
        let max = self.config.max_distance;

        let desired = anchor - forward * max;
        let hit = (desired - anchor).try_normalize().and_then(|direction| {
            world.sphere_cast(
                anchor,
                self.config.camera_radius,
                direction,
                max,
                self.config.collision_layers,
            )
        });

        self.rig.current_distance = match hit {
            Some(hit) => hit.distance.clamp(min, max),
            None if dt > 0.0 => {
                exp_approach(self.rig.current_distance, max, self.config.recovery_rate, dt)
                    .clamp(min, max)
            }
            None => max,
        };
    }
}
