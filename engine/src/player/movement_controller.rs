//! Locomotion Controller
//!
//! Drives a [`Character`] once per tick: gravity, camera-relative movement
//! with smooth acceleration, facing, the animation blend, and the dodge roll.
//!
//! # Tick order
//!
//! 1. **Gravity**: grounded query, grounded-gravity reset, vertical move
//! 2. **Roll admission**: a press arms a short buffer; while armed, a roll
//!    starts if the character is grounded (or was, within the grace period),
//!    or queues a continuation if one is already running
//! 3. **Locomotion** when not rolling, otherwise one roll step
//!
//! # Speed selection
//!
//! | Input | Target speed |
//! |---|---|
//! | magnitude ≤ 0.1 | 0 |
//! | sprint held | `sprint_speed` |
//! | walk held, magnitude < 0.6 | `walk_speed` |
//! | otherwise | `run_speed` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use third_person_engine::player::{Character, LocomotionController};
//!
//! let mut controller = LocomotionController::default();
//!
//! // Each frame, before the camera update:
//! controller.update(&mut character, dt, &input, Some(camera.rotation()), &world, Some(&mut animator));
//! ```

use glam::{Quat, Vec2, Vec3};

use super::character::Character;
use super::config::{LocomotionConfig, MOVE_THRESHOLD, RollConfig};
use super::roll;
use crate::animation::{AnimationSink, NullAnimationSink};
use crate::camera::{exp_approach, exp_blend, rotation_from_yaw, yaw_from_direction};
use crate::input::InputSnapshot;
use crate::physics::PhysicsWorld;

/// Animation blend value for each speed band
pub const BLEND_IDLE: f32 = 0.0;
pub const BLEND_WALK: f32 = 0.5;
pub const BLEND_RUN: f32 = 1.0;
pub const BLEND_SPRINT: f32 = 1.5;

/// Below this horizontal speed the facing is left alone
const FACING_MIN_SPEED: f32 = 0.1;

/// Target speed for an input snapshot.
pub fn target_speed(config: &LocomotionConfig, input: &InputSnapshot) -> f32 {
    let magnitude = input.move_magnitude();
    if magnitude <= MOVE_THRESHOLD {
        0.0
    } else if input.sprint_held {
        config.sprint_speed
    } else if input.walk_held && magnitude < config.walk_threshold {
        config.walk_speed
    } else {
        config.run_speed
    }
}

/// Animation band for a horizontal speed.
///
/// Band edges sit `band_margin` above the walk and run speeds, so a
/// character accelerating toward run speed shows the walk band a little
/// longer.
pub fn speed_band(config: &LocomotionConfig, speed: f32) -> f32 {
    if speed < MOVE_THRESHOLD {
        BLEND_IDLE
    } else if speed <= config.walk_speed + config.band_margin {
        BLEND_WALK
    } else if speed <= config.run_speed + config.band_margin {
        BLEND_RUN
    } else {
        BLEND_SPRINT
    }
}

/// World-space movement direction for a move axis, relative to the camera.
///
/// The camera right vector is flattened onto the ground plane and forward is
/// derived from it, so a camera looking straight down still yields a usable
/// basis. With no camera, or a degenerate one, world -Z is forward.
pub fn camera_relative_direction(camera_rotation: Option<Quat>, move_axis: Vec2) -> Vec3 {
    let right = camera_rotation
        .and_then(|rotation| (rotation * Vec3::X).with_y(0.0).try_normalize())
        .unwrap_or(Vec3::X);
    let forward = Vec3::Y.cross(right);

    (forward * move_axis.y + right * move_axis.x).normalize_or_zero()
}

/// Move `current` toward `target` by at most `max_delta`.
#[inline]
fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let diff = target - current;
    let distance = diff.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + diff / distance * max_delta
    }
}

/// Roll tuning with its curve sorted and non-finite keys dropped.
fn with_clean_curve(mut roll: RollConfig) -> RollConfig {
    if !roll.curve.is_sorted() {
        log::warn!("roll curve keys are unsorted or non-finite, sorting");
        roll.curve = roll.curve.sanitized();
    }
    roll
}

/// Per-tick locomotion and roll driver.
///
/// Holds tuning and controller-local timing; all character state lives in
/// [`Character`].
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    locomotion: LocomotionConfig,
    roll: RollConfig,
    /// Sum of every dt seen; all timestamps are on this clock
    clock: f32,
    /// Smoothed animation blend value
    blend: f32,
}

impl LocomotionController {
    /// Create a controller with the given tuning.
    ///
    /// Roll curve keys are sorted and non-finite keys dropped on the way in.
    pub fn new(locomotion: LocomotionConfig, roll: RollConfig) -> Self {
        Self {
            locomotion,
            roll: with_clean_curve(roll),
            clock: 0.0,
            blend: 0.0,
        }
    }

    pub fn locomotion_config(&self) -> &LocomotionConfig {
        &self.locomotion
    }

    pub fn set_locomotion_config(&mut self, config: LocomotionConfig) {
        self.locomotion = config;
    }

    pub fn roll_config(&self) -> &RollConfig {
        &self.roll
    }

    /// Replace the roll tuning. Takes effect on the next roll; a running
    /// roll keeps its motion source.
    pub fn set_roll_config(&mut self, config: RollConfig) {
        self.roll = with_clean_curve(config);
    }

    /// Controller clock (seconds of accumulated dt).
    #[inline]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Current smoothed animation blend value.
    #[inline]
    pub fn blend(&self) -> f32 {
        self.blend
    }

    /// Advance the character by one tick.
    ///
    /// # Arguments
    /// * `character` - Character to drive
    /// * `dt` - Previous frame duration in seconds
    /// * `input` - This tick's input snapshot
    /// * `camera_rotation` - Camera orientation for camera-relative movement, if any
    /// * `world` - Collision queries
    /// * `animation` - Animation sink; without one, cues are dropped and
    ///   root-motion rolls do not move
    pub fn update(
        &mut self,
        character: &mut Character,
        dt: f32,
        input: &InputSnapshot,
        camera_rotation: Option<Quat>,
        world: &dyn PhysicsWorld,
        animation: Option<&mut dyn AnimationSink>,
    ) {
        let dt = dt.max(0.0);
        let mut fallback = NullAnimationSink;
        let sink: &mut dyn AnimationSink = match animation {
            Some(sink) => sink,
            None => &mut fallback,
        };

        self.clock += dt;
        self.apply_gravity(character, dt, world);

        let direction = camera_relative_direction(camera_rotation, input.move_axis);
        let input_direction =
            (input.move_magnitude() > MOVE_THRESHOLD && direction != Vec3::ZERO).then_some(direction);

        self.admit_roll(character, dt, input.roll_pressed, input_direction, sink);

        if character.is_rolling() {
            roll::advance(character, &self.roll, input_direction, dt, world, sink);
        } else {
            self.locomote(character, dt, input, direction, world, sink);
        }
    }

    /// Grounded check, grounded-gravity reset and the vertical move.
    fn apply_gravity(&self, character: &mut Character, dt: f32, world: &dyn PhysicsWorld) {
        character.grounded = world.is_grounded(character.position, character.capsule());
        if character.grounded {
            character.last_grounded_time = self.clock;
            if character.vertical_velocity < 0.0 {
                character.vertical_velocity = self.locomotion.grounded_gravity;
            }
        }

        character.vertical_velocity += self.locomotion.gravity * dt;

        let capsule = *character.capsule();
        character.position = world.move_capsule(
            character.position,
            &capsule,
            Vec3::Y * (character.vertical_velocity * dt),
        );
    }

    /// Roll input buffering, coyote-time admission and continuation queueing.
    fn admit_roll(
        &self,
        character: &mut Character,
        dt: f32,
        pressed: bool,
        input_direction: Option<Vec3>,
        sink: &mut dyn AnimationSink,
    ) {
        if pressed {
            character.roll.buffered_input_timer = self.roll.buffer_time;
        }
        if character.roll.buffered_input_timer <= 0.0 {
            return;
        }

        let in_grace = self.clock - character.last_grounded_time <= self.roll.grounded_grace;

        if character.is_rolling() {
            character.roll.queued_continuation = true;
            character.roll.buffered_input_timer = 0.0;
        } else if character.grounded || in_grace {
            character.roll.buffered_input_timer = 0.0;
            roll::enter(character, &self.roll, input_direction, sink);
        } else {
            character.roll.buffered_input_timer = (character.roll.buffered_input_timer - dt).max(0.0);
        }
    }

    /// Normal movement: velocity, horizontal move, facing and blend.
    fn locomote(
        &mut self,
        character: &mut Character,
        dt: f32,
        input: &InputSnapshot,
        direction: Vec3,
        world: &dyn PhysicsWorld,
        sink: &mut dyn AnimationSink,
    ) {
        let speed = target_speed(&self.locomotion, input);
        let target_velocity = direction * speed;

        let rate = if speed >= character.horizontal_speed() {
            self.locomotion.acceleration
        } else {
            self.locomotion.deceleration
        };
        character.horizontal_velocity =
            move_towards(character.horizontal_velocity, target_velocity, rate * dt);

        let capsule = *character.capsule();
        character.position = world.move_capsule(
            character.position,
            &capsule,
            character.horizontal_velocity * dt,
        );

        if character.horizontal_speed() > FACING_MIN_SPEED {
            let target = rotation_from_yaw(yaw_from_direction(character.horizontal_velocity));
            character.rotation = character
                .rotation
                .slerp(target, exp_blend(self.locomotion.rotation_speed, dt));
        }

        let band = speed_band(&self.locomotion, character.horizontal_speed());
        self.blend = exp_approach(self.blend, band, self.locomotion.blend_smoothing, dt);
        sink.set_blend(self.blend);
    }
}
