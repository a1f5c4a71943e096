//! Player rig
//!
//! Owns one character, its locomotion controller and its camera, and runs
//! them in the right order each tick: the character moves first, then the
//! camera follows the fresh transform.

use glam::{Quat, Vec3};

use crate::animation::AnimationSink;
use crate::camera::{CameraAnchor, OrbitCamera};
use crate::config::ControllerConfig;
use crate::input::{InputSnapshot, InputSource};
use crate::physics::{CapsuleGeometry, PhysicsWorld};
use crate::player::{Character, LocomotionController};

/// Character, controller and camera driven together.
#[derive(Debug, Clone)]
pub struct PlayerRig {
    pub character: Character,
    pub locomotion: LocomotionController,
    pub camera: OrbitCamera,
    last_input: InputSnapshot,
}

impl PlayerRig {
    /// Spawn a character at `position` facing `yaw_degrees`, with the camera
    /// behind it at the configured start pitch.
    pub fn spawn(
        config: &ControllerConfig,
        position: Vec3,
        yaw_degrees: f32,
        capsule: CapsuleGeometry,
        world: &dyn PhysicsWorld,
    ) -> Self {
        let character = Character::new(position, capsule).with_facing_yaw(yaw_degrees);
        let locomotion = LocomotionController::new(config.locomotion, config.roll.clone());

        let mut camera = OrbitCamera::new(config.camera);
        camera.initialize(character.facing_yaw(), config.camera.start_pitch);
        camera.snap_to(&character, world);

        log::debug!("spawned player at {position} facing {yaw_degrees:.1}°");

        Self {
            character,
            locomotion,
            camera,
            last_input: InputSnapshot::default(),
        }
    }

    /// Run one tick: sample input, move the character, then the camera.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &mut dyn InputSource,
        world: &dyn PhysicsWorld,
        animation: Option<&mut dyn AnimationSink>,
    ) {
        let snapshot = input.sample();
        self.tick_with(dt, &snapshot, world, animation);
    }

    /// Run one tick from an already-sampled snapshot.
    pub fn tick_with(
        &mut self,
        dt: f32,
        snapshot: &InputSnapshot,
        world: &dyn PhysicsWorld,
        animation: Option<&mut dyn AnimationSink>,
    ) {
        self.locomotion.update(
            &mut self.character,
            dt,
            snapshot,
            Some(self.camera.rotation()),
            world,
            animation,
        );
        self.camera
            .update(dt, snapshot.look_delta, Some(&self.character), world);
        self.last_input = *snapshot;
    }

    /// Snapshot consumed by the most recent tick.
    pub fn last_input(&self) -> &InputSnapshot {
        &self.last_input
    }

    /// Camera world position.
    pub fn camera_position(&self) -> Vec3 {
        self.camera.position()
    }

    /// Camera world rotation.
    pub fn camera_rotation(&self) -> Quat {
        self.camera.rotation()
    }
}
