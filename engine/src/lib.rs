//! Third-Person Controller Library
//!
//! An orbit camera with collision avoidance and a locomotion controller with
//! a dodge-roll state machine, driven once per tick by a host engine.
//! Physics, animation and input devices are reached through traits, so the
//! crate runs headless.
//!
//! # Modules
//!
//! - [`camera`] - Orbit camera, swept-sphere occlusion and smoothing
//! - [`player`] - Character state, locomotion and the dodge roll
//! - [`input`] - Device state and per-tick input snapshots
//! - [`physics`] - Collision queries, capsule geometry and a reference world
//! - [`animation`] - Animation parameter sink
//! - [`config`] - JSON tuning file
//! - [`rig`] - Tick driver running the controller and camera in order
//!
//! # Example
//!
//! ```ignore
//! use third_person_engine::{ControllerConfig, DeviceInput, PlayerRig};
//! use third_person_engine::physics::{CapsuleGeometry, StaticWorld};
//! use glam::Vec3;
//!
//! let config = ControllerConfig::default();
//! let world = StaticWorld::new(0.0);
//! let mut input = DeviceInput::new(config.input);
//! let mut rig = PlayerRig::spawn(&config, Vec3::ZERO, 0.0, CapsuleGeometry::default(), &world);
//!
//! // Each frame:
//! rig.tick(dt, &mut input, &world, None);
//! ```

pub mod animation;
pub mod camera;
pub mod config;
pub mod input;
pub mod physics;
pub mod player;
pub mod rig;

pub use animation::{AnimationCue, AnimationRecorder, AnimationSink, NullAnimationSink};
pub use camera::{CameraAnchor, CameraConfig, OrbitCamera};
pub use config::{ConfigError, ControllerConfig};
pub use input::{DeviceInput, InputConfig, InputSnapshot, InputSource};
pub use physics::{CapsuleGeometry, LayerMask, PhysicsWorld, StaticWorld};
pub use player::{Character, LocomotionController, RollCurve};
pub use rig::PlayerRig;

static_assertions::assert_impl_all!(Character: Send, Sync, Clone);
static_assertions::assert_impl_all!(LocomotionController: Send, Sync, Clone);
static_assertions::assert_impl_all!(OrbitCamera: Send, Sync, Clone);
static_assertions::assert_impl_all!(PlayerRig: Send, Sync, Clone);
