//! Camera Module
//!
//! Third-person orbit camera with swept-sphere collision avoidance.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod orbit;
pub mod smoothing;

pub use orbit::{
    CameraAnchor, CameraConfig, CameraRig, OrbitCamera, orbit_rotation, rotation_from_yaw,
    yaw_from_direction,
};
pub use smoothing::{exp_approach, exp_blend, smooth_damp};
