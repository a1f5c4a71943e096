//! Controller tuning file
//!
//! All tuning lives in one JSON document with four optional sections:
//!
//! ```json
//! {
//!   "camera":     { "max_distance": 6.0 },
//!   "locomotion": { "sprint_speed": 9.0 },
//!   "roll":       { "duration": 0.7, "use_root_motion": true },
//!   "input":      { "deadzone": 0.15 }
//! }
//! ```
//!
//! Missing sections and fields take their defaults. Loading only fails on I/O
//! or malformed JSON; out-of-range values are corrected by
//! [`ControllerConfig::sanitized`], which logs each correction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::input::InputConfig;
use crate::player::{LocomotionConfig, RollConfig};

/// Shortest roll accepted (seconds)
pub const MIN_ROLL_DURATION: f32 = 0.05;

/// Errors from reading a tuning file.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON deserialization error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Complete controller tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub camera: CameraConfig,
    pub locomotion: LocomotionConfig,
    pub roll: RollConfig,
    pub input: InputConfig,
}

impl ControllerConfig {
    /// Parse a tuning document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a tuning file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded controller config from {}", path.display());
        Ok(config)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the tuning to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Copy with every out-of-range value corrected.
    ///
    /// Inverted ranges are swapped, negative sizes and rates are clamped to
    /// zero, and ratios are clamped into their valid range. Each correction
    /// is logged at warn level.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        sanitize_camera(&mut config.camera);
        sanitize_locomotion(&mut config.locomotion);
        sanitize_roll(&mut config.roll);
        sanitize_input(&mut config.input);
        config
    }
}

/// Clamp `value` to at least `min`, logging if it changed.
fn at_least(name: &str, value: &mut f32, min: f32) {
    if !(*value >= min) {
        log::warn!("{name} = {value} is below {min}, clamping");
        *value = min;
    }
}

/// Swap a `(low, high)` pair if inverted, logging if it changed.
fn ordered(name: &str, low: &mut f32, high: &mut f32) {
    if *low > *high {
        log::warn!("{name} range [{low}, {high}] is inverted, swapping");
        std::mem::swap(low, high);
    }
}

fn sanitize_camera(camera: &mut CameraConfig) {
    at_least("camera.min_distance", &mut camera.min_distance, 0.0);
    at_least("camera.max_distance", &mut camera.max_distance, 0.0);
    ordered(
        "camera distance",
        &mut camera.min_distance,
        &mut camera.max_distance,
    );
    ordered(
        "camera pitch",
        &mut camera.vertical_min,
        &mut camera.vertical_max,
    );
    at_least("camera.camera_radius", &mut camera.camera_radius, 0.0);
    at_least("camera.recovery_rate", &mut camera.recovery_rate, 0.0);
    at_least("camera.smooth_time", &mut camera.smooth_time, 0.0);
}

fn sanitize_locomotion(locomotion: &mut LocomotionConfig) {
    at_least("locomotion.walk_speed", &mut locomotion.walk_speed, 0.0);
    at_least("locomotion.run_speed", &mut locomotion.run_speed, 0.0);
    at_least("locomotion.sprint_speed", &mut locomotion.sprint_speed, 0.0);
    at_least("locomotion.acceleration", &mut locomotion.acceleration, 0.0);
    at_least("locomotion.deceleration", &mut locomotion.deceleration, 0.0);
    at_least("locomotion.rotation_speed", &mut locomotion.rotation_speed, 0.0);
    at_least("locomotion.band_margin", &mut locomotion.band_margin, 0.0);
    at_least("locomotion.blend_smoothing", &mut locomotion.blend_smoothing, 0.0);
    if locomotion.grounded_gravity > 0.0 {
        log::warn!(
            "locomotion.grounded_gravity = {} must not push upward, negating",
            locomotion.grounded_gravity
        );
        locomotion.grounded_gravity = -locomotion.grounded_gravity;
    }
}

fn sanitize_roll(roll: &mut RollConfig) {
    at_least("roll.duration", &mut roll.duration, MIN_ROLL_DURATION);
    at_least("roll.roll_speed", &mut roll.roll_speed, 0.0);
    at_least("roll.height_ratio", &mut roll.height_ratio, 0.0);
    at_least("roll.radius_multiplier", &mut roll.radius_multiplier, 0.0);
    at_least("roll.steering_rate", &mut roll.steering_rate, 0.0);
    at_least("roll.buffer_time", &mut roll.buffer_time, 0.0);
    at_least("roll.grounded_grace", &mut roll.grounded_grace, 0.0);

    if roll.height_ratio > 1.0 {
        log::warn!("roll.height_ratio = {} grows the capsule, clamping to 1", roll.height_ratio);
        roll.height_ratio = 1.0;
    }
    if !(0.0..=1.0).contains(&roll.chain_threshold) {
        let clamped = if roll.chain_threshold.is_nan() {
            RollConfig::default().chain_threshold
        } else {
            roll.chain_threshold.clamp(0.0, 1.0)
        };
        log::warn!("roll.chain_threshold = {} out of [0, 1], using {clamped}", roll.chain_threshold);
        roll.chain_threshold = clamped;
    }
    if !roll.curve.is_sorted() {
        log::warn!("roll.curve keys are unsorted or non-finite, sorting");
        roll.curve = roll.curve.sanitized();
    }
}

fn sanitize_input(input: &mut InputConfig) {
    at_least("input.deadzone", &mut input.deadzone, 0.0);
    if input.deadzone >= 1.0 {
        log::warn!("input.deadzone = {} swallows the whole stick, using 0.99", input.deadzone);
        input.deadzone = 0.99;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ControllerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_partial_section() {
        let config =
            ControllerConfig::from_json_str(r#"{ "roll": { "duration": 1.0 } }"#).unwrap();
        assert_eq!(config.roll.duration, 1.0);
        assert_eq!(config.roll.chain_threshold, 0.75);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let result = ControllerConfig::from_json_str(r#"{ "camera": { "min_distance": "#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_wrong_type_is_json_error() {
        let result = ControllerConfig::from_json_str(r#"{ "roll": { "duration": "long" } }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ControllerConfig::load(Path::new("/nonexistent/controller.json"));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = ControllerConfig::default();
        config.camera.max_distance = 7.5;
        config.roll.use_root_motion = true;

        let json = config.to_json_string().unwrap();
        assert_eq!(ControllerConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_sanitized_swaps_inverted_ranges() {
        let mut config = ControllerConfig::default();
        config.camera.min_distance = 6.0;
        config.camera.max_distance = 2.0;
        config.camera.vertical_min = 40.0;
        config.camera.vertical_max = -10.0;

        let fixed = config.sanitized();
        assert_eq!(fixed.camera.min_distance, 2.0);
        assert_eq!(fixed.camera.max_distance, 6.0);
        assert_eq!(fixed.camera.vertical_min, -10.0);
        assert_eq!(fixed.camera.vertical_max, 40.0);
    }

    #[test]
    fn test_sanitized_roll_values() {
        let mut config = ControllerConfig::default();
        config.roll.duration = 0.0;
        config.roll.chain_threshold = 1.5;
        config.roll.height_ratio = 2.0;

        let fixed = config.sanitized();
        assert_eq!(fixed.roll.duration, MIN_ROLL_DURATION);
        assert_eq!(fixed.roll.chain_threshold, 1.0);
        assert_eq!(fixed.roll.height_ratio, 1.0);
    }

    #[test]
    fn test_sanitized_default_is_unchanged() {
        let config = ControllerConfig::default();
        assert_eq!(config.sanitized(), config);
    }
}
