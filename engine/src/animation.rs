//! Animation collaborator
//!
//! The controller never touches skeletons or clips. It drives the host's
//! animation layer through [`AnimationSink`]: a locomotion blend value, one-shot
//! cues, and the root-motion toggle used by animation-driven rolls.

use glam::Vec3;

/// One-shot animation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    /// Start (or restart, when chaining) the roll clip
    Roll,
}

/// Host-side animation parameter sink.
pub trait AnimationSink {
    /// Locomotion blend: 0 idle, 0.5 walk, 1.0 run, 1.5 sprint.
    fn set_blend(&mut self, value: f32);

    /// Fire a one-shot cue.
    fn trigger(&mut self, cue: AnimationCue);

    /// Enable or disable root-motion application.
    fn set_root_motion(&mut self, enabled: bool);

    /// Displacement the animation produced this tick, in world space.
    fn root_motion_delta(&self) -> Vec3;
}

/// Sink used when the host supplies none: drops every call and reports no
/// root motion.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnimationSink;

impl AnimationSink for NullAnimationSink {
    fn set_blend(&mut self, _value: f32) {}

    fn trigger(&mut self, _cue: AnimationCue) {}

    fn set_root_motion(&mut self, _enabled: bool) {}

    fn root_motion_delta(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// Sink that records every call. Backs the simulation binary and tests.
///
/// While root motion is enabled it reports `root_motion_step` as the
/// per-tick delta, standing in for a roll clip.
#[derive(Debug, Clone, Default)]
pub struct AnimationRecorder {
    /// Last blend value received
    pub blend: f32,
    /// Every cue fired, in order
    pub cues: Vec<AnimationCue>,
    /// Current root-motion state
    pub root_motion_enabled: bool,
    /// Every root-motion toggle, in order
    pub root_motion_toggles: Vec<bool>,
    /// Delta reported while root motion is enabled
    pub root_motion_step: Vec3,
}

impl AnimationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that reports `step` per tick while root motion is on.
    pub fn with_root_motion_step(step: Vec3) -> Self {
        Self {
            root_motion_step: step,
            ..Self::default()
        }
    }

    /// Number of times `cue` fired.
    pub fn cue_count(&self, cue: AnimationCue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }
}

impl AnimationSink for AnimationRecorder {
    fn set_blend(&mut self, value: f32) {
        self.blend = value;
    }

    fn trigger(&mut self, cue: AnimationCue) {
        self.cues.push(cue);
    }

    fn set_root_motion(&mut self, enabled: bool) {
        self.root_motion_enabled = enabled;
        self.root_motion_toggles.push(enabled);
    }

    fn root_motion_delta(&self) -> Vec3 {
        if self.root_motion_enabled {
            self.root_motion_step
        } else {
            Vec3::ZERO
        }
    }
}
