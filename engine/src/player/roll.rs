//! Dodge roll state machine
//!
//! The roll is a resumable routine advanced once per tick. Its suspended
//! state lives in [`RollPhase`] (elapsed time and motion source) and
//! [`RollState`] (input buffer and queued continuation).
//!
//! # Lifecycle
//!
//! ```text
//! Idle --admit--> enter --> iteration start --> step, step, ... --+
//!                              ^                                  |
//!                              +---- queued at completion/75% ----+
//!                                                                 |
//! Idle <--------------------------- exit <---- nothing queued ----+
//! ```
//!
//! - **Enter** shrinks the capsule (feet fixed), lifts the visual model and
//!   picks the motion source for the whole chain.
//! - **Iteration start** clears the queue, fires the roll cue and snaps the
//!   facing to the input direction.
//! - **Step** steers, displaces the character and advances the timer.
//! - **Exit** restores the rest geometry and disables root motion.
//!
//! A queued roll cuts in once `chain_threshold` of the duration has passed;
//! the next iteration starts on the same tick, with no idle frame.

use glam::Vec3;

use super::character::Character;
use super::config::RollConfig;
use crate::animation::{AnimationCue, AnimationSink};
use crate::camera::{exp_blend, rotation_from_yaw, yaw_from_direction};
use crate::physics::PhysicsWorld;

/// Where roll displacement comes from. Chosen once on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollMotion {
    /// `forward * roll_speed * curve(t) * dt`
    Kinematic,
    /// Horizontal animation delta from the sink
    RootMotion,
}

/// Roll phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RollPhase {
    #[default]
    Idle,
    Rolling {
        /// Time into the current iteration (seconds)
        elapsed: f32,
        motion: RollMotion,
    },
}

/// Per-character roll state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollState {
    pub(crate) phase: RollPhase,
    pub(crate) buffered_input_timer: f32,
    pub(crate) queued_continuation: bool,
    pub(crate) chain_count: u32,
}

impl RollState {
    #[inline]
    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        matches!(self.phase, RollPhase::Rolling { .. })
    }

    /// Time into the current roll iteration, if rolling.
    pub fn elapsed(&self) -> Option<f32> {
        match self.phase {
            RollPhase::Rolling { elapsed, .. } => Some(elapsed),
            RollPhase::Idle => None,
        }
    }

    /// Motion source of the running chain, if rolling.
    pub fn motion(&self) -> Option<RollMotion> {
        match self.phase {
            RollPhase::Rolling { motion, .. } => Some(motion),
            RollPhase::Idle => None,
        }
    }

    /// Seconds left on an armed roll press (0 when not armed).
    #[inline]
    pub fn buffered_input_timer(&self) -> f32 {
        self.buffered_input_timer
    }

    /// Whether another roll has been requested during the current one.
    #[inline]
    pub fn queued_continuation(&self) -> bool {
        self.queued_continuation
    }

    /// Iterations started in the current (or last) chain.
    #[inline]
    pub fn chain_count(&self) -> u32 {
        self.chain_count
    }
}

/// Start a roll chain and its first iteration.
pub(crate) fn enter(
    character: &mut Character,
    config: &RollConfig,
    input_direction: Option<Vec3>,
    sink: &mut dyn AnimationSink,
) {
    let motion = if config.use_root_motion {
        RollMotion::RootMotion
    } else {
        RollMotion::Kinematic
    };

    let shrunk = character
        .rest_capsule()
        .roll_shrunk(config.height_ratio, config.radius_multiplier);
    character.apply_roll_geometry(shrunk, config.visual_lift);

    if motion == RollMotion::RootMotion {
        sink.set_root_motion(true);
    }

    character.roll.chain_count = 0;
    log::debug!("roll start ({motion:?}), capsule {shrunk:?}");
    begin_iteration(character, motion, input_direction, sink);
}

/// Resume the roll for one tick.
///
/// Handles completion and chaining first; if the roll continues, runs one
/// body step. Does nothing when idle.
pub(crate) fn advance(
    character: &mut Character,
    config: &RollConfig,
    input_direction: Option<Vec3>,
    dt: f32,
    world: &dyn PhysicsWorld,
    sink: &mut dyn AnimationSink,
) {
    let RollPhase::Rolling { elapsed, motion } = character.roll.phase else {
        return;
    };

    let duration = config.duration;
    let queued = character.roll.queued_continuation;
    let chain_ready = queued && elapsed >= config.chain_threshold * duration;

    if elapsed >= duration || chain_ready {
        if queued {
            log::debug!("roll chained at {elapsed:.3}s");
            begin_iteration(character, motion, input_direction, sink);
        } else {
            exit(character, sink);
            return;
        }
    }

    step(character, config, input_direction, dt, world, sink);
}

fn begin_iteration(
    character: &mut Character,
    motion: RollMotion,
    input_direction: Option<Vec3>,
    sink: &mut dyn AnimationSink,
) {
    character.roll.queued_continuation = false;
    character.roll.chain_count += 1;
    character.roll.phase = RollPhase::Rolling {
        elapsed: 0.0,
        motion,
    };

    sink.trigger(AnimationCue::Roll);

    if let Some(direction) = input_direction {
        character.set_facing_yaw(yaw_from_direction(direction));
    }
}

fn step(
    character: &mut Character,
    config: &RollConfig,
    input_direction: Option<Vec3>,
    dt: f32,
    world: &dyn PhysicsWorld,
    sink: &mut dyn AnimationSink,
) {
    let RollPhase::Rolling { elapsed, motion } = character.roll.phase else {
        return;
    };

    if let Some(direction) = input_direction {
        if config.steering_rate > 0.0 {
            let target = rotation_from_yaw(yaw_from_direction(direction));
            character.rotation = character
                .rotation
                .slerp(target, exp_blend(config.steering_rate, dt));
        }
    }

    let displacement = match motion {
        RollMotion::Kinematic => {
            let t = elapsed / config.duration;
            character.forward() * config.roll_speed * config.curve.evaluate(t) * dt
        }
        // Horizontal part of the clip delta only. The vertical component is
        // replaced by the physics vertical move made in the gravity phase
        // earlier this tick, so gravity and grounding still apply mid-roll.
        RollMotion::RootMotion => sink.root_motion_delta().with_y(0.0),
    };

    let capsule = *character.capsule();
    character.position = world.move_capsule(character.position, &capsule, displacement);
    character.roll.phase = RollPhase::Rolling {
        elapsed: elapsed + dt,
        motion,
    };
}

fn exit(character: &mut Character, sink: &mut dyn AnimationSink) {
    character.restore_rest_geometry();
    character.roll.phase = RollPhase::Idle;
    character.roll.queued_continuation = false;
    sink.set_root_motion(false);
    log::debug!("roll end after {} iteration(s)", character.roll.chain_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationRecorder;
    use crate::physics::{CapsuleGeometry, StaticWorld};

    const EPSILON: f32 = 1e-5;

    fn config() -> RollConfig {
        RollConfig {
            duration: 1.0,
            ..RollConfig::default()
        }
    }

    #[test]
    fn test_enter_shrinks_capsule_and_cues() {
        let mut character = Character::default();
        let mut sink = AnimationRecorder::new();

        enter(&mut character, &config(), None, &mut sink);

        assert!(character.is_rolling());
        assert_eq!(character.roll().elapsed(), Some(0.0));
        assert_eq!(character.roll().chain_count(), 1);
        assert!((character.capsule().height - 1.0).abs() < EPSILON);
        assert_eq!(sink.cue_count(AnimationCue::Roll), 1);
        // Kinematic rolls leave root motion alone on entry
        assert!(sink.root_motion_toggles.is_empty());
    }

    #[test]
    fn test_enter_snaps_facing_to_input() {
        let mut character = Character::default();
        let mut sink = AnimationRecorder::new();

        enter(&mut character, &config(), Some(Vec3::X), &mut sink);
        assert!((character.forward() - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_kinematic_step_moves_forward() {
        let world = StaticWorld::new(0.0);
        let mut character = Character::default();
        let mut sink = AnimationRecorder::new();
        let config = config();

        enter(&mut character, &config, None, &mut sink);
        advance(&mut character, &config, None, 0.25, &world, &mut sink);

        // curve(0) = 1, so the first step covers roll_speed * dt
        assert!((character.position.z + config.roll_speed * 0.25).abs() < 1e-3);
        assert_eq!(character.roll().elapsed(), Some(0.25));
    }

    #[test]
    fn test_exit_restores_geometry() {
        let world = StaticWorld::new(0.0);
        let rest = CapsuleGeometry::standing(1.8, 0.4);
        let mut character = Character::new(Vec3::ZERO, rest);
        let mut sink = AnimationRecorder::new();
        let config = config();

        enter(&mut character, &config, None, &mut sink);
        for _ in 0..5 {
            advance(&mut character, &config, None, 0.25, &world, &mut sink);
        }

        assert!(!character.is_rolling());
        assert_eq!(character.capsule(), &rest);
        assert_eq!(sink.root_motion_toggles, vec![false]);
    }

    #[test]
    fn test_advance_when_idle_is_noop() {
        let world = StaticWorld::new(0.0);
        let mut character = Character::default();
        let mut sink = AnimationRecorder::new();

        advance(&mut character, &config(), None, 0.25, &world, &mut sink);
        assert_eq!(character.position, Vec3::ZERO);
        assert!(sink.cues.is_empty());
    }
}
