//! Headless Roll Simulation
//!
//! Run with: `RUST_LOG=info cargo run --bin roll_sim [config.json]`
//!
//! Drives a player rig through a scripted input timeline in a small static
//! world and logs the character and camera state. No window, no rendering.
//!
//! Timeline (60 Hz):
//! - 0.0s: gamepad walk (light stick push with the walk button)
//! - 1.0s: gamepad unplugged, keyboard run
//! - 2.5s: sprint
//! - 3.5s: roll, then a second roll chained near the end of the first
//! - 5.5s: turn the camera around and run back toward the wall
//! - 8.5s: turn the camera into the wall behind the character

use std::path::Path;

use glam::{Vec2, Vec3};
use third_person_engine::input::{DeviceInput, GamepadState, KeyCode};
use third_person_engine::physics::{CapsuleGeometry, LayerMask, Obstacle, StaticWorld};
use third_person_engine::{
    AnimationCue, AnimationRecorder, CameraAnchor, ConfigError, ControllerConfig, PlayerRig,
};

// ============================================================================
// TIMELINE
// ============================================================================

const TICK_RATE: u32 = 60;
const DT: f32 = 1.0 / TICK_RATE as f32;
const TOTAL_TICKS: u32 = 10 * TICK_RATE;
const LOG_EVERY: u32 = TICK_RATE / 4;

/// Pointer pixels per tick while turning; 30 ticks turn roughly 180°
/// with default tuning.
const TURN_PIXELS_PER_TICK: f32 = 60.0;

/// Apply the scripted input for `tick`.
fn script(input: &mut DeviceInput, tick: u32) {
    match tick {
        0 => {
            input.gamepad = GamepadState::connected();
            input.gamepad.left_stick = Vec2::new(0.0, 0.4);
            input.gamepad.walk = true;
        }
        60 => {
            input.gamepad.disconnect();
            input.keyboard.handle_key(KeyCode::W, true);
        }
        150 => {
            input.keyboard.handle_key(KeyCode::ShiftLeft, true);
        }
        210 | 252 => {
            input.keyboard.handle_key(KeyCode::Space, true);
        }
        211 | 253 => {
            input.keyboard.handle_key(KeyCode::Space, false);
        }
        270 => {
            input.keyboard.handle_key(KeyCode::ShiftLeft, false);
            input.keyboard.handle_key(KeyCode::W, false);
        }
        360 => {
            input.keyboard.handle_key(KeyCode::W, true);
        }
        480 => {
            input.keyboard.handle_key(KeyCode::W, false);
        }
        _ => {}
    }

    if (330..360).contains(&tick) || (510..540).contains(&tick) {
        input.pointer.accumulate_delta(TURN_PIXELS_PER_TICK, 0.0);
    }
}

/// Flat ground with a wall a few meters behind the spawn point.
fn build_world() -> StaticWorld {
    StaticWorld::new(0.0)
        .with_obstacle(Obstacle::new(
            Vec3::new(-20.0, 0.0, 3.0),
            Vec3::new(20.0, 6.0, 4.0),
            LayerMask::OBSTRUCTION,
        ))
        // Low kerb the character steps over on the way out
        .with_obstacle(Obstacle::new(
            Vec3::new(-3.0, 0.0, -6.0),
            Vec3::new(3.0, 0.2, -5.0),
            LayerMask::DEFAULT,
        ))
}

fn load_config() -> Result<ControllerConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ControllerConfig::load(Path::new(&path))?.sanitized()),
        None => {
            log::info!("no config path given, using defaults");
            Ok(ControllerConfig::default())
        }
    }
}

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_default_env()
        .filter_module("roll_sim", log::LevelFilter::Info)
        .filter_module("third_person_engine", log::LevelFilter::Info)
        .init();

    let config = load_config()?;
    let world = build_world();
    let mut rig = PlayerRig::spawn(&config, Vec3::ZERO, 0.0, CapsuleGeometry::default(), &world);
    let mut input = DeviceInput::new(config.input);
    let mut animation = AnimationRecorder::new();

    log::info!(
        "spawned: camera distance {:.2} (wall behind)",
        rig.camera.rig().current_distance()
    );

    for tick in 0..TOTAL_TICKS {
        script(&mut input, tick);
        let was_rolling = rig.character.is_rolling();
        rig.tick(DT, &mut input, &world, Some(&mut animation));

        let character = &rig.character;
        if character.is_rolling() != was_rolling {
            log::info!(
                "t={:.2}s {} at {:.2?}",
                rig.locomotion.clock(),
                if character.is_rolling() { "roll start" } else { "roll end" },
                character.position
            );
        }

        if tick % LOG_EVERY == 0 {
            log::info!(
                "t={:.2}s pos={:.2?} speed={:.2} yaw={:.1} blend={:.2} rolling={} cam_dist={:.2} cam_yaw={:.1}",
                rig.locomotion.clock(),
                character.position,
                character.horizontal_speed(),
                character.facing_yaw(),
                animation.blend,
                character.is_rolling(),
                rig.camera.rig().current_distance(),
                rig.camera.rig().yaw(),
            );
        }
    }

    log::info!(
        "done: {} roll cue(s), final position {:.2?}",
        animation.cue_count(AnimationCue::Roll),
        rig.character.position
    );
    Ok(())
}
