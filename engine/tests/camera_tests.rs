//! Camera Tests - Orbit, Collision Distance and Smoothing
//!
//! Tests for the orbit camera through its public API, against the reference
//! static world.

use glam::{Vec2, Vec3};
use third_person_engine::camera::{CameraAnchor, CameraConfig, OrbitCamera};
use third_person_engine::physics::{LayerMask, Obstacle, StaticWorld};

const EPSILON: f32 = 0.001;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

struct Anchor(Vec3);

impl CameraAnchor for Anchor {
    fn anchor_position(&self) -> Vec3 {
        self.0
    }

    fn facing_yaw(&self) -> f32 {
        0.0
    }
}

/// Ground far below so only walls matter.
fn open_world() -> StaticWorld {
    StaticWorld::new(-100.0)
}

/// Wall whose near face is at `z`, directly behind a camera with yaw 0.
fn wall_at(z: f32) -> StaticWorld {
    open_world().with_obstacle(Obstacle::new(
        Vec3::new(-20.0, -20.0, z),
        Vec3::new(20.0, 20.0, z + 1.0),
        LayerMask::OBSTRUCTION,
    ))
}

fn level_camera() -> OrbitCamera {
    let mut camera = OrbitCamera::new(CameraConfig::default());
    camera.initialize(0.0, 0.0);
    camera
}

/// Tiny deterministic generator for input sequences.
struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
    }
}

// ============================================================================
// Orbit angles
// ============================================================================

#[test]
fn test_pitch_stays_in_bounds() {
    let config = CameraConfig::default();
    let mut camera = OrbitCamera::new(config);
    let anchor = Anchor(Vec3::new(0.0, 1.5, 0.0));
    let world = open_world();
    let mut rng = Lcg(7);

    for _ in 0..500 {
        let look = Vec2::new(rng.next() * 50.0, rng.next() * 50.0);
        camera.update(1.0 / 60.0, look, Some(&anchor), &world);

        let pitch = camera.rig().pitch();
        assert!(pitch >= config.vertical_min && pitch <= config.vertical_max);
    }
}

#[test]
fn test_look_input_accumulates() {
    let mut camera = level_camera();
    let anchor = Anchor(Vec3::ZERO);
    let world = open_world();

    camera.update(0.016, Vec2::new(3.0, 0.0), Some(&anchor), &world);
    camera.update(0.016, Vec2::new(2.0, 0.0), Some(&anchor), &world);
    assert!(approx_eq(camera.rig().yaw(), 10.0));

    // Inverted Y: pushing up lowers the pitch
    camera.update(0.016, Vec2::new(0.0, 1.0), Some(&anchor), &world);
    assert!(approx_eq(camera.rig().pitch(), -2.0));
}

#[test]
fn test_zero_look_keeps_angles() {
    let mut camera = OrbitCamera::new(CameraConfig::default());
    camera.initialize(33.0, 12.0);
    let anchor = Anchor(Vec3::ZERO);
    let world = open_world();

    for _ in 0..10 {
        camera.update(0.016, Vec2::ZERO, Some(&anchor), &world);
    }
    assert_eq!(camera.rig().yaw(), 33.0);
    assert_eq!(camera.rig().pitch(), 12.0);
}

#[test]
fn test_initialize_clamps_start_pitch() {
    let mut camera = OrbitCamera::new(CameraConfig::default());
    camera.initialize(0.0, 120.0);
    assert_eq!(camera.rig().pitch(), 70.0);
}

// ============================================================================
// Collision distance
// ============================================================================

#[test]
fn test_hit_distance_applied_same_tick() {
    let config = CameraConfig::default();
    let anchor = Anchor(Vec3::new(0.0, 1.5, 0.0));

    for wall_z in [0.8_f32, 1.5, 2.0, 3.3, 4.5, 5.2] {
        let mut camera = level_camera();
        camera.update(1.0 / 60.0, Vec2::ZERO, Some(&anchor), &wall_at(wall_z));

        let hit = wall_z - config.camera_radius;
        let expected = hit.clamp(config.min_distance, config.max_distance);
        assert!(
            approx_eq(camera.rig().current_distance(), expected),
            "wall at {wall_z}: expected {expected}, got {}",
            camera.rig().current_distance()
        );
    }
}

#[test]
fn test_wall_appearing_snaps_without_lag() {
    let mut camera = level_camera();
    let anchor = Anchor(Vec3::new(0.0, 1.5, 0.0));

    for _ in 0..30 {
        camera.update(1.0 / 60.0, Vec2::ZERO, Some(&anchor), &open_world());
    }
    assert!(approx_eq(camera.rig().current_distance(), 5.0));

    camera.update(1.0 / 60.0, Vec2::ZERO, Some(&anchor), &wall_at(2.0));
    assert!(approx_eq(camera.rig().current_distance(), 1.7));
}

#[test]
fn test_distance_recovers_monotonically() {
    let mut camera = level_camera();
    let anchor = Anchor(Vec3::new(0.0, 1.5, 0.0));
    let max = camera.config().max_distance;

    camera.update(1.0 / 60.0, Vec2::ZERO, Some(&anchor), &wall_at(2.0));
    let mut previous = camera.rig().current_distance();

    let world = open_world();
    for i in 0..200 {
        camera.update(1.0 / 60.0, Vec2::ZERO, Some(&anchor), &world);
        let distance = camera.rig().current_distance();

        assert!(distance <= max);
        if i < 20 {
            assert!(distance > previous, "tick {i}: {distance} <= {previous}");
            assert!(distance < max, "tick {i}: recovered instantly");
        } else {
            assert!(distance >= previous);
        }
        previous = distance;
    }
    assert!(previous > max - 0.01);
}

#[test]
fn test_ignores_layers_outside_mask() {
    let mut config = CameraConfig::default();
    config.collision_layers = LayerMask::DEFAULT;
    let mut camera = OrbitCamera::new(config);
    camera.initialize(0.0, 0.0);

    camera.update(
        1.0 / 60.0,
        Vec2::ZERO,
        Some(&Anchor(Vec3::new(0.0, 1.5, 0.0))),
        &wall_at(2.0),
    );
    assert!(approx_eq(camera.rig().current_distance(), 5.0));
}

#[test]
fn test_ground_blocks_low_camera() {
    // Looking up from a low anchor puts the camera below ground level
    let mut camera = OrbitCamera::new(CameraConfig::default());
    camera.initialize(0.0, -30.0);
    let world = StaticWorld::new(0.0);

    camera.update(1.0 / 60.0, Vec2::ZERO, Some(&Anchor(Vec3::new(0.0, 1.5, 0.0))), &world);
    assert!(camera.rig().current_distance() < 5.0);
}

// ============================================================================
// Smoothing and orientation
// ============================================================================

#[test]
fn test_no_target_is_noop() {
    let mut camera = level_camera();
    let before = camera.rig().clone();

    camera.update(1.0 / 60.0, Vec2::new(10.0, 10.0), None, &open_world());
    assert_eq!(camera.rig(), &before);
}

#[test]
fn test_position_smooths_toward_orbit_point() {
    let mut camera = level_camera();
    let world = open_world();
    camera.snap_to(&Anchor(Vec3::ZERO), &world);

    // Anchor jumps 3m sideways; camera follows over several ticks
    let anchor = Anchor(Vec3::new(3.0, 0.0, 0.0));
    camera.update(1.0 / 60.0, Vec2::ZERO, Some(&anchor), &world);
    let first = camera.position().x;
    assert!(first > 0.0 && first < 3.0);

    for _ in 0..120 {
        camera.update(1.0 / 60.0, Vec2::ZERO, Some(&anchor), &world);
    }
    assert!((camera.position() - Vec3::new(3.0, 0.0, 5.0)).length() < 0.01);
    assert!(camera.position().x <= 3.0 + EPSILON);
}

#[test]
fn test_always_looks_at_anchor() {
    let mut camera = OrbitCamera::new(CameraConfig::default());
    let world = wall_at(2.5);
    let mut rng = Lcg(99);

    for i in 0..120 {
        let anchor = Anchor(Vec3::new((i as f32 * 0.1).sin(), 1.5, 0.0));
        let look = Vec2::new(rng.next() * 2.0, rng.next() * 2.0);
        camera.update(1.0 / 60.0, look, Some(&anchor), &world);

        let to_anchor = anchor.0 - camera.position();
        if to_anchor.length() > 0.1 {
            assert!(camera.forward().dot(to_anchor.normalize()) > 0.999);
        }
    }
}
