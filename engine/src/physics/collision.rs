//! Collision detection module
//!
//! Ray and swept-sphere primitives plus [`StaticWorld`], a small
//! self-contained [`PhysicsWorld`]: a flat ground plane and a list of
//! axis-aligned box obstacles. Hosts with a real physics engine implement the
//! trait themselves; this world backs the headless simulation and the tests.
//!
//! # Swept spheres
//!
//! A sphere of radius `r` swept along a ray hits a box exactly when the ray
//! hits the box grown by `r` on every side (the Minkowski sum, with the rounded
//! corners approximated by square ones). The slab test against the grown box
//! is therefore a conservative sphere cast.
//!
//! # Example
//!
//! ```ignore
//! use third_person_engine::physics::{LayerMask, Obstacle, PhysicsWorld, StaticWorld};
//! use glam::Vec3;
//!
//! let mut world = StaticWorld::new(0.0);
//! world.add_obstacle(Obstacle::new(
//!     Vec3::new(-5.0, 0.0, 3.0),
//!     Vec3::new(5.0, 4.0, 4.0),
//!     LayerMask::OBSTRUCTION,
//! ));
//!
//! let hit = world.sphere_cast(Vec3::new(0.0, 1.5, 0.0), 0.2, Vec3::Z, 5.0, LayerMask::ALL);
//! assert!(hit.is_some());
//! ```

use glam::Vec3;

use super::{CapsuleGeometry, LayerMask, PhysicsWorld, SphereHit};

/// Gap left between a moving capsule and the obstacle that stopped it.
pub const CONTACT_SKIN: f32 = 0.01;

/// Feet within this distance of the support surface count as grounded.
pub const GROUND_SKIN: f32 = 0.05;

/// Ledges up to this height are stepped onto rather than blocking movement.
pub const STEP_HEIGHT: f32 = 0.3;

/// Performs ray-AABB intersection using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero components get a huge inverse so their slab spans everything
    let inv = |d: f32| {
        if d.abs() > 1e-10 {
            1.0 / d
        } else {
            f32::MAX
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// True if `point` lies inside or on the boundary of the box.
#[inline]
pub fn aabb_contains(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> bool {
    point.cmpge(aabb_min).all() && point.cmple(aabb_max).all()
}

/// An axis-aligned box collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Minimum corner in world space
    pub min: Vec3,
    /// Maximum corner in world space
    pub max: Vec3,
    /// Layers this obstacle belongs to
    pub layers: LayerMask,
}

impl Obstacle {
    /// Create an obstacle from two corners (in any order).
    pub fn new(a: Vec3, b: Vec3, layers: LayerMask) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            layers,
        }
    }

    /// Returns the box grown by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> (Vec3, Vec3) {
        (self.min - Vec3::splat(margin), self.max + Vec3::splat(margin))
    }

    /// Whether the XZ footprint contains the point's XZ coordinates.
    fn footprint_contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// Flat ground plane plus box obstacles.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    /// Y coordinate of the ground plane
    pub ground_height: f32,
    /// Box colliders
    obstacles: Vec<Obstacle>,
}

impl StaticWorld {
    /// Create an empty world with a ground plane at `ground_height`.
    pub fn new(ground_height: f32) -> Self {
        Self {
            ground_height,
            obstacles: Vec::new(),
        }
    }

    /// Add a box collider.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Builder-style variant of [`add_obstacle`](Self::add_obstacle).
    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.add_obstacle(obstacle);
        self
    }

    /// All box colliders.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Highest surface under `position` that a character whose feet are at
    /// `feet_y` can stand on: the ground, or a box top no more than one step
    /// above the feet.
    pub fn support_height(&self, position: Vec3, feet_y: f32) -> f32 {
        self.obstacles
            .iter()
            .filter(|o| o.footprint_contains(position) && o.max.y <= feet_y + STEP_HEIGHT)
            .map(|o| o.max.y)
            .fold(self.ground_height, f32::max)
    }

    /// Sweep against box obstacles only.
    fn cast_obstacles<F>(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mut accept: F,
    ) -> Option<f32>
    where
        F: FnMut(&Obstacle) -> bool,
    {
        let mut closest: Option<f32> = None;

        for obstacle in &self.obstacles {
            if !accept(obstacle) {
                continue;
            }
            let (grown_min, grown_max) = obstacle.expanded(radius);

            // Already overlapping at the start: ignored, like engine sphere casts
            if aabb_contains(origin, grown_min, grown_max) {
                continue;
            }

            if let Some(t) = ray_aabb_intersect(origin, direction, grown_min, grown_max) {
                if t <= max_distance && closest.is_none_or(|c| t < c) {
                    closest = Some(t);
                }
            }
        }

        closest
    }
}

impl PhysicsWorld for StaticWorld {
    fn is_grounded(&self, position: Vec3, capsule: &CapsuleGeometry) -> bool {
        let feet_y = position.y + capsule.feet_offset();
        feet_y <= self.support_height(position, feet_y) + GROUND_SKIN
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SphereHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        let mut closest =
            self.cast_obstacles(origin, radius, direction, max_distance, |o| {
                o.layers.intersects(layers)
            });

        // Ground plane lives on the default layer
        if layers.intersects(LayerMask::DEFAULT) && direction.y < 0.0 {
            let contact_y = self.ground_height + radius;
            if origin.y >= contact_y {
                let t = (contact_y - origin.y) / direction.y;
                if t <= max_distance && closest.is_none_or(|c| t < c) {
                    closest = Some(t);
                }
            }
        }

        closest.map(|distance| SphereHit {
            distance,
            point: origin + direction * distance,
        })
    }

    fn move_capsule(&self, position: Vec3, capsule: &CapsuleGeometry, displacement: Vec3) -> Vec3 {
        let mut resolved = position;
        let feet_before = position.y + capsule.feet_offset();

        // Horizontal: sweep the capsule's widest section, ignoring ledges low
        // enough to step over and anything entirely above the head
        let horizontal = Vec3::new(displacement.x, 0.0, displacement.z);
        let length = horizontal.length();
        if length > 1e-6 {
            let direction = horizontal / length;
            let center = position + Vec3::Y * capsule.center_y;
            let top = position.y + capsule.top_offset();

            let blocked = self.cast_obstacles(center, capsule.radius, direction, length, |o| {
                o.max.y > feet_before + STEP_HEIGHT && o.min.y < top
            });

            let travel = match blocked {
                Some(t) => (t - CONTACT_SKIN).clamp(0.0, length),
                None => length,
            };
            resolved += direction * travel;
        }

        // Vertical: fall freely, never sink below the support surface
        resolved.y += displacement.y;
        let feet_after = resolved.y + capsule.feet_offset();
        let support = self.support_height(resolved, feet_before.max(feet_after));
        if feet_after < support {
            resolved.y += support - feet_after;
        }

        resolved
    }
}
