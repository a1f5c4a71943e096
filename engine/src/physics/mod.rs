//! Physics module
//!
//! The controller never owns a physics engine. Everything it needs from the
//! collision world goes through the [`PhysicsWorld`] trait, which the host
//! implements on top of whatever broad-phase it runs.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! # Submodules
//!
//! - [`capsule`] - Character collision volume and the roll resize math
//! - [`collision`] - Ray/sphere primitives and [`StaticWorld`], a self-contained
//!   `PhysicsWorld` used by the simulation binary and tests

pub mod capsule;
pub mod collision;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use capsule::CapsuleGeometry;
pub use collision::{Obstacle, StaticWorld, ray_aabb_intersect};

/// Bitmask selecting which collision layers a query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches nothing.
    pub const NONE: LayerMask = LayerMask(0);
    /// Terrain and general static geometry.
    pub const DEFAULT: LayerMask = LayerMask(1);
    /// Walls, props and anything else the camera must not clip through.
    pub const OBSTRUCTION: LayerMask = LayerMask(1 << 1);
    /// Matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// True if the two masks share at least one layer.
    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Union of two masks.
    #[inline]
    pub fn with(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::DEFAULT.with(LayerMask::OBSTRUCTION)
    }
}

/// Result of a swept-sphere query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereHit {
    /// Distance travelled along the sweep direction before contact
    pub distance: f32,
    /// Sphere center at the moment of contact
    pub point: Vec3,
}

/// Collision queries the controller consumes each tick.
///
/// `position` is always the character transform origin; the capsule offsets
/// are relative to it.
pub trait PhysicsWorld {
    /// Whether a capsule placed at `position` is standing on something.
    fn is_grounded(&self, position: Vec3, capsule: &CapsuleGeometry) -> bool;

    /// Sweep a sphere of `radius` from `origin` along the normalized
    /// `direction`, returning the first contact within `max_distance`.
    ///
    /// Colliders that already overlap the sphere at `origin` are ignored.
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SphereHit>;

    /// Move a capsule by `displacement`, resolving collisions, and return the
    /// new transform origin.
    fn move_capsule(&self, position: Vec3, capsule: &CapsuleGeometry, displacement: Vec3) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_intersects() {
        assert!(LayerMask::ALL.intersects(LayerMask::OBSTRUCTION));
        assert!(!LayerMask::DEFAULT.intersects(LayerMask::OBSTRUCTION));
        assert!(!LayerMask::NONE.intersects(LayerMask::ALL));
    }

    #[test]
    fn test_default_mask_covers_terrain_and_obstructions() {
        let mask = LayerMask::default();
        assert!(mask.intersects(LayerMask::DEFAULT));
        assert!(mask.intersects(LayerMask::OBSTRUCTION));
    }

    #[test]
    fn test_layer_mask_serializes_as_integer() {
        let json = serde_json::to_string(&LayerMask(6)).unwrap();
        assert_eq!(json, "6");
        let mask: LayerMask = serde_json::from_str("3").unwrap();
        assert_eq!(mask, LayerMask(3));
    }
}
