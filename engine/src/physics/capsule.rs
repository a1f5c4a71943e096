//! Character capsule geometry
//!
//! A capsule is described the way most character controllers store it:
//! total height, radius, and the vertical offset of its center from the
//! transform origin. The bottom of the capsule ("feet") sits at
//! `center_y - height / 2` relative to the origin.
//!
//! Resizing for a dodge roll must keep that feet offset fixed, otherwise the
//! character pops into the floor or hovers for a frame when the capsule
//! shrinks and grows back.

use serde::{Deserialize, Serialize};

/// Smallest height or radius a capsule may take.
pub const MIN_CAPSULE_EXTENT: f32 = 0.01;

/// Character collision volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleGeometry {
    /// Total height including both hemispherical caps (meters)
    pub height: f32,
    /// Cap and cylinder radius (meters)
    pub radius: f32,
    /// Vertical offset of the capsule center above the transform origin
    pub center_y: f32,
}

impl Default for CapsuleGeometry {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            center_y: 1.0,
        }
    }
}

impl CapsuleGeometry {
    /// Create a capsule whose feet sit exactly on the transform origin.
    pub fn standing(height: f32, radius: f32) -> Self {
        Self {
            height,
            radius,
            center_y: height * 0.5,
        }
        .sanitized()
    }

    /// Offset of the capsule bottom from the transform origin.
    #[inline]
    pub fn feet_offset(&self) -> f32 {
        self.center_y - self.height * 0.5
    }

    /// Offset of the capsule top from the transform origin.
    #[inline]
    pub fn top_offset(&self) -> f32 {
        self.center_y + self.height * 0.5
    }

    /// Whether the radius fits inside the height (a capsule, not a sphere blob).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.height >= MIN_CAPSULE_EXTENT
            && self.radius >= MIN_CAPSULE_EXTENT
            && self.radius <= self.height * 0.5
    }

    /// Return a geometrically valid copy, keeping the feet offset unchanged.
    ///
    /// Sizes are floored at [`MIN_CAPSULE_EXTENT`] and the radius is capped at
    /// half the height.
    pub fn sanitized(&self) -> Self {
        if self.is_valid() {
            return *self;
        }
        let feet = self.feet_offset();
        let height = self.height.max(MIN_CAPSULE_EXTENT);
        let radius = self.radius.max(MIN_CAPSULE_EXTENT).min(height * 0.5);
        Self {
            height,
            radius,
            center_y: feet + height * 0.5,
        }
    }

    /// Compute the temporary capsule used while rolling.
    ///
    /// The height is scaled by `height_ratio`, the radius by
    /// `radius_multiplier` and then capped to half the new height. The center
    /// is recomputed so the feet stay exactly where the rest capsule had them.
    pub fn roll_shrunk(&self, height_ratio: f32, radius_multiplier: f32) -> Self {
        let height = (self.height * height_ratio).max(MIN_CAPSULE_EXTENT);
        let radius = (self.radius * radius_multiplier)
            .max(MIN_CAPSULE_EXTENT)
            .min(height * 0.5);

        Self {
            height,
            radius,
            center_y: self.feet_offset() + height * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_default_capsule_feet_on_origin() {
        let capsule = CapsuleGeometry::default();
        assert!(approx_eq(capsule.feet_offset(), 0.0));
        assert!(approx_eq(capsule.top_offset(), 2.0));
        assert!(capsule.is_valid());
    }

    #[test]
    fn test_roll_shrunk_preserves_feet() {
        let rest = CapsuleGeometry::default();
        let rolled = rest.roll_shrunk(0.5, 1.0);

        assert!(approx_eq(rolled.height, 1.0));
        assert!(approx_eq(rolled.radius, 0.5));
        assert!(approx_eq(rolled.center_y, 0.5));
        assert!(approx_eq(rolled.feet_offset(), rest.feet_offset()));
    }

    #[test]
    fn test_roll_shrunk_caps_radius() {
        let rest = CapsuleGeometry::default();
        // 0.5 * 3.0 = 1.5 radius would not fit in a 0.8m tall capsule
        let rolled = rest.roll_shrunk(0.4, 3.0);

        assert!(approx_eq(rolled.height, 0.8));
        assert!(approx_eq(rolled.radius, 0.4));
        assert!(rolled.is_valid());
    }

    #[test]
    fn test_roll_shrunk_with_raised_origin() {
        // Feet 0.1m below the origin (e.g. a pivot at the ankles)
        let rest = CapsuleGeometry {
            height: 1.8,
            radius: 0.3,
            center_y: 0.8,
        };
        let rolled = rest.roll_shrunk(0.6, 1.2);

        assert!(approx_eq(rolled.feet_offset(), -0.1));
        assert!(rolled.radius <= rolled.height * 0.5);
    }

    #[test]
    fn test_sanitized_caps_fat_capsule() {
        let fat = CapsuleGeometry {
            height: 1.0,
            radius: 2.0,
            center_y: 0.5,
        };
        let fixed = fat.sanitized();
        assert!(fixed.is_valid());
        assert!(approx_eq(fixed.radius, 0.5));
        assert!(approx_eq(fixed.feet_offset(), 0.0));
    }

    #[test]
    fn test_standing_constructor() {
        let capsule = CapsuleGeometry::standing(1.6, 0.35);
        assert!(approx_eq(capsule.center_y, 0.8));
        assert!(approx_eq(capsule.feet_offset(), 0.0));
    }
}
