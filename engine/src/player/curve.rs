//! Roll speed curve
//!
//! A small keyframed easing curve mapping normalized roll time (0..1) to a
//! speed multiplier. The default front-loads the roll: full speed on the
//! first frame, half speed at the midpoint, stopped at the end.

use serde::{Deserialize, Serialize};

/// How values are blended between neighbouring keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveInterpolation {
    /// Straight lines between keys
    Linear,
    /// Smoothstep ease in and out of every key
    #[default]
    Smooth,
}

/// One keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Keyframed speed multiplier for kinematic rolls.
///
/// Keys must be sorted by time; [`RollCurve::sanitized`] sorts them and drops
/// non-finite entries. Evaluation clamps to the first and last key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollCurve {
    pub keys: Vec<CurveKey>,
    pub interpolation: CurveInterpolation,
}

impl Default for RollCurve {
    fn default() -> Self {
        Self {
            keys: vec![
                CurveKey::new(0.0, 1.0),
                CurveKey::new(0.5, 0.5),
                CurveKey::new(1.0, 0.0),
            ],
            interpolation: CurveInterpolation::Smooth,
        }
    }
}

impl RollCurve {
    /// A curve that always evaluates to `value`.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, value)],
            interpolation: CurveInterpolation::Linear,
        }
    }

    /// Sample the curve at `t`.
    ///
    /// An empty curve evaluates to 1.0 so a misconfigured roll still moves.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 1.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        // Single key, NaN sample time, or NaN key times that defeat both checks
        if self.keys.len() < 2 || t.is_nan() {
            return first.value;
        }

        // Unsorted or non-finite keys can put the split anywhere; keep a valid pair
        let upper = self
            .keys
            .partition_point(|k| k.time <= t)
            .clamp(1, self.keys.len() - 1);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];

        let span = b.time - a.time;
        if !(span > f32::EPSILON) {
            return b.value;
        }
        let s = (t - a.time) / span;
        let s = match self.interpolation {
            CurveInterpolation::Linear => s,
            CurveInterpolation::Smooth => s * s * (3.0 - 2.0 * s),
        };
        a.value + (b.value - a.value) * s
    }

    /// Copy with keys sorted by time and non-finite keys removed.
    pub fn sanitized(&self) -> Self {
        let mut keys: Vec<CurveKey> = self
            .keys
            .iter()
            .copied()
            .filter(|k| k.time.is_finite() && k.value.is_finite())
            .collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            keys,
            interpolation: self.interpolation,
        }
    }

    /// Whether keys are finite and in time order.
    pub fn is_sorted(&self) -> bool {
        self.keys.iter().all(|k| k.time.is_finite() && k.value.is_finite())
            && self.keys.windows(2).all(|w| w[0].time <= w[1].time)
    }
}
