//! Frame-rate independent smoothing helpers.
//!
//! - [`smooth_damp`] - critically damped follow with carried velocity state
//! - [`exp_approach`] - exponential relaxation of a scalar toward a target
//! - [`exp_blend`] - the interpolation factor behind `exp_approach`

use glam::Vec3;

/// Smallest smoothing time accepted; avoids dividing by zero.
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Critically damped spring toward `target`.
///
/// `velocity` is read and written so the motion stays continuous across
/// frames. `smooth_time` is roughly the time needed to cover most of the
/// remaining distance. The result never overshoots the target, so a camera
/// following a stationary point settles without oscillating.
///
/// The exponential is approximated with the usual third-order polynomial,
/// which is accurate well beyond typical frame times.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let output = target + (change + temp) * decay;

    // Crossed the target this step: land on it and stop
    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }

    output
}

/// Interpolation factor for exponential relaxation at `rate` per second.
///
/// Always in `[0, 1)` for finite inputs, so a blend driven by it approaches
/// the target without ever reaching or passing it in one step.
#[inline]
pub fn exp_blend(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate.max(0.0) * dt.max(0.0)).exp()
}

/// Move `current` toward `target` by exponential relaxation.
#[inline]
pub fn exp_approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * exp_blend(rate, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_damp_converges() {
        let target = Vec3::new(10.0, 2.0, -4.0);
        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;

        for _ in 0..300 {
            position = smooth_damp(position, target, &mut velocity, 0.1, 1.0 / 60.0);
        }

        assert!((position - target).length() < 0.001);
    }

    #[test]
    fn test_smooth_damp_never_overshoots() {
        let target = Vec3::new(5.0, 0.0, 0.0);
        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;

        for _ in 0..200 {
            position = smooth_damp(position, target, &mut velocity, 0.05, 0.05);
            assert!(position.x <= target.x + 1e-5, "overshot to {}", position.x);
        }
    }

    #[test]
    fn test_smooth_damp_zero_dt_is_noop() {
        let mut velocity = Vec3::new(1.0, 0.0, 0.0);
        let result = smooth_damp(Vec3::ONE, Vec3::ZERO, &mut velocity, 0.1, 0.0);
        assert_eq!(result, Vec3::ONE);
        assert_eq!(velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_exp_approach_is_monotonic() {
        let mut value = 1.0;
        for _ in 0..30 {
            let next = exp_approach(value, 5.0, 10.0, 0.016);
            assert!(next > value);
            assert!(next < 5.0);
            value = next;
        }
    }

    #[test]
    fn test_exp_blend_bounds() {
        assert_eq!(exp_blend(10.0, 0.0), 0.0);
        let f = exp_blend(10.0, 0.1);
        assert!(f > 0.0 && f < 1.0);
    }
}
