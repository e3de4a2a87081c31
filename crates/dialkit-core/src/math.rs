//! Numeric helpers shared by ranges and geometry mapping.

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics when `min > max`; the lower bound wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Clamp into the unit interval `[0, 1]`.
pub fn clamp_unit(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Round `value` to the nearest multiple of `interval`.
///
/// Halves round toward positive infinity, so `-0.5` steps to `0` rather than `-1`.
pub fn quantize_round(value: f64, interval: f64) -> f64 {
    (value / interval + 0.5).floor() * interval
}

/// Linear interpolation between `y1` and `y2` at `mu` in `[0, 1]`.
pub fn lerp(y1: f64, y2: f64, mu: f64) -> f64 {
    y1 + (y2 - y1) * mu
}

/// Return `value` if it is finite, otherwise `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        for v in [-1000.0, -0.5, 0.0, 12.5, 100.0, 1e9] {
            let c = clamp(v, 0.0, 100.0);
            assert!((0.0..=100.0).contains(&c));
        }
    }

    #[test]
    fn test_clamp_identity_in_range() {
        for v in [0.0, 0.25, 42.0, 99.999, 100.0] {
            assert!((clamp(v, 0.0, 100.0) - v).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_clamp_inverted_bounds_prefers_min() {
        assert!((clamp(5.0, 10.0, 0.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_unit() {
        assert!((clamp_unit(-0.2)).abs() < f64::EPSILON);
        assert!((clamp_unit(1.7) - 1.0).abs() < f64::EPSILON);
        assert!((clamp_unit(0.3) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quantize_round_is_multiple_of_step() {
        for (v, step) in [(13.7, 5.0), (-7.2, 0.5), (0.33, 0.1), (99.9, 3.0)] {
            let q = quantize_round(v, step);
            let k = q / step;
            assert!((k - k.round()).abs() < 1e-9, "{q} is not a multiple of {step}");
        }
    }

    #[test]
    fn test_quantize_round_half_up() {
        assert!((quantize_round(2.5, 1.0) - 3.0).abs() < f64::EPSILON);
        assert!((quantize_round(-0.5, 1.0)).abs() < f64::EPSILON);
        assert!((quantize_round(-2.5, 1.0) + 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(-60.0, 6.0, 0.5) + 27.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_finite_or() {
        assert!((finite_or(f64::NAN, 3.0) - 3.0).abs() < f64::EPSILON);
        assert!((finite_or(f64::INFINITY, 3.0) - 3.0).abs() < f64::EPSILON);
        assert!((finite_or(1.5, 3.0) - 1.5).abs() < f64::EPSILON);
    }
}
