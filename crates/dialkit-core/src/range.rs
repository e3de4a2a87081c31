//! Value ranges and the clamp-then-quantize pipeline.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::math::{clamp, finite_or, quantize_round};

/// Errors raised when a range is constructed with invalid bounds.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RangeError {
    #[error("range minimum {min} is greater than maximum {max}")]
    Inverted { min: f64, max: f64 },
    #[error("step must be a positive finite number, got {0}")]
    InvalidStep(f64),
    #[error("range bound must be finite, got {0}")]
    NonFiniteBound(f64),
}

/// A set of values a control can hold.
///
/// Implementations define how raw input is brought back into the set:
/// [`sanitize`](ValueSpace::sanitize) is the store transform applied to every
/// value it reports, [`constrain`](ValueSpace::constrain) is the
/// clamp-then-quantize step applied before every update or commit.
pub trait ValueSpace: Copy + Debug + 'static {
    type Value: Copy + PartialEq + Debug + 'static;

    /// Collapse non-finite components to the minimum and clamp the rest.
    fn sanitize(&self, value: Self::Value) -> Self::Value;

    /// Clamp, then quantize to the step grid.
    ///
    /// The quantized result is not clamped again, so it can land marginally
    /// outside the range when the step does not divide it evenly.
    fn constrain(&self, value: Self::Value) -> Self::Value;
}

/// Bounds and step of a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

impl AxisRange {
    /// Create a validated range.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, RangeError> {
        let range = Self { min, max, step };
        range.validate()?;
        Ok(range)
    }

    /// Check `min <= max`, finite bounds and a positive step.
    pub fn validate(&self) -> Result<(), RangeError> {
        for bound in [self.min, self.max] {
            if !bound.is_finite() {
                return Err(RangeError::NonFiniteBound(bound));
            }
        }
        if self.min > self.max {
            return Err(RangeError::Inverted {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(RangeError::InvalidStep(self.step));
        }
        Ok(())
    }

    /// Distance between the bounds.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Center of the range.
    pub fn midpoint(&self) -> f64 {
        self.min + self.span() / 2.0
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }

    /// Normalized position of `value` within the range, `0` for an empty span.
    pub fn percentage(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            return 0.0;
        }
        (value - self.min) / span
    }
}

impl ValueSpace for AxisRange {
    type Value = f64;

    fn sanitize(&self, value: f64) -> f64 {
        if value.is_finite() {
            self.clamp(value)
        } else {
            self.min
        }
    }

    fn constrain(&self, value: f64) -> f64 {
        let clamped = self.clamp(finite_or(value, self.min));
        quantize_round(clamped, self.step)
    }
}

/// Independent ranges for the two axes of a planar control.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneRange {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl PlaneRange {
    pub fn new(x: AxisRange, y: AxisRange) -> Self {
        Self { x, y }
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        self.x.validate()?;
        self.y.validate()
    }

    /// Per-axis normalized position.
    pub fn percentage(&self, value: Point) -> Point {
        Point::new(self.x.percentage(value.x), self.y.percentage(value.y))
    }
}

impl ValueSpace for PlaneRange {
    type Value = Point;

    fn sanitize(&self, value: Point) -> Point {
        Point::new(self.x.sanitize(value.x), self.y.sanitize(value.y))
    }

    fn constrain(&self, value: Point) -> Point {
        Point::new(self.x.constrain(value.x), self.y.constrain(value.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted() {
        assert_eq!(
            AxisRange::new(10.0, 0.0, 1.0),
            Err(RangeError::Inverted { min: 10.0, max: 0.0 })
        );
    }

    #[test]
    fn test_new_rejects_bad_step() {
        assert!(matches!(
            AxisRange::new(0.0, 1.0, 0.0),
            Err(RangeError::InvalidStep(_))
        ));
        assert!(matches!(
            AxisRange::new(0.0, 1.0, -2.0),
            Err(RangeError::InvalidStep(_))
        ));
        assert!(matches!(
            AxisRange::new(0.0, 1.0, f64::NAN),
            Err(RangeError::InvalidStep(_))
        ));
    }

    #[test]
    fn test_new_rejects_infinite_bound() {
        assert!(matches!(
            AxisRange::new(f64::NEG_INFINITY, 1.0, 1.0),
            Err(RangeError::NonFiniteBound(_))
        ));
    }

    #[test]
    fn test_degenerate_range_is_valid() {
        assert!(AxisRange::new(5.0, 5.0, 1.0).is_ok());
    }

    #[test]
    fn test_sanitize_non_finite_is_min() {
        let range = AxisRange::new(-60.0, 6.0, 1.0).unwrap();
        assert!((range.sanitize(f64::NAN) + 60.0).abs() < f64::EPSILON);
        assert!((range.sanitize(f64::INFINITY) + 60.0).abs() < f64::EPSILON);
        assert!((range.sanitize(100.0) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_constrain_clamps_then_quantizes() {
        let range = AxisRange::new(0.0, 100.0, 5.0).unwrap();
        assert!((range.constrain(42.4) - 40.0).abs() < f64::EPSILON);
        assert!((range.constrain(250.0) - 100.0).abs() < f64::EPSILON);
        assert!((range.constrain(f64::NAN)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_constrain_can_overshoot_uneven_step() {
        // 10 / 4 = 2.5 rounds up to 3 steps, past max.
        let range = AxisRange::new(0.0, 10.0, 4.0).unwrap();
        assert!((range.constrain(10.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage() {
        let range = AxisRange::new(-60.0, 6.0, 1.0).unwrap();
        assert!((range.percentage(-60.0)).abs() < f64::EPSILON);
        assert!((range.percentage(6.0) - 1.0).abs() < f64::EPSILON);
        let empty = AxisRange::new(3.0, 3.0, 1.0).unwrap();
        assert!((empty.percentage(3.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_midpoint() {
        let range = AxisRange::new(-60.0, 6.0, 1.0).unwrap();
        assert!((range.midpoint() + 27.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_plane_constrain_per_axis() {
        let plane = PlaneRange::new(
            AxisRange::new(0.0, 100.0, 10.0).unwrap(),
            AxisRange::new(-1.0, 1.0, 0.5).unwrap(),
        );
        let p = plane.constrain(Point::new(33.0, 0.8));
        assert!((p.x - 30.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
        let p = plane.sanitize(Point::new(f64::NAN, 7.0));
        assert!((p.x).abs() < f64::EPSILON);
        assert!((p.y - 1.0).abs() < f64::EPSILON);
    }
}
