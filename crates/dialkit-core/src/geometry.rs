//! Conversion from pointer positions and drag deltas to control values.
//!
//! Drag deltas follow the drag driver's convention: `x` grows to the right,
//! `y` grows *upward* (start minus current in screen space).

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::math::{clamp_unit, lerp};
use crate::range::{AxisRange, PlaneRange};

/// Vertical pointer travel, in physical units, that sweeps a rotary control
/// across its whole range.
pub const ROTARY_DRAG_EXTENT: f64 = 150.0;

/// Layout direction of a linear control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Maps interactive-surface geometry onto a control's value domain.
///
/// `surface` is the measured bounds of the element that defines the mapping;
/// `None` (or a zero-sized extent on a used axis) means unmeasured, in which
/// case the fallback value is returned unchanged.
pub trait GeometryMapper {
    type Value: Copy;

    /// Whether pressing on the surface jumps to the value under the pointer.
    fn jumps_on_press(&self) -> bool {
        true
    }

    /// Absolute mapping of `point`. Returns `current` when unmeasured.
    fn value_from_point(&self, surface: Option<Rect>, point: Point, current: Self::Value) -> Self::Value;

    /// Relative mapping of a drag `delta` from `initial`. Returns `initial` when unmeasured.
    fn value_from_delta(&self, surface: Option<Rect>, delta: Vec2, initial: Self::Value) -> Self::Value;
}

fn measured(surface: Option<Rect>) -> Option<Rect> {
    surface.filter(|rect| rect.width() > 0.0 && rect.height() > 0.0)
}

/// Mapping for a linear fader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMapper {
    pub range: AxisRange,
    pub orientation: Orientation,
}

impl LinearMapper {
    pub fn new(range: AxisRange, orientation: Orientation) -> Self {
        Self { range, orientation }
    }

    fn extent(&self, rect: Rect) -> f64 {
        match self.orientation {
            Orientation::Vertical => rect.height(),
            Orientation::Horizontal => rect.width(),
        }
    }
}

impl GeometryMapper for LinearMapper {
    type Value = f64;

    fn value_from_point(&self, surface: Option<Rect>, point: Point, current: f64) -> f64 {
        let Some(rect) = measured(surface) else {
            return current;
        };
        // Vertical tracks grow upward: the bottom edge is the minimum.
        let percentage = match self.orientation {
            Orientation::Vertical => 1.0 - clamp_unit((point.y - rect.y0) / rect.height()),
            Orientation::Horizontal => clamp_unit((point.x - rect.x0) / rect.width()),
        };
        lerp(self.range.min, self.range.max, percentage)
    }

    fn value_from_delta(&self, surface: Option<Rect>, delta: Vec2, initial: f64) -> f64 {
        let Some(rect) = measured(surface) else {
            return initial;
        };
        let sensitivity = self.range.span() / self.extent(rect);
        match self.orientation {
            Orientation::Vertical => initial + delta.y * sensitivity,
            Orientation::Horizontal => initial + delta.x * sensitivity,
        }
    }
}

/// Mapping for a rotary knob: relative vertical drag only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotaryMapper {
    pub range: AxisRange,
    /// Sweep of the knob in degrees.
    pub angle_range: f64,
    /// Angle of the minimum position in degrees, `0` pointing up.
    pub angle_offset: f64,
}

impl RotaryMapper {
    pub fn new(range: AxisRange, angle_range: f64, angle_offset: f64) -> Self {
        Self {
            range,
            angle_range,
            angle_offset,
        }
    }

    /// Visual rotation of the knob body in degrees.
    pub fn rotation(&self, value: f64) -> f64 {
        self.angle_offset + self.range.percentage(value) * self.angle_range
    }

    /// Start and end angles in radians of the value arc, measured from the
    /// positive x axis as drawing APIs expect.
    pub fn arc_angles(&self, value: f64) -> (f64, f64) {
        let start = (self.angle_offset - 90.0).to_radians();
        let end = (self.rotation(value) - 90.0).to_radians();
        (start, end)
    }
}

impl GeometryMapper for RotaryMapper {
    type Value = f64;

    fn jumps_on_press(&self) -> bool {
        false
    }

    fn value_from_point(&self, _surface: Option<Rect>, _point: Point, current: f64) -> f64 {
        current
    }

    fn value_from_delta(&self, _surface: Option<Rect>, delta: Vec2, initial: f64) -> f64 {
        let sensitivity = self.range.span() / ROTARY_DRAG_EXTENT;
        initial + delta.y * sensitivity
    }
}

/// Mapping for a two-dimensional pad. Screen-down is the low end of `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarMapper {
    pub range: PlaneRange,
}

impl PlanarMapper {
    pub fn new(range: PlaneRange) -> Self {
        Self { range }
    }
}

impl GeometryMapper for PlanarMapper {
    type Value = Point;

    fn value_from_point(&self, surface: Option<Rect>, point: Point, current: Point) -> Point {
        let Some(rect) = measured(surface) else {
            return current;
        };
        let nx = clamp_unit((point.x - rect.x0) / rect.width());
        let ny = clamp_unit((point.y - rect.y0) / rect.height());
        Point::new(
            lerp(self.range.x.min, self.range.x.max, nx),
            lerp(self.range.y.max, self.range.y.min, ny),
        )
    }

    fn value_from_delta(&self, surface: Option<Rect>, delta: Vec2, initial: Point) -> Point {
        let Some(rect) = measured(surface) else {
            return initial;
        };
        let sensitivity_x = self.range.x.span() / rect.width();
        let sensitivity_y = self.range.y.span() / rect.height();
        Point::new(
            initial.x + delta.x * sensitivity_x,
            initial.y + delta.y * sensitivity_y,
        )
    }
}
