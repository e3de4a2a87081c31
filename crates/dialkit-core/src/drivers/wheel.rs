//! Wheel/scroll input filtering.

use kurbo::Vec2;

/// Deltas smaller than this on an axis are trackpad noise.
pub const WHEEL_NOISE_THRESHOLD: f64 = 0.1;

/// Which wheel axes a control reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelAxes {
    /// Only vertical scrolling moves the value.
    #[default]
    Vertical,
    /// Horizontal and vertical scrolling each move their own axis.
    Both,
}

/// Direction of one wheel tick per axis: `+1`, `-1`, or `0` for no movement.
///
/// Scrolling up (negative `y`) or left (negative `x`) increases the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelTick {
    pub x: i8,
    pub y: i8,
}

/// Turns raw scroll deltas into discrete ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelDriver {
    axes: WheelAxes,
    prevent_default: bool,
}

impl Default for WheelDriver {
    fn default() -> Self {
        Self {
            axes: WheelAxes::Vertical,
            prevent_default: true,
        }
    }
}

impl WheelDriver {
    pub fn new(axes: WheelAxes) -> Self {
        Self {
            axes,
            ..Self::default()
        }
    }

    /// Let the host scroll the page even while the wheel adjusts the control.
    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    /// Whether handled wheel events should suppress the host's scrolling.
    pub fn prevents_default(&self) -> bool {
        self.prevent_default
    }

    /// Classify a scroll delta. `None` when every relevant axis is below the
    /// noise threshold.
    pub fn tick(&self, delta: Vec2) -> Option<WheelTick> {
        let y = direction(delta.y);
        let x = match self.axes {
            WheelAxes::Vertical => 0,
            WheelAxes::Both => direction(delta.x),
        };
        (x != 0 || y != 0).then_some(WheelTick { x, y })
    }
}

fn direction(delta: f64) -> i8 {
    if !delta.is_finite() || delta.abs() < WHEEL_NOISE_THRESHOLD {
        0
    } else if delta < 0.0 {
        1
    } else {
        -1
    }
}
