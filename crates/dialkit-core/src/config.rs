//! Serializable control configuration.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Orientation;
use crate::range::{AxisRange, PlaneRange, RangeError};

/// Errors from building or reconfiguring a control.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid range: {0}")]
    Range(#[from] RangeError),
    #[error("{name} must be finite, got {value}")]
    InvalidAngle { name: &'static str, value: f64 },
    #[error("failed to parse control configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration of a linear fader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub orientation: Orientation,
    /// Initial value; the middle of the range when unset.
    pub default_value: Option<f64>,
    pub disabled: bool,
    pub prevent_wheel_default: bool,
}

impl Default for FaderConfig {
    fn default() -> Self {
        Self {
            min: -60.0,
            max: 6.0,
            step: 1.0,
            orientation: Orientation::Vertical,
            default_value: None,
            disabled: false,
            prevent_wheel_default: true,
        }
    }
}

impl FaderConfig {
    pub fn range(&self) -> Result<AxisRange, RangeError> {
        AxisRange::new(self.min, self.max, self.step)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range()?;
        Ok(())
    }

    /// Value the fader starts from when not controlled.
    pub fn initial_value(&self) -> f64 {
        let range = AxisRange {
            min: self.min,
            max: self.max,
            step: self.step,
        };
        self.default_value
            .unwrap_or(if self.max < self.min { self.min } else { range.midpoint() })
    }
}

/// Configuration of a rotary knob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnobConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default_value: f64,
    /// Sweep in degrees.
    pub angle_range: f64,
    /// Angle of the minimum in degrees, `0` pointing up.
    pub angle_offset: f64,
    pub disabled: bool,
    pub prevent_wheel_default: bool,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            default_value: 0.0,
            angle_range: 270.0,
            angle_offset: -135.0,
            disabled: false,
            prevent_wheel_default: true,
        }
    }
}

impl KnobConfig {
    pub fn range(&self) -> Result<AxisRange, RangeError> {
        AxisRange::new(self.min, self.max, self.step)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range()?;
        for (name, value) in [("angle_range", self.angle_range), ("angle_offset", self.angle_offset)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidAngle { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration of a two-dimensional pad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XyPadConfig {
    pub x: AxisRange,
    pub y: AxisRange,
    pub default_value: Point,
    pub disabled: bool,
    pub prevent_wheel_default: bool,
}

impl Default for XyPadConfig {
    fn default() -> Self {
        Self {
            x: AxisRange::default(),
            y: AxisRange::default(),
            default_value: Point::ZERO,
            disabled: false,
            prevent_wheel_default: true,
        }
    }
}

impl XyPadConfig {
    pub fn range(&self) -> PlaneRange {
        PlaneRange::new(self.x, self.y)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range().validate()?;
        Ok(())
    }
}

/// A control description as loaded from JSON.
///
/// ```json
/// { "kind": "knob", "min": 0, "max": 10, "step": 0.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlSpec {
    Fader(FaderConfig),
    Knob(KnobConfig),
    XyPad(XyPadConfig),
}

impl ControlSpec {
    /// Parse and validate a control description.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Fader(config) => config.validate(),
            Self::Knob(config) => config.validate(),
            Self::XyPad(config) => config.validate(),
        }
    }
}
