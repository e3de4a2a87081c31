//! DialKit Core Library
//!
//! Headless interaction engine for continuous-value controls: linear faders,
//! rotary knobs and two-dimensional pads. Turns pointer drags, wheel ticks
//! and navigation keys into clamped, stepped values, with separate live-change
//! and commit notifications. Rendering is left to the host.

pub mod callback;
pub mod config;
pub mod control;
pub mod controls;
pub mod document;
pub mod drivers;
pub mod element;
pub mod geometry;
pub mod guard;
pub mod input;
pub mod math;
pub mod range;
pub mod store;
#[cfg(feature = "winit")]
pub mod winit_input;

pub use callback::CallbackSlot;
pub use config::{ConfigError, ControlSpec, FaderConfig, KnobConfig, XyPadConfig};
pub use control::ControlCore;
pub use controls::{
    Fader, FaderHandle, FaderSlider, FaderThumb, FaderTrack, Knob, KnobHandle, KnobSlider, XyPad, XyPadHandle,
    XyPadSlider,
};
pub use document::{CancellationToken, Document, ListenerHandle};
pub use element::{Element, NodeId};
pub use geometry::{GeometryMapper, LinearMapper, Orientation, PlanarMapper, RotaryMapper, ROTARY_DRAG_EXTENT};
pub use guard::OutsideGuard;
pub use input::{EventResponse, KeyEvent, NavigationKey, PointerEvent, PointerId};
pub use range::{AxisRange, PlaneRange, RangeError, ValueSpace};
pub use store::ValueStore;
