//! Input-modality drivers.
//!
//! Each driver turns raw host events into shape-neutral requests:
//! - pointer presses/moves into drag transitions
//! - scroll deltas into discrete wheel ticks
//! - key presses into step/jump actions
//!
//! Drivers own no values; the hosting control maps their output through its
//! geometry and commits it.

mod keyboard;
mod pointer;
mod wheel;

pub use keyboard::{KeyAction, KeyAxis, KeyboardDriver, PAGE_STEPS};
pub use pointer::{DragEvent, DragOptions, DragState, PointerDrag};
pub use wheel::{WHEEL_NOISE_THRESHOLD, WheelAxes, WheelDriver, WheelTick};

/// Tab order of an interactive part.
pub fn tab_index(disabled: bool) -> i32 {
    if disabled { -1 } else { 0 }
}
