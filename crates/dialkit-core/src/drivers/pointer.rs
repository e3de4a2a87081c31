//! Pointer drag state machine.

use kurbo::{Point, Vec2};

use crate::element::Element;
use crate::input::PointerId;

/// Options for a [`PointerDrag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOptions {
    /// Capture the active pointer on the target element while dragging.
    pub capture_pointer: bool,
    /// End the drag when a pointer goes down outside the control.
    pub release_on_outside: bool,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            capture_pointer: true,
            release_on_outside: false,
        }
    }
}

/// Current state of a drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A pointer is pressed and being tracked.
    Dragging {
        pointer: PointerId,
        /// Client position of the press.
        start: Point,
    },
}

/// Transition reported by the driver to the hosting control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Entered `Dragging` at `position`.
    Start { position: Point },
    /// Pointer moved; `delta` is relative to the press, `y` pointing up.
    Drag { delta: Vec2 },
    /// Pointer released normally.
    End,
    /// The platform cancelled the pointer stream.
    Cancel,
    /// Capture was lost out-of-band. The drag is over without end or cancel.
    CaptureLost,
}

/// Drives one element's pointer interaction: `Idle -> Dragging -> Idle`.
///
/// Only one pointer is tracked; presses and events from other pointers are
/// ignored while dragging.
#[derive(Debug, Clone, Default)]
pub struct PointerDrag {
    state: DragState,
    options: DragOptions,
}

impl PointerDrag {
    pub fn new(options: DragOptions) -> Self {
        Self {
            state: DragState::Idle,
            options,
        }
    }

    pub fn options(&self) -> DragOptions {
        self.options
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    fn active_pointer(&self) -> Option<PointerId> {
        match self.state {
            DragState::Dragging { pointer, .. } => Some(pointer),
            DragState::Idle => None,
        }
    }

    /// Press. Starts a drag unless disabled or already dragging.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        position: Point,
        target: Option<&Element>,
        disabled: bool,
    ) -> Option<DragEvent> {
        if disabled || self.is_dragging() {
            return None;
        }
        self.state = DragState::Dragging {
            pointer,
            start: position,
        };
        if self.options.capture_pointer {
            if let Some(element) = target {
                element.set_pointer_capture(pointer);
            }
        }
        Some(DragEvent::Start { position })
    }

    /// Move. Reports the delta, or [`DragEvent::CaptureLost`] if the capture
    /// this drag requested has silently gone away.
    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        position: Point,
        target: Option<&Element>,
        disabled: bool,
    ) -> Option<DragEvent> {
        let DragState::Dragging { pointer: active, start } = self.state else {
            return None;
        };
        if disabled || active != pointer {
            return None;
        }
        if self.options.capture_pointer {
            if let Some(element) = target {
                if !element.has_pointer_capture(pointer) {
                    self.state = DragState::Idle;
                    return Some(DragEvent::CaptureLost);
                }
            }
        }
        Some(DragEvent::Drag {
            delta: Vec2::new(position.x - start.x, start.y - position.y),
        })
    }

    /// Release. Frees the capture and ends the drag.
    pub fn pointer_up(&mut self, pointer: PointerId, target: Option<&Element>) -> Option<DragEvent> {
        self.finish(pointer, target).then_some(DragEvent::End)
    }

    /// Platform cancel. Frees the capture and reports a cancel, distinct from end.
    pub fn pointer_cancel(&mut self, pointer: PointerId, target: Option<&Element>) -> Option<DragEvent> {
        self.finish(pointer, target).then_some(DragEvent::Cancel)
    }

    /// Forced exit from an outside press: drop every capture on `target`.
    ///
    /// Returns whether a drag was in progress.
    pub fn release_outside(&mut self, target: Option<&Element>) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.state = DragState::Idle;
        if let Some(element) = target {
            element.release_all_pointer_captures();
        }
        true
    }

    /// Teardown: free the active pointer's capture and go idle without a transition.
    ///
    /// Returns whether a drag was in progress.
    pub fn abort(&mut self, target: Option<&Element>) -> bool {
        match self.active_pointer() {
            Some(pointer) => self.finish(pointer, target),
            None => false,
        }
    }

    fn finish(&mut self, pointer: PointerId, target: Option<&Element>) -> bool {
        if self.active_pointer() != Some(pointer) {
            return false;
        }
        self.state = DragState::Idle;
        if self.options.capture_pointer {
            if let Some(element) = target {
                if element.has_pointer_capture(pointer) {
                    element.release_pointer_capture(pointer);
                }
            }
        }
        true
    }
}
