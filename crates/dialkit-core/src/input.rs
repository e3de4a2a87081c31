//! Input events delivered to controls and the responses they produce.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::element::NodeId;

/// Identifier of an active pointer (mouse, pen contact or touch point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The id hosts conventionally assign to the mouse.
    pub const MOUSE: PointerId = PointerId(1);
}

/// Pointer event type for unified mouse/pen/touch handling.
///
/// Positions are in the same client coordinate space as element bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        pointer: PointerId,
        position: Point,
        /// Deepest host node under the pointer.
        target: NodeId,
    },
    Move {
        pointer: PointerId,
        position: Point,
    },
    Up {
        pointer: PointerId,
        position: Point,
    },
    /// The platform aborted the pointer stream (e.g. a touch turned into a scroll).
    Cancel {
        pointer: PointerId,
    },
    /// Wheel or trackpad scroll. Positive `delta.y` scrolls down.
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

/// Keyboard event type, keyed by logical key name (`"ArrowUp"`, `"Home"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Keys the keyboard driver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
}

impl NavigationKey {
    /// Parse a logical key name. Unrecognized names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            _ => return None,
        })
    }

    /// The logical key name this key parses from.
    pub fn name(self) -> &'static str {
        match self {
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
        }
    }
}

/// What the host should do with an event after a control handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the host's default action (scrolling, text selection, ...).
    pub prevent_default: bool,
    /// Move keyboard focus to the control's focusable part.
    pub request_focus: bool,
}

impl EventResponse {
    /// Let the event pass through untouched.
    pub const IGNORED: EventResponse = EventResponse {
        prevent_default: false,
        request_focus: false,
    };

    /// Consume the event.
    pub const HANDLED: EventResponse = EventResponse {
        prevent_default: true,
        request_focus: false,
    };

    pub fn with_focus(mut self, request_focus: bool) -> Self {
        self.request_focus = request_focus;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_roundtrip() {
        for key in [
            NavigationKey::ArrowUp,
            NavigationKey::ArrowDown,
            NavigationKey::ArrowLeft,
            NavigationKey::ArrowRight,
            NavigationKey::Home,
            NavigationKey::End,
            NavigationKey::PageUp,
            NavigationKey::PageDown,
        ] {
            assert_eq!(NavigationKey::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(NavigationKey::from_name("a"), None);
        assert_eq!(NavigationKey::from_name("Enter"), None);
        assert_eq!(NavigationKey::from_name("arrowup"), None);
    }

    #[test]
    fn test_response_with_focus() {
        let response = EventResponse::HANDLED.with_focus(true);
        assert!(response.prevent_default);
        assert!(response.request_focus);
        assert_eq!(EventResponse::default(), EventResponse::IGNORED);
    }
}
