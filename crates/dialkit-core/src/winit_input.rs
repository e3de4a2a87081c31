//! Conversions from winit window events.

use kurbo::Vec2;
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{Key, NamedKey};

use crate::input::{KeyEvent, NavigationKey};

/// Pixels per scrolled line.
pub const LINE_HEIGHT: f64 = 20.0;

/// Logical name of a navigation key, or `None` for keys controls ignore.
pub fn key_name(key: &Key) -> Option<&'static str> {
    let navigation = match key {
        Key::Named(NamedKey::ArrowUp) => NavigationKey::ArrowUp,
        Key::Named(NamedKey::ArrowDown) => NavigationKey::ArrowDown,
        Key::Named(NamedKey::ArrowLeft) => NavigationKey::ArrowLeft,
        Key::Named(NamedKey::ArrowRight) => NavigationKey::ArrowRight,
        Key::Named(NamedKey::Home) => NavigationKey::Home,
        Key::Named(NamedKey::End) => NavigationKey::End,
        Key::Named(NamedKey::PageUp) => NavigationKey::PageUp,
        Key::Named(NamedKey::PageDown) => NavigationKey::PageDown,
        _ => return None,
    };
    Some(navigation.name())
}

/// Key event for a winit logical key, if it is one controls react to.
pub fn key_event(key: &Key, state: ElementState) -> Option<KeyEvent> {
    let name = key_name(key)?.to_string();
    Some(match state {
        ElementState::Pressed => KeyEvent::Pressed(name),
        ElementState::Released => KeyEvent::Released(name),
    })
}

/// Scroll delta in pixels, positive `y` scrolling down.
///
/// winit reports positive `y` for scrolling up, so both axes are negated.
pub fn wheel_delta(delta: MouseScrollDelta) -> Vec2 {
    let scroll = match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(x as f64 * LINE_HEIGHT, y as f64 * LINE_HEIGHT),
        MouseScrollDelta::PixelDelta(pos) => Vec2::new(pos.x, pos.y),
    };
    -scroll
}
