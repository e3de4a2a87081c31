//! Keyboard navigation.

use crate::input::{KeyEvent, NavigationKey};

/// Number of steps a page key moves.
pub const PAGE_STEPS: i32 = 10;

/// Axis a key acts on. One-dimensional controls treat both the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAxis {
    Horizontal,
    Vertical,
}

/// Shape-neutral effect of a navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move by `steps` steps along `axis`.
    Step { axis: KeyAxis, steps: i32 },
    /// Jump to the start of the range.
    Home,
    /// Jump to the end of the range.
    End,
}

/// Maps navigation keys to actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardDriver;

impl KeyboardDriver {
    /// Action for a key press, or `None` for keys that should pass through.
    pub fn action(&self, event: &KeyEvent, disabled: bool) -> Option<KeyAction> {
        if disabled {
            return None;
        }
        let KeyEvent::Pressed(name) = event else {
            return None;
        };
        let action = match NavigationKey::from_name(name)? {
            NavigationKey::ArrowUp => KeyAction::Step {
                axis: KeyAxis::Vertical,
                steps: 1,
            },
            NavigationKey::ArrowDown => KeyAction::Step {
                axis: KeyAxis::Vertical,
                steps: -1,
            },
            NavigationKey::ArrowRight => KeyAction::Step {
                axis: KeyAxis::Horizontal,
                steps: 1,
            },
            NavigationKey::ArrowLeft => KeyAction::Step {
                axis: KeyAxis::Horizontal,
                steps: -1,
            },
            NavigationKey::PageUp => KeyAction::Step {
                axis: KeyAxis::Vertical,
                steps: PAGE_STEPS,
            },
            NavigationKey::PageDown => KeyAction::Step {
                axis: KeyAxis::Vertical,
                steps: -PAGE_STEPS,
            },
            NavigationKey::Home => KeyAction::Home,
            NavigationKey::End => KeyAction::End,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(name: &str) -> KeyEvent {
        KeyEvent::Pressed(name.to_string())
    }

    #[test]
    fn test_arrows() {
        let driver = KeyboardDriver;
        assert_eq!(
            driver.action(&press("ArrowLeft"), false),
            Some(KeyAction::Step {
                axis: KeyAxis::Horizontal,
                steps: -1
            })
        );
        assert_eq!(
            driver.action(&press("ArrowUp"), false),
            Some(KeyAction::Step {
                axis: KeyAxis::Vertical,
                steps: 1
            })
        );
    }

    #[test]
    fn test_page_keys_move_ten_steps() {
        let driver = KeyboardDriver;
        assert_eq!(
            driver.action(&press("PageDown"), false),
            Some(KeyAction::Step {
                axis: KeyAxis::Vertical,
                steps: -10
            })
        );
    }

    #[test]
    fn test_home_end() {
        let driver = KeyboardDriver;
        assert_eq!(driver.action(&press("Home"), false), Some(KeyAction::Home));
        assert_eq!(driver.action(&press("End"), false), Some(KeyAction::End));
    }

    #[test]
    fn test_passthrough() {
        let driver = KeyboardDriver;
        assert_eq!(driver.action(&press("Tab"), false), None);
        assert_eq!(driver.action(&KeyEvent::Released("ArrowUp".into()), false), None);
        assert_eq!(driver.action(&press("ArrowUp"), true), None);
    }
}
