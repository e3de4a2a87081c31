//! Safety net that releases a drag when the user presses elsewhere.

use std::fmt;

use crate::document::{Document, ListenerHandle};
use crate::element::Element;

/// A document listener armed for the lifetime of one drag session.
///
/// Any pointer-down whose target lies outside every element in `scope`
/// triggers `on_outside`. Dropping the guard unregisters the listener.
pub struct OutsideGuard {
    listener: ListenerHandle,
}

impl OutsideGuard {
    /// Arm a guard. Returns `None` when `scope` is empty, since nothing would
    /// count as inside.
    pub fn arm(document: &Document, scope: Vec<Element>, on_outside: impl Fn() + 'static) -> Option<Self> {
        if scope.is_empty() {
            return None;
        }
        let listener = document.add_pointer_down_listener(move |target| {
            if scope.iter().any(|element| element.contains(target)) {
                return;
            }
            on_outside();
        });
        Some(Self { listener })
    }

    /// Whether the listener is still registered.
    pub fn is_armed(&self) -> bool {
        !self.listener.token().is_cancelled()
    }
}

impl fmt::Debug for OutsideGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutsideGuard")
            .field("armed", &self.is_armed())
            .finish()
    }
}
