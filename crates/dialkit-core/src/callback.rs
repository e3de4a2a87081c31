//! Single-slot holder for the latest callback.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

/// Holds the most recently installed callback and invokes it on demand.
///
/// Interaction code calls through the slot at event time, so swapping the
/// callback never requires re-registering listeners.
pub struct CallbackSlot<T> {
    slot: RefCell<Option<Box<dyn FnMut(T)>>>,
    queued: RefCell<VecDeque<T>>,
    running: Cell<bool>,
}

impl<T> CallbackSlot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
            queued: RefCell::new(VecDeque::new()),
            running: Cell::new(false),
        }
    }

    /// Install `callback`, replacing the previous one.
    pub fn set(&self, callback: impl FnMut(T) + 'static) {
        *self.slot.borrow_mut() = Some(Box::new(callback));
    }

    /// Remove the current callback.
    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }

    /// Whether a callback is installed.
    pub fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Invoke the current callback with `value`, if any.
    ///
    /// The callback is moved out while it runs. Nested calls on the same slot
    /// from inside the callback are queued and delivered in order once it
    /// returns. A replacement installed from inside the callback is kept and
    /// receives the queued values.
    pub fn call(&self, value: T) {
        if self.running.get() {
            self.queued.borrow_mut().push_back(value);
            return;
        }
        self.running.set(true);
        let mut next = Some(value);
        while let Some(value) = next {
            let taken = self.slot.borrow_mut().take();
            if let Some(mut callback) = taken {
                callback(value);
                let mut slot = self.slot.borrow_mut();
                if slot.is_none() {
                    *slot = Some(callback);
                }
            }
            next = self.queued.borrow_mut().pop_front();
        }
        self.running.set(false);
    }
}

impl<T> Default for CallbackSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CallbackSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSlot")
            .field("is_set", &self.is_set())
            .finish()
    }
}
