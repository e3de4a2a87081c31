//! Controlled/uncontrolled value reconciliation.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::callback::CallbackSlot;

type Transform<T> = Box<dyn Fn(T) -> T>;

/// Reconciles an externally supplied value with an internally tracked one.
///
/// While an external value is present the store is *controlled*: the
/// effective value is always `transform(external)` and setter calls only
/// notify. Without one, the setter also updates the tracked value.
pub struct ValueStore<T: Copy + 'static> {
    controlled: Cell<Option<T>>,
    internal: Cell<T>,
    transform: RefCell<Transform<T>>,
    on_change: CallbackSlot<T>,
}

impl<T: Copy + 'static> ValueStore<T> {
    /// Create a store with an optional external value and a default.
    pub fn new(controlled: Option<T>, default: T, transform: impl Fn(T) -> T + 'static) -> Self {
        Self {
            controlled: Cell::new(controlled),
            internal: Cell::new(transform(default)),
            transform: RefCell::new(Box::new(transform)),
            on_change: CallbackSlot::new(),
        }
    }

    /// The effective, transformed value.
    pub fn value(&self) -> T {
        let raw = self.controlled.get().unwrap_or(self.internal.get());
        (self.transform.borrow())(raw)
    }

    /// Whether an external value currently governs the store.
    pub fn is_controlled(&self) -> bool {
        self.controlled.get().is_some()
    }

    /// Supply (`Some`) or withdraw (`None`) the external value.
    pub fn set_controlled(&self, value: Option<T>) {
        self.controlled.set(value);
    }

    /// Transform `value`, track it when uncontrolled, and notify.
    ///
    /// A `set` made from inside the change callback is notified after the
    /// outer notification returns.
    ///
    /// Returns the transformed value that was reported.
    pub fn set(&self, value: T) -> T {
        let transformed = (self.transform.borrow())(value);
        if !self.is_controlled() {
            self.internal.set(transformed);
        }
        self.on_change.call(transformed);
        transformed
    }

    /// Replace the transform, e.g. after the bounds changed.
    pub fn set_transform(&self, transform: impl Fn(T) -> T + 'static) {
        *self.transform.borrow_mut() = Box::new(transform);
    }

    /// Slot receiving every value passed through [`set`](Self::set).
    pub fn on_change(&self) -> &CallbackSlot<T> {
        &self.on_change
    }
}

impl<T: Copy + fmt::Debug + 'static> fmt::Debug for ValueStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStore")
            .field("controlled", &self.controlled.get())
            .field("internal", &self.internal.get())
            .finish_non_exhaustive()
    }
}
