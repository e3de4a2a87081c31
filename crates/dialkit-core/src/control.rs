//! Commit protocol and drag session bookkeeping shared by every control.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::callback::CallbackSlot;
use crate::guard::OutsideGuard;
use crate::range::ValueSpace;
use crate::store::ValueStore;

/// Ephemeral state of one drag gesture.
struct Session<V> {
    /// Value the drag is measured from.
    start: V,
    /// Last value requested by the drag; committed when the gesture ends.
    pending: V,
    guard: Option<OutsideGuard>,
}

/// Value, notifications and the active drag session of one control.
///
/// `update_value` is the live path: clamp, quantize, store, notify change.
/// `commit_value` does the same and additionally notifies commit; it runs
/// once per gesture.
pub struct ControlCore<S: ValueSpace> {
    name: &'static str,
    space: Cell<S>,
    store: ValueStore<S::Value>,
    on_commit: CallbackSlot<S::Value>,
    session: RefCell<Option<Session<S::Value>>>,
    disabled: Cell<bool>,
}

impl<S: ValueSpace> ControlCore<S> {
    pub fn new(name: &'static str, space: S, controlled: Option<S::Value>, default: S::Value) -> Self {
        Self {
            name,
            space: Cell::new(space),
            store: ValueStore::new(controlled, default, move |v| space.sanitize(v)),
            on_commit: CallbackSlot::new(),
            session: RefCell::new(None),
            disabled: Cell::new(false),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn space(&self) -> S {
        self.space.get()
    }

    /// Swap the value space and rebuild the store transform from it.
    pub fn set_space(&self, space: S) {
        self.space.set(space);
        self.store.set_transform(move |v| space.sanitize(v));
    }

    /// The effective value.
    pub fn value(&self) -> S::Value {
        self.store.value()
    }

    pub fn is_controlled(&self) -> bool {
        self.store.is_controlled()
    }

    /// Supply or withdraw the externally controlled value.
    pub fn set_controlled(&self, value: Option<S::Value>) {
        self.store.set_controlled(value);
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    /// Slot for live change notifications.
    pub fn on_change(&self) -> &CallbackSlot<S::Value> {
        self.store.on_change()
    }

    /// Slot for commit notifications.
    pub fn on_commit(&self) -> &CallbackSlot<S::Value> {
        &self.on_commit
    }

    /// Live update: clamp, quantize and store `value`, notifying change.
    pub fn update_value(&self, value: S::Value) -> S::Value {
        let stepped = self.space.get().constrain(value);
        log::trace!("{} update {:?}", self.name, stepped);
        self.store.set(stepped);
        stepped
    }

    /// Finalized change: as [`update_value`](Self::update_value), then notify commit.
    pub fn commit_value(&self, value: S::Value) -> S::Value {
        let stepped = self.space.get().constrain(value);
        log::debug!("{} commit {:?}", self.name, stepped);
        self.store.set(stepped);
        self.on_commit.call(stepped);
        stepped
    }

    /// Open a drag session measured from `start`. Replaces any previous session.
    pub fn begin_session(&self, start: S::Value) {
        log::debug!("{} drag started at {:?}", self.name, start);
        let previous = self.session.borrow_mut().replace(Session {
            start,
            pending: start,
            guard: None,
        });
        drop(previous);
    }

    /// Attach an outside-release guard to the open session.
    pub fn arm_guard(&self, guard: OutsideGuard) {
        if let Some(session) = self.session.borrow_mut().as_mut() {
            session.guard = Some(guard);
        }
    }

    pub fn is_session_active(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Start value of the open session.
    pub fn session_start(&self) -> Option<S::Value> {
        self.session.borrow().as_ref().map(|s| s.start)
    }

    /// Pending value of the open session.
    pub fn pending_value(&self) -> Option<S::Value> {
        self.session.borrow().as_ref().map(|s| s.pending)
    }

    /// Record `value` as pending and push it as a live update.
    pub fn drag_to(&self, value: S::Value) {
        if let Some(session) = self.session.borrow_mut().as_mut() {
            session.pending = value;
        }
        self.update_value(value);
    }

    /// Close the session and commit its pending value.
    ///
    /// The pending value is used as recorded, so a layout change during the
    /// gesture does not alter what gets committed. Returns `None` when no
    /// session was open.
    pub fn finish_session(&self) -> Option<S::Value> {
        let session = self.session.borrow_mut().take()?;
        let pending = session.pending;
        drop(session);
        Some(self.commit_value(pending))
    }

    /// Close the session without committing.
    pub fn abandon_session(&self) {
        let session = self.session.borrow_mut().take();
        if let Some(session) = session {
            log::debug!("{} drag abandoned at {:?}", self.name, session.pending);
        }
    }
}

impl<S: ValueSpace> fmt::Debug for ControlCore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlCore")
            .field("name", &self.name)
            .field("space", &self.space.get())
            .field("store", &self.store)
            .field("session_active", &self.is_session_active())
            .field("disabled", &self.disabled.get())
            .finish()
    }
}
