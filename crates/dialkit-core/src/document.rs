//! Host-wide pointer-down listeners with cancellable registrations.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::element::NodeId;

/// Shared cancellation flag. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

type Listener = Rc<dyn Fn(NodeId)>;

struct Registration {
    id: u64,
    token: CancellationToken,
    listener: Listener,
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<Registration>,
}

/// Registry of capturing pointer-down listeners for one host document.
///
/// The host calls [`dispatch_pointer_down`](Document::dispatch_pointer_down)
/// before delivering a pointer-down to its target. Clones share the registry.
#[derive(Clone, Default)]
pub struct Document {
    table: Rc<RefCell<ListenerTable>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it stays active until the handle is aborted or dropped.
    #[must_use = "dropping the handle removes the listener"]
    pub fn add_pointer_down_listener(&self, listener: impl Fn(NodeId) + 'static) -> ListenerHandle {
        let token = CancellationToken::new();
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push(Registration {
            id,
            token: token.clone(),
            listener: Rc::new(listener),
        });
        ListenerHandle {
            id,
            token,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Notify every live listener of a pointer-down on `target`.
    ///
    /// Listeners may add or remove registrations while running. A listener
    /// cancelled by an earlier one in the same dispatch is skipped.
    pub fn dispatch_pointer_down(&self, target: NodeId) {
        let snapshot: Vec<(CancellationToken, Listener)> = self
            .table
            .borrow()
            .entries
            .iter()
            .map(|r| (r.token.clone(), r.listener.clone()))
            .collect();
        for (token, listener) in snapshot {
            if token.is_cancelled() {
                continue;
            }
            listener(target);
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.table.borrow().entries.len()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Owner of one listener registration.
pub struct ListenerHandle {
    id: u64,
    token: CancellationToken,
    table: Weak<RefCell<ListenerTable>>,
}

impl ListenerHandle {
    /// Cancel and unregister the listener.
    pub fn abort(self) {
        drop(self);
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().entries.retain(|r| r.id != self.id);
        }
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("id", &self.id)
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
