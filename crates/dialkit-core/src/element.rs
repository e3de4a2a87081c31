//! Host element handles: measured bounds, subtree membership and pointer capture.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::input::PointerId;

/// Opaque identifier of a node in the host's element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

struct ElementInner {
    id: NodeId,
    bounds: Cell<Option<Rect>>,
    descendants: RefCell<HashSet<NodeId>>,
    captures: RefCell<HashSet<PointerId>>,
}

/// A shared handle to a host element.
///
/// The host owns the element's lifecycle: it updates bounds after layout,
/// registers descendant nodes, and may drop pointer captures at any time
/// (window blur, element hidden, ...). Controls only read bounds and manage
/// the captures they request. Clones refer to the same element.
#[derive(Clone)]
pub struct Element {
    inner: Rc<ElementInner>,
}

impl Element {
    /// Create an unmeasured element.
    pub fn new(id: NodeId) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                id,
                bounds: Cell::new(None),
                descendants: RefCell::new(HashSet::new()),
                captures: RefCell::new(HashSet::new()),
            }),
        }
    }

    /// Create an element with known bounds.
    pub fn with_bounds(id: NodeId, bounds: Rect) -> Self {
        let element = Self::new(id);
        element.set_bounds(Some(bounds));
        element
    }

    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    /// Measured client-space bounds, `None` while unmeasured.
    pub fn bounds(&self) -> Option<Rect> {
        self.inner.bounds.get()
    }

    pub fn set_bounds(&self, bounds: Option<Rect>) {
        self.inner.bounds.set(bounds);
    }

    /// Register `node` as part of this element's subtree.
    pub fn add_descendant(&self, node: NodeId) {
        self.inner.descendants.borrow_mut().insert(node);
    }

    pub fn remove_descendant(&self, node: NodeId) {
        self.inner.descendants.borrow_mut().remove(&node);
    }

    /// Whether `node` is this element or inside its subtree.
    pub fn contains(&self, node: NodeId) -> bool {
        node == self.inner.id || self.inner.descendants.borrow().contains(&node)
    }

    /// Route subsequent events of `pointer` exclusively to this element.
    pub fn set_pointer_capture(&self, pointer: PointerId) {
        self.inner.captures.borrow_mut().insert(pointer);
    }

    pub fn has_pointer_capture(&self, pointer: PointerId) -> bool {
        self.inner.captures.borrow().contains(&pointer)
    }

    /// Release the capture of `pointer`; releasing an uncaptured pointer is a no-op.
    pub fn release_pointer_capture(&self, pointer: PointerId) {
        self.inner.captures.borrow_mut().remove(&pointer);
    }

    /// Release every capture held by this element.
    pub fn release_all_pointer_captures(&self) {
        self.inner.captures.borrow_mut().clear();
    }

    /// Number of pointers currently captured.
    pub fn capture_count(&self) -> usize {
        self.inner.captures.borrow().len()
    }

    /// Whether two handles refer to the same element.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.inner.id)
            .field("bounds", &self.inner.bounds.get())
            .field("captures", &self.inner.captures.borrow())
            .finish()
    }
}
