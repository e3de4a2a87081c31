//! Per-shape assemblies wiring the value core, geometry and drivers together.
//!
//! Every control is a root that owns a shared context, plus interactive
//! parts built from a handle to that context. Parts never look the context
//! up ambiently; using one after its root is gone panics.

mod fader;
mod knob;
mod xypad;

pub use fader::{Fader, FaderHandle, FaderSlider, FaderThumb, FaderTrack};
pub use knob::{Knob, KnobHandle, KnobSlider};
pub use xypad::{XyPad, XyPadHandle, XyPadSlider};

use kurbo::{Rect, Vec2};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::control::ControlCore;
use crate::document::Document;
use crate::drivers::{DragEvent, DragOptions, KeyAction, KeyboardDriver, PointerDrag, WheelDriver, WheelTick};
use crate::element::Element;
use crate::geometry::GeometryMapper;
use crate::guard::OutsideGuard;
use crate::input::{EventResponse, KeyEvent, PointerEvent};
use crate::range::ValueSpace;

type ValueOf<C> = <<C as ControlHost>::Space as ValueSpace>::Value;

/// Shape-specific hooks of a control context.
pub(crate) trait ControlHost: Sized + 'static {
    type Space: ValueSpace;
    type Mapper: GeometryMapper<Value = ValueOf<Self>>;

    /// Name used in logs and composition errors.
    const NAME: &'static str;

    fn core(&self) -> &ControlCore<Self::Space>;

    fn mapper(&self) -> Self::Mapper;

    /// Measured bounds of the element that defines pointer mapping.
    fn surface(&self) -> Option<Rect>;

    fn document(&self) -> &Document;

    fn wheel(&self) -> WheelDriver;

    /// Elements a press may land on without releasing an active drag.
    fn guard_scope(&self) -> Vec<Element>;

    /// Value a wheel tick commits.
    fn wheel_value(&self, tick: WheelTick, current: ValueOf<Self>) -> ValueOf<Self>;

    /// Value a navigation key commits.
    fn key_value(&self, action: KeyAction, current: ValueOf<Self>) -> ValueOf<Self>;
}

/// Weak reference from a part to its root's context.
pub(crate) struct ContextHandle<C> {
    context: Weak<C>,
}

impl<C: ControlHost> ContextHandle<C> {
    pub(crate) fn new(context: &Rc<C>) -> Self {
        Self {
            context: Rc::downgrade(context),
        }
    }

    /// The governing context.
    ///
    /// # Panics
    ///
    /// Panics if the root has been dropped.
    pub(crate) fn get(&self) -> Rc<C> {
        match self.context.upgrade() {
            Some(context) => context,
            None => panic!("{0} parts must be used within {0} root", C::NAME),
        }
    }
}

impl<C> Clone for ContextHandle<C> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

/// Pointer-drag state and element of one interactive part.
#[derive(Debug)]
pub(crate) struct DragPart {
    drag: RefCell<PointerDrag>,
    element: RefCell<Option<Element>>,
}

impl DragPart {
    pub(crate) fn new(options: DragOptions) -> Self {
        Self {
            drag: RefCell::new(PointerDrag::new(options)),
            element: RefCell::new(None),
        }
    }

    pub(crate) fn element(&self) -> Option<Element> {
        self.element.borrow().clone()
    }

    pub(crate) fn attach(&self, element: Element) {
        *self.element.borrow_mut() = Some(element);
    }

    /// Clear the element, first aborting a drag on it. Returns whether one was active.
    pub(crate) fn detach(&self) -> bool {
        let element = self.element.borrow_mut().take();
        self.drag.borrow_mut().abort(element.as_ref())
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.drag.borrow().is_dragging()
    }
}

impl Drop for DragPart {
    fn drop(&mut self) {
        let element = self.element.get_mut().take();
        self.drag.get_mut().abort(element.as_ref());
    }
}

/// Selects one [`DragPart`] out of a context.
pub(crate) type PartAccessor<C> = fn(&C) -> &DragPart;

/// Detach `part`'s element. A drag in progress ends without a commit.
pub(crate) fn detach_part<C: ControlHost>(context: &C, part: PartAccessor<C>) {
    if part(context).detach() {
        log::debug!("{} detached mid-drag", C::NAME);
        context.core().abandon_session();
    }
}

/// Route a pointer event through `part`'s drag driver.
pub(crate) fn handle_pointer<C: ControlHost>(
    context: &Rc<C>,
    part: PartAccessor<C>,
    event: &PointerEvent,
) -> EventResponse {
    let disabled = context.core().is_disabled();
    let slot = part(context);
    let element = slot.element();
    let target = element.as_ref();

    let (transition, response) = match *event {
        PointerEvent::Down {
            pointer, position, ..
        } => {
            let transition = slot.drag.borrow_mut().pointer_down(pointer, position, target, disabled);
            (transition, EventResponse::HANDLED.with_focus(!disabled))
        }
        PointerEvent::Move { pointer, position } => {
            let transition = slot.drag.borrow_mut().pointer_move(pointer, position, target, disabled);
            (transition, EventResponse::IGNORED)
        }
        PointerEvent::Up { pointer, .. } => {
            let transition = slot.drag.borrow_mut().pointer_up(pointer, target);
            (transition, EventResponse::IGNORED)
        }
        PointerEvent::Cancel { pointer } => {
            let transition = slot.drag.borrow_mut().pointer_cancel(pointer, target);
            (transition, EventResponse::IGNORED)
        }
        PointerEvent::Scroll { delta, .. } => return handle_wheel(context.as_ref(), delta),
    };

    match transition {
        Some(transition) => {
            apply_drag(context, part, transition);
            EventResponse {
                prevent_default: true,
                ..response
            }
        }
        None => response,
    }
}

fn apply_drag<C: ControlHost>(context: &Rc<C>, part: PartAccessor<C>, transition: DragEvent) {
    let core = context.core();
    let mapper = context.mapper();
    match transition {
        DragEvent::Start { position } => {
            let current = core.value();
            let start = mapper.value_from_point(context.surface(), position, current);
            core.begin_session(start);
            if part(context).drag.borrow().options().release_on_outside {
                arm_outside_guard(context, part);
            }
            if mapper.jumps_on_press() {
                core.update_value(start);
            }
        }
        DragEvent::Drag { delta } => {
            if let Some(start) = core.session_start() {
                core.drag_to(mapper.value_from_delta(context.surface(), delta, start));
            }
        }
        DragEvent::End => {
            core.finish_session();
        }
        DragEvent::Cancel => {
            // Cancel still commits what the gesture reached.
            log::debug!("{} drag cancelled", C::NAME);
            core.finish_session();
        }
        DragEvent::CaptureLost => {
            log::debug!("{} lost pointer capture", C::NAME);
            core.abandon_session();
        }
    }
}

fn arm_outside_guard<C: ControlHost>(context: &Rc<C>, part: PartAccessor<C>) {
    let weak = Rc::downgrade(context);
    let guard = OutsideGuard::arm(context.document(), context.guard_scope(), move || {
        if let Some(context) = weak.upgrade() {
            release_outside(context.as_ref(), part);
        }
    });
    if let Some(guard) = guard {
        context.core().arm_guard(guard);
    }
}

fn release_outside<C: ControlHost>(context: &C, part: PartAccessor<C>) {
    let slot = part(context);
    let element = slot.element();
    let released = slot.drag.borrow_mut().release_outside(element.as_ref());
    if released {
        log::debug!("{} released by outside press", C::NAME);
        context.core().finish_session();
    }
}

/// Commit one wheel tick.
pub(crate) fn handle_wheel<C: ControlHost>(context: &C, delta: Vec2) -> EventResponse {
    let core = context.core();
    if core.is_disabled() {
        return EventResponse::IGNORED;
    }
    let wheel = context.wheel();
    if let Some(tick) = wheel.tick(delta) {
        core.commit_value(context.wheel_value(tick, core.value()));
    }
    if wheel.prevents_default() {
        EventResponse::HANDLED
    } else {
        EventResponse::IGNORED
    }
}

/// Commit the value a navigation key maps to; other keys pass through.
pub(crate) fn handle_key<C: ControlHost>(context: &C, event: &KeyEvent) -> EventResponse {
    let core = context.core();
    match KeyboardDriver.action(event, core.is_disabled()) {
        Some(action) => {
            core.commit_value(context.key_value(action, core.value()));
            EventResponse::HANDLED
        }
        None => EventResponse::IGNORED,
    }
}
