//! Rotary knob: vertical drag turns it, no jump on press.

use kurbo::Rect;
use std::cell::Cell;
use std::rc::Rc;

use super::{ContextHandle, ControlHost, DragPart, detach_part, handle_key, handle_pointer};
use crate::config::{ConfigError, KnobConfig};
use crate::control::ControlCore;
use crate::document::Document;
use crate::drivers::{DragOptions, KeyAction, WheelAxes, WheelDriver, WheelTick, tab_index};
use crate::element::Element;
use crate::geometry::RotaryMapper;
use crate::input::{EventResponse, KeyEvent, PointerEvent};
use crate::range::AxisRange;

pub(crate) struct KnobContext {
    core: ControlCore<AxisRange>,
    config: Cell<KnobConfig>,
    slider: DragPart,
    document: Document,
}

impl KnobContext {
    fn slider(&self) -> &DragPart {
        &self.slider
    }
}

impl ControlHost for KnobContext {
    type Space = AxisRange;
    type Mapper = RotaryMapper;

    const NAME: &'static str = "Knob";

    fn core(&self) -> &ControlCore<AxisRange> {
        &self.core
    }

    fn mapper(&self) -> RotaryMapper {
        let config = self.config.get();
        RotaryMapper::new(self.core.space(), config.angle_range, config.angle_offset)
    }

    fn surface(&self) -> Option<Rect> {
        self.slider.element().and_then(|element| element.bounds())
    }

    fn document(&self) -> &Document {
        &self.document
    }

    fn wheel(&self) -> WheelDriver {
        WheelDriver::new(WheelAxes::Vertical).with_prevent_default(self.config.get().prevent_wheel_default)
    }

    fn guard_scope(&self) -> Vec<Element> {
        self.slider.element().into_iter().collect()
    }

    fn wheel_value(&self, tick: WheelTick, current: f64) -> f64 {
        current + f64::from(tick.y) * self.core.space().step
    }

    fn key_value(&self, action: KeyAction, current: f64) -> f64 {
        let range = self.core.space();
        match action {
            KeyAction::Step { steps, .. } => current + f64::from(steps) * range.step,
            KeyAction::Home => range.min,
            KeyAction::End => range.max,
        }
    }
}

/// Root of a rotary knob.
///
/// Owns the value, the callbacks and the drag session. The interactive
/// surface is a [`KnobSlider`] built from [`Knob::handle`].
pub struct Knob {
    context: Rc<KnobContext>,
}

impl Knob {
    /// Build an uncontrolled knob starting at `config.default_value`.
    pub fn new(config: KnobConfig, document: &Document) -> Result<Self, ConfigError> {
        config.validate()?;
        let core = ControlCore::new(KnobContext::NAME, config.range()?, None, config.default_value);
        core.set_disabled(config.disabled);
        Ok(Self {
            context: Rc::new(KnobContext {
                core,
                config: Cell::new(config),
                slider: DragPart::new(DragOptions {
                    capture_pointer: true,
                    release_on_outside: true,
                }),
                document: document.clone(),
            }),
        })
    }

    pub fn handle(&self) -> KnobHandle {
        KnobHandle(ContextHandle::new(&self.context))
    }

    pub fn config(&self) -> KnobConfig {
        self.context.config.get()
    }

    /// Apply new bounds and geometry. The current value is re-clamped.
    pub fn reconfigure(&self, config: KnobConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.context.core.set_space(config.range()?);
        self.context.core.set_disabled(config.disabled);
        self.context.config.set(config);
        Ok(())
    }

    pub fn value(&self) -> f64 {
        self.context.core.value()
    }

    /// `Some` makes the knob controlled; `None` hands the value back to it.
    pub fn set_value(&self, value: Option<f64>) {
        self.context.core.set_controlled(value);
    }

    pub fn on_value_change(&self, callback: impl FnMut(f64) + 'static) {
        self.context.core.on_change().set(callback);
    }

    pub fn on_value_commit(&self, callback: impl FnMut(f64) + 'static) {
        self.context.core.on_commit().set(callback);
    }

    pub fn is_disabled(&self) -> bool {
        self.context.core.is_disabled()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.context.core.set_disabled(disabled);
    }

    pub fn is_dragging(&self) -> bool {
        self.context.slider.is_dragging()
    }

    pub fn percentage(&self) -> f64 {
        self.context.core.space().percentage(self.value())
    }

    /// Rotation of the knob body in degrees.
    pub fn rotation(&self) -> f64 {
        self.context.mapper().rotation(self.value())
    }

    /// Start and end of the value arc in radians.
    pub fn arc_angles(&self) -> (f64, f64) {
        self.context.mapper().arc_angles(self.value())
    }
}

/// Non-owning reference to a [`Knob`] for building its parts.
#[derive(Clone)]
pub struct KnobHandle(ContextHandle<KnobContext>);

/// The knob's interactive surface: drag, wheel, keys and focus.
pub struct KnobSlider {
    handle: KnobHandle,
}

impl KnobSlider {
    pub fn new(handle: &KnobHandle) -> Self {
        Self { handle: handle.clone() }
    }

    fn context(&self) -> Rc<KnobContext> {
        self.handle.0.get()
    }

    pub fn attach(&self, element: Element) {
        self.context().slider.attach(element);
    }

    pub fn detach(&self) {
        detach_part(self.context().as_ref(), KnobContext::slider);
    }

    pub fn tab_index(&self) -> i32 {
        tab_index(self.context().core.is_disabled())
    }

    pub fn handle_pointer_event(&self, event: &PointerEvent) -> EventResponse {
        handle_pointer(&self.context(), KnobContext::slider, event)
    }

    pub fn handle_key_event(&self, event: &KeyEvent) -> EventResponse {
        handle_key(self.context().as_ref(), event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::NodeId;
    use crate::input::PointerId;
    use kurbo::{Point, Vec2};
    use std::cell::RefCell;

    const P: PointerId = PointerId::MOUSE;

    fn knob() -> (Knob, KnobSlider, Document) {
        let document = Document::new();
        let knob = Knob::new(
            KnobConfig {
                default_value: 50.0,
                ..KnobConfig::default()
            },
            &document,
        )
        .unwrap();
        let slider = KnobSlider::new(&knob.handle());
        slider.attach(Element::with_bounds(NodeId(1), Rect::new(0.0, 0.0, 48.0, 48.0)));
        (knob, slider, document)
    }

    fn down(y: f64) -> PointerEvent {
        PointerEvent::Down {
            pointer: P,
            position: Point::new(24.0, y),
            target: NodeId(1),
        }
    }

    fn moved(y: f64) -> PointerEvent {
        PointerEvent::Move {
            pointer: P,
            position: Point::new(24.0, y),
        }
    }

    #[test]
    fn test_press_does_not_jump() {
        let (knob, slider, _document) = knob();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let c = changes.clone();
        knob.on_value_change(move |v| c.borrow_mut().push(v));
        let response = slider.handle_pointer_event(&down(0.0));
        assert!(response.prevent_default && response.request_focus);
        assert!(knob.is_dragging());
        assert!(changes.borrow().is_empty());
        assert!((knob.value() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vertical_drag_sweeps_range() {
        let (knob, slider, _document) = knob();
        slider.handle_pointer_event(&down(200.0));
        slider.handle_pointer_event(&moved(125.0));
        assert!((knob.value() - 100.0).abs() < f64::EPSILON);
        slider.handle_pointer_event(&moved(275.0));
        assert!(knob.value().abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_steps_and_prevents_default() {
        let (knob, slider, _document) = knob();
        let response = slider.handle_pointer_event(&PointerEvent::Scroll {
            position: Point::ZERO,
            delta: Vec2::new(0.0, -3.0),
        });
        assert!(response.prevent_default);
        assert!((knob.value() - 51.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_default_prevention_can_be_disabled() {
        let (knob, slider, _document) = knob();
        knob.reconfigure(KnobConfig {
            prevent_wheel_default: false,
            ..knob.config()
        })
        .unwrap();
        let response = slider.handle_pointer_event(&PointerEvent::Scroll {
            position: Point::ZERO,
            delta: Vec2::new(0.0, 4.0),
        });
        assert!(!response.prevent_default);
        assert!((knob.value() - 49.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_read_outs() {
        let (knob, _slider, _document) = knob();
        assert!((knob.percentage() - 0.5).abs() < f64::EPSILON);
        assert!(knob.rotation().abs() < 1e-9);
        let (start, end) = knob.arc_angles();
        assert!((start - (-225.0f64).to_radians()).abs() < 1e-9);
        assert!((end - (-90.0f64).to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let (knob, slider, _document) = knob();
        knob.set_disabled(true);
        assert_eq!(slider.tab_index(), -1);
        let response = slider.handle_pointer_event(&down(0.0));
        assert!(!response.request_focus);
        assert!(!knob.is_dragging());
        let response = slider.handle_key_event(&KeyEvent::Pressed("End".into()));
        assert_eq!(response, EventResponse::IGNORED);
        assert!((knob.value() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reconfigure_reclamps() {
        let (knob, _slider, _document) = knob();
        knob.reconfigure(KnobConfig {
            max: 20.0,
            ..knob.config()
        })
        .unwrap();
        assert!((knob.value() - 20.0).abs() < f64::EPSILON);
        assert!(knob.reconfigure(KnobConfig {
            angle_range: f64::INFINITY,
            ..knob.config()
        })
        .is_err());
    }

    #[test]
    #[should_panic(expected = "Knob parts must be used within Knob root")]
    fn test_part_outliving_root_panics() {
        let (knob, slider, _document) = knob();
        drop(knob);
        slider.tab_index();
    }
}
