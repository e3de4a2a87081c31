//! Two-dimensional pad with independent x and y ranges.

use kurbo::{Point, Rect};
use std::cell::Cell;
use std::rc::Rc;

use super::{ContextHandle, ControlHost, DragPart, detach_part, handle_key, handle_pointer};
use crate::config::{ConfigError, XyPadConfig};
use crate::control::ControlCore;
use crate::document::Document;
use crate::drivers::{DragOptions, KeyAction, KeyAxis, WheelAxes, WheelDriver, WheelTick, tab_index};
use crate::element::Element;
use crate::geometry::PlanarMapper;
use crate::input::{EventResponse, KeyEvent, PointerEvent};
use crate::range::PlaneRange;

pub(crate) struct XyPadContext {
    core: ControlCore<PlaneRange>,
    config: Cell<XyPadConfig>,
    pad: DragPart,
    document: Document,
}

impl XyPadContext {
    fn pad(&self) -> &DragPart {
        &self.pad
    }
}

impl ControlHost for XyPadContext {
    type Space = PlaneRange;
    type Mapper = PlanarMapper;

    const NAME: &'static str = "XYPad";

    fn core(&self) -> &ControlCore<PlaneRange> {
        &self.core
    }

    fn mapper(&self) -> PlanarMapper {
        PlanarMapper::new(self.core.space())
    }

    fn surface(&self) -> Option<Rect> {
        self.pad.element().and_then(|element| element.bounds())
    }

    fn document(&self) -> &Document {
        &self.document
    }

    fn wheel(&self) -> WheelDriver {
        WheelDriver::new(WheelAxes::Both).with_prevent_default(self.config.get().prevent_wheel_default)
    }

    fn guard_scope(&self) -> Vec<Element> {
        self.pad.element().into_iter().collect()
    }

    fn wheel_value(&self, tick: WheelTick, current: Point) -> Point {
        let range = self.core.space();
        Point::new(
            current.x + f64::from(tick.x) * range.x.step,
            current.y + f64::from(tick.y) * range.y.step,
        )
    }

    fn key_value(&self, action: KeyAction, current: Point) -> Point {
        let range = self.core.space();
        match action {
            KeyAction::Step {
                axis: KeyAxis::Horizontal,
                steps,
            } => Point::new(current.x + f64::from(steps) * range.x.step, current.y),
            KeyAction::Step {
                axis: KeyAxis::Vertical,
                steps,
            } => Point::new(current.x, current.y + f64::from(steps) * range.y.step),
            // Home is the top-left corner, End the bottom-right.
            KeyAction::Home => Point::new(range.x.min, range.y.max),
            KeyAction::End => Point::new(range.x.max, range.y.min),
        }
    }
}

/// Root of an XY pad. The value is a [`Point`] in range units, `y` up.
pub struct XyPad {
    context: Rc<XyPadContext>,
}

impl XyPad {
    pub fn new(config: XyPadConfig, document: &Document) -> Result<Self, ConfigError> {
        config.validate()?;
        let core = ControlCore::new(XyPadContext::NAME, config.range(), None, config.default_value);
        core.set_disabled(config.disabled);
        Ok(Self {
            context: Rc::new(XyPadContext {
                core,
                config: Cell::new(config),
                pad: DragPart::new(DragOptions {
                    capture_pointer: true,
                    release_on_outside: true,
                }),
                document: document.clone(),
            }),
        })
    }

    pub fn handle(&self) -> XyPadHandle {
        XyPadHandle(ContextHandle::new(&self.context))
    }

    pub fn config(&self) -> XyPadConfig {
        self.context.config.get()
    }

    pub fn reconfigure(&self, config: XyPadConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.context.core.set_space(config.range());
        self.context.core.set_disabled(config.disabled);
        self.context.config.set(config);
        Ok(())
    }

    pub fn value(&self) -> Point {
        self.context.core.value()
    }

    pub fn set_value(&self, value: Option<Point>) {
        self.context.core.set_controlled(value);
    }

    pub fn on_value_change(&self, callback: impl FnMut(Point) + 'static) {
        self.context.core.on_change().set(callback);
    }

    pub fn on_value_commit(&self, callback: impl FnMut(Point) + 'static) {
        self.context.core.on_commit().set(callback);
    }

    pub fn is_disabled(&self) -> bool {
        self.context.core.is_disabled()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.context.core.set_disabled(disabled);
    }

    pub fn is_dragging(&self) -> bool {
        self.context.pad.is_dragging()
    }

    /// Per-axis normalized position, `y` measured from the bottom.
    pub fn percentage(&self) -> Point {
        self.context.core.space().percentage(self.value())
    }

    /// Thumb placement in percent of the pad, measured from the top-left.
    pub fn thumb_position(&self) -> Point {
        let pct = self.percentage();
        Point::new(pct.x * 100.0, (1.0 - pct.y) * 100.0)
    }
}

/// Non-owning reference to an [`XyPad`] for building its parts.
#[derive(Clone)]
pub struct XyPadHandle(ContextHandle<XyPadContext>);

/// The pad surface: drag, two-axis wheel, keys and focus.
pub struct XyPadSlider {
    handle: XyPadHandle,
}

impl XyPadSlider {
    pub fn new(handle: &XyPadHandle) -> Self {
        Self { handle: handle.clone() }
    }

    fn context(&self) -> Rc<XyPadContext> {
        self.handle.0.get()
    }

    pub fn attach(&self, element: Element) {
        self.context().pad.attach(element);
    }

    pub fn detach(&self) {
        detach_part(self.context().as_ref(), XyPadContext::pad);
    }

    pub fn tab_index(&self) -> i32 {
        tab_index(self.context().core.is_disabled())
    }

    pub fn handle_pointer_event(&self, event: &PointerEvent) -> EventResponse {
        handle_pointer(&self.context(), XyPadContext::pad, event)
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
    use kurbo::Vec2;
    use std::cell::RefCell;

    const P: PointerId = PointerId::MOUSE;

    fn pad() -> (XyPad, XyPadSlider) {
        let pad = XyPad::new(
            XyPadConfig {
                default_value: Point::new(50.0, 50.0),
                ..XyPadConfig::default()
            },
            &Document::new(),
        )
        .unwrap();
        let slider = XyPadSlider::new(&pad.handle());
        slider.attach(Element::with_bounds(NodeId(1), Rect::new(0.0, 0.0, 200.0, 200.0)));
        (pad, slider)
    }

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    #[test]
    fn test_press_jumps_with_y_up() {
        let (pad, slider) = pad();
        slider.handle_pointer_event(&PointerEvent::Down {
            pointer: P,
            position: Point::new(50.0, 50.0),
            target: NodeId(1),
        });
        assert_point(pad.value(), 25.0, 75.0);
        slider.handle_pointer_event(&PointerEvent::Move {
            pointer: P,
            position: Point::new(70.0, 30.0),
        });
        assert_point(pad.value(), 35.0, 85.0);
    }

    #[test]
    fn test_arrow_keys_move_their_axis() {
        let (pad, slider) = pad();
        let commits = Rc::new(RefCell::new(Vec::new()));
        let c = commits.clone();
        pad.on_value_commit(move |v| c.borrow_mut().push(v));
        let press = |name: &str| slider.handle_key_event(&KeyEvent::Pressed(name.into()));
        press("ArrowRight");
        assert_point(pad.value(), 51.0, 50.0);
        press("ArrowDown");
        assert_point(pad.value(), 51.0, 49.0);
        press("PageUp");
        assert_point(pad.value(), 51.0, 59.0);
        press("Home");
        assert_point(pad.value(), 0.0, 100.0);
        press("End");
        assert_point(pad.value(), 100.0, 0.0);
        assert_eq!(commits.borrow().len(), 5);
    }

    #[test]
    fn test_wheel_moves_both_axes() {
        let (pad, slider) = pad();
        slider.handle_pointer_event(&PointerEvent::Scroll {
            position: Point::ZERO,
            delta: Vec2::new(3.0, -3.0),
        });
        assert_point(pad.value(), 49.0, 51.0);
        slider.handle_pointer_event(&PointerEvent::Scroll {
            position: Point::ZERO,
            delta: Vec2::new(0.05, 2.0),
        });
        assert_point(pad.value(), 49.0, 50.0);
    }

    #[test]
    fn test_thumb_position() {
        let (pad, _slider) = pad();
        pad.set_value(Some(Point::new(20.0, 80.0)));
        assert_point(pad.thumb_position(), 20.0, 20.0);
        pad.set_value(Some(Point::new(f64::NAN, 500.0)));
        assert_point(pad.value(), 0.0, 100.0);
    }

    #[test]
    #[should_panic(expected = "XYPad parts must be used within XYPad root")]
    fn test_part_outliving_root_panics() {
        let (pad, slider) = pad();
        drop(pad);
        slider.handle_key_event(&KeyEvent::Pressed("Home".into()));
    }
}
