//! Linear fader: a track that jumps on press and a draggable thumb.

use kurbo::Rect;
use std::cell::Cell;
use std::rc::Rc;

use super::{ContextHandle, ControlHost, DragPart, detach_part, handle_key, handle_pointer, handle_wheel};
use crate::config::{ConfigError, FaderConfig};
use crate::control::ControlCore;
use crate::document::Document;
use crate::drivers::{DragOptions, KeyAction, WheelAxes, WheelDriver, WheelTick, tab_index};
use crate::element::Element;
use crate::geometry::LinearMapper;
use crate::input::{EventResponse, KeyEvent, PointerEvent};
use crate::range::AxisRange;

pub(crate) struct FaderContext {
    core: ControlCore<AxisRange>,
    config: Cell<FaderConfig>,
    track: DragPart,
    thumb: DragPart,
    document: Document,
}

impl FaderContext {
    fn track(&self) -> &DragPart {
        &self.track
    }

    fn thumb(&self) -> &DragPart {
        &self.thumb
    }
}

impl ControlHost for FaderContext {
    type Space = AxisRange;
    type Mapper = LinearMapper;

    const NAME: &'static str = "Fader";

    fn core(&self) -> &ControlCore<AxisRange> {
        &self.core
    }

    fn mapper(&self) -> LinearMapper {
        LinearMapper::new(self.core.space(), self.config.get().orientation)
    }

    // Both track and thumb drags map against the track.
    fn surface(&self) -> Option<Rect> {
        self.track.element().and_then(|element| element.bounds())
    }

    fn document(&self) -> &Document {
        &self.document
    }

    fn wheel(&self) -> WheelDriver {
        WheelDriver::new(WheelAxes::Vertical).with_prevent_default(self.config.get().prevent_wheel_default)
    }

    fn guard_scope(&self) -> Vec<Element> {
        self.thumb.element().into_iter().chain(self.track.element()).collect()
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

/// Root of a linear fader.
pub struct Fader {
    context: Rc<FaderContext>,
}

impl Fader {
    pub fn new(config: FaderConfig, document: &Document) -> Result<Self, ConfigError> {
        config.validate()?;
        let core = ControlCore::new(FaderContext::NAME, config.range()?, None, config.initial_value());
        core.set_disabled(config.disabled);
        log::debug!("Fader created over {}..{}", config.min, config.max);
        Ok(Self {
            context: Rc::new(FaderContext {
                core,
                config: Cell::new(config),
                track: DragPart::new(DragOptions::default()),
                thumb: DragPart::new(DragOptions {
                    capture_pointer: true,
                    release_on_outside: true,
                }),
                document: document.clone(),
            }),
        })
    }

    pub fn handle(&self) -> FaderHandle {
        FaderHandle(ContextHandle::new(&self.context))
    }

    pub fn config(&self) -> FaderConfig {
        self.context.config.get()
    }

    pub fn reconfigure(&self, config: FaderConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.context.core.set_space(config.range()?);
        self.context.core.set_disabled(config.disabled);
        self.context.config.set(config);
        Ok(())
    }

    pub fn value(&self) -> f64 {
        self.context.core.value()
    }

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
        self.context.track.is_dragging() || self.context.thumb.is_dragging()
    }

    /// Filled fraction of the range, for sizing the range bar.
    pub fn percentage(&self) -> f64 {
        self.context.core.space().percentage(self.value())
    }
}

/// Non-owning reference to a [`Fader`] for building its parts.
#[derive(Clone)]
pub struct FaderHandle(ContextHandle<FaderContext>);

/// Outer wrapper of the fader. Scrolling over it steps the value.
pub struct FaderSlider {
    handle: FaderHandle,
}

impl FaderSlider {
    pub fn new(handle: &FaderHandle) -> Self {
        Self { handle: handle.clone() }
    }

    pub fn handle_pointer_event(&self, event: &PointerEvent) -> EventResponse {
        let context = self.handle.0.get();
        match *event {
            PointerEvent::Scroll { delta, .. } => handle_wheel(context.as_ref(), delta),
            _ => EventResponse::IGNORED,
        }
    }
}

/// The measured track. Pressing anywhere on it jumps the value there.
pub struct FaderTrack {
    handle: FaderHandle,
}

impl FaderTrack {
    pub fn new(handle: &FaderHandle) -> Self {
        Self { handle: handle.clone() }
    }

    pub fn attach(&self, element: Element) {
        self.handle.0.get().track.attach(element);
    }

    pub fn detach(&self) {
        detach_part(self.handle.0.get().as_ref(), FaderContext::track);
    }

    pub fn handle_pointer_event(&self, event: &PointerEvent) -> EventResponse {
        handle_pointer(&self.handle.0.get(), FaderContext::track, event)
    }
}

/// The focusable thumb. Drags, takes keys, and lets go on outside presses.
pub struct FaderThumb {
    handle: FaderHandle,
}

impl FaderThumb {
    pub fn new(handle: &FaderHandle) -> Self {
        Self { handle: handle.clone() }
    }

    pub fn attach(&self, element: Element) {
        self.handle.0.get().thumb.attach(element);
    }

    pub fn detach(&self) {
        detach_part(self.handle.0.get().as_ref(), FaderContext::thumb);
    }

    pub fn tab_index(&self) -> i32 {
        tab_index(self.handle.0.get().core.is_disabled())
    }

    pub fn handle_pointer_event(&self, event: &PointerEvent) -> EventResponse {
        handle_pointer(&self.handle.0.get(), FaderContext::thumb, event)
    }

    pub fn handle_key_event(&self, event: &KeyEvent) -> EventResponse {
        handle_key(self.handle.0.get().as_ref(), event)
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
    const TRACK: NodeId = NodeId(10);
    const THUMB: NodeId = NodeId(11);

    struct Rig {
        fader: Fader,
        slider: FaderSlider,
        track: FaderTrack,
        thumb: FaderThumb,
        document: Document,
        commits: Rc<RefCell<Vec<f64>>>,
    }

    fn rig() -> Rig {
        let document = Document::new();
        let fader = Fader::new(
            FaderConfig {
                min: 0.0,
                max: 100.0,
                ..FaderConfig::default()
            },
            &document,
        )
        .unwrap();
        let handle = fader.handle();
        let track = FaderTrack::new(&handle);
        track.attach(Element::with_bounds(TRACK, Rect::new(0.0, 0.0, 20.0, 200.0)));
        let thumb = FaderThumb::new(&handle);
        thumb.attach(Element::with_bounds(THUMB, Rect::new(0.0, 90.0, 20.0, 110.0)));
        let commits = Rc::new(RefCell::new(Vec::new()));
        let c = commits.clone();
        fader.on_value_commit(move |v| c.borrow_mut().push(v));
        Rig {
            fader,
            slider: FaderSlider::new(&handle),
            track,
            thumb,
            document,
            commits,
        }
    }

    fn down(y: f64, target: NodeId) -> PointerEvent {
        PointerEvent::Down {
            pointer: P,
            position: Point::new(10.0, y),
            target,
        }
    }

    fn moved(y: f64) -> PointerEvent {
        PointerEvent::Move {
            pointer: P,
            position: Point::new(10.0, y),
        }
    }

    fn up(y: f64) -> PointerEvent {
        PointerEvent::Up {
            pointer: P,
            position: Point::new(10.0, y),
        }
    }

    #[test]
    fn test_default_value_is_midpoint() {
        let fader = Fader::new(FaderConfig::default(), &Document::new()).unwrap();
        assert!((fader.value() + 27.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_track_press_jumps_and_commits_on_release() {
        let rig = rig();
        let response = rig.track.handle_pointer_event(&down(150.0, TRACK));
        assert!(response.prevent_default && response.request_focus);
        assert!((rig.fader.value() - 25.0).abs() < f64::EPSILON);
        assert!(rig.commits.borrow().is_empty());
        rig.track.handle_pointer_event(&moved(130.0));
        assert!((rig.fader.value() - 35.0).abs() < f64::EPSILON);
        rig.track.handle_pointer_event(&up(130.0));
        assert_eq!(*rig.commits.borrow(), vec![35.0]);
        assert!(!rig.fader.is_dragging());
    }

    #[test]
    fn test_track_has_no_outside_guard() {
        let rig = rig();
        rig.track.handle_pointer_event(&down(100.0, TRACK));
        assert_eq!(rig.document.listener_count(), 0);
    }

    #[test]
    fn test_thumb_guard_treats_track_as_inside() {
        let rig = rig();
        rig.thumb.handle_pointer_event(&down(100.0, THUMB));
        assert_eq!(rig.document.listener_count(), 1);
        rig.document.dispatch_pointer_down(TRACK);
        assert!(rig.fader.is_dragging());
        rig.document.dispatch_pointer_down(NodeId(99));
        assert!(!rig.fader.is_dragging());
        assert_eq!(*rig.commits.borrow(), vec![50.0]);
        assert_eq!(rig.document.listener_count(), 0);
    }

    #[test]
    fn test_thumb_keys_commit() {
        let rig = rig();
        let press = |name: &str| rig.thumb.handle_key_event(&KeyEvent::Pressed(name.into()));
        assert!(press("ArrowUp").prevent_default);
        assert!(press("PageDown").prevent_default);
        assert!(!press("a").prevent_default);
        assert!(press("End").prevent_default);
        assert_eq!(*rig.commits.borrow(), vec![51.0, 41.0, 100.0]);
    }

    #[test]
    fn test_slider_wheel_commits_step() {
        let rig = rig();
        rig.slider.handle_pointer_event(&PointerEvent::Scroll {
            position: Point::ZERO,
            delta: Vec2::new(0.0, 2.0),
        });
        let response = rig.slider.handle_pointer_event(&PointerEvent::Scroll {
            position: Point::ZERO,
            delta: Vec2::new(0.0, 0.05),
        });
        assert!(response.prevent_default);
        assert_eq!(*rig.commits.borrow(), vec![49.0]);
        assert_eq!(rig.slider.handle_pointer_event(&down(0.0, TRACK)), EventResponse::IGNORED);
    }

    #[test]
    fn test_horizontal_orientation() {
        let rig = rig();
        rig.fader
            .reconfigure(FaderConfig {
                orientation: crate::geometry::Orientation::Horizontal,
                ..rig.fader.config()
            })
            .unwrap();
        rig.track.handle_pointer_event(&PointerEvent::Down {
            pointer: P,
            position: Point::new(5.0, 0.0),
            target: TRACK,
        });
        assert!((rig.fader.value() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unattached_track_keeps_value() {
        let rig = rig();
        rig.track.detach();
        rig.thumb.handle_pointer_event(&down(0.0, THUMB));
        assert!((rig.fader.value() - 50.0).abs() < f64::EPSILON);
    }
}
