use crate::config::{InputConfig, InputConfigError};
use crate::event::{Gesture, InputEvent, PointerButton};
use crate::joystick::JoystickView;
use glam::Vec2;

/// Below this drag distance the previous direction is kept.
const DIRECTION_EPSILON: f32 = 1e-3;

/// Virtual joystick state. Mutated only by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub dir_x: f32,
    pub dir_y: f32,
    /// Clamped drag distance over the max radius, in `[0, 1]`.
    pub magnitude: f32,
    pub active: bool,
}

/// Raw pixel deltas collected for camera look since the last read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraDelta {
    pub dx: f32,
    pub dy: f32,
}

impl CameraDelta {
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Joystick,
    Look,
}

/// Converts pointer and touch events into a [`DragState`], a drain-once
/// [`CameraDelta`], and tap gestures.
pub struct InputTracker {
    config: InputConfig,
    viewport: Vec2,
    anchor: Vec2,
    offset: Vec2,
    drag: DragState,
    was_drag: bool,
    joystick_source: Option<Source>,
    look_source: Option<Source>,
    look_last: Vec2,
    camera_delta: CameraDelta,
    /// The one touch being followed, and what it drives.
    touch: Option<(u64, Role)>,
    on_tap: Option<Box<dyn FnMut()>>,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::with_config(InputConfig::default())
    }
}

impl InputTracker {
    /// Create a tracker after validating `config`.
    pub fn new(config: InputConfig) -> Result<Self, InputConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            viewport: Vec2::ZERO,
            anchor: Vec2::ZERO,
            offset: Vec2::ZERO,
            drag: DragState::default(),
            was_drag: false,
            joystick_source: None,
            look_source: None,
            look_last: Vec2::ZERO,
            camera_delta: CameraDelta::default(),
            touch: None,
            on_tap: None,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Read-only view of the joystick.
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Install the tap callback, replacing any previous one.
    pub fn set_on_tap(&mut self, callback: impl FnMut() + 'static) {
        self.on_tap = Some(Box::new(callback));
    }

    pub fn clear_on_tap(&mut self) {
        self.on_tap = None;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
    }

    /// Route one host event. Returns a gesture when a press/release completes one.
    pub fn handle(&mut self, event: InputEvent) -> Option<Gesture> {
        match event {
            InputEvent::MouseDown { x, y, button } => {
                match button {
                    PointerButton::Primary => {
                        self.joystick_source = Some(Source::Mouse);
                        self.start_drag(x, y);
                    }
                    PointerButton::Secondary => self.start_look(Source::Mouse, x, y),
                }
                None
            }
            InputEvent::MouseMove { x, y } => {
                if self.joystick_source == Some(Source::Mouse) {
                    self.move_drag(x, y);
                }
                if self.look_source == Some(Source::Mouse) {
                    self.move_look(x, y);
                }
                None
            }
            InputEvent::MouseUp { button } => match button {
                PointerButton::Primary if self.joystick_source == Some(Source::Mouse) => {
                    self.joystick_source = None;
                    self.end_drag().then_some(Gesture::Tap)
                }
                PointerButton::Secondary if self.look_source == Some(Source::Mouse) => {
                    self.look_source = None;
                    None
                }
                _ => None,
            },
            InputEvent::TouchStart { id, x, y } => {
                if self.touch.is_some() {
                    return None;
                }
                let role = if self.in_look_zone(x) {
                    self.start_look(Source::Touch(id), x, y);
                    Role::Look
                } else {
                    self.joystick_source = Some(Source::Touch(id));
                    self.start_drag(x, y);
                    Role::Joystick
                };
                self.touch = Some((id, role));
                None
            }
            InputEvent::TouchMove { id, x, y } => {
                match self.touch {
                    Some((t, Role::Joystick)) if t == id => self.move_drag(x, y),
                    Some((t, Role::Look)) if t == id => self.move_look(x, y),
                    _ => {}
                }
                None
            }
            InputEvent::TouchEnd { id } => match self.touch {
                Some((t, role)) if t == id => {
                    self.touch = None;
                    match role {
                        Role::Joystick => {
                            self.joystick_source = None;
                            self.end_drag().then_some(Gesture::Tap)
                        }
                        Role::Look => {
                            self.look_source = None;
                            None
                        }
                    }
                }
                _ => None,
            },
            InputEvent::Resize { width, height } => {
                self.set_viewport(width, height);
                None
            }
        }
    }

    /// Anchor a joystick drag at `(x, y)` and activate it.
    pub fn start_drag(&mut self, x: f32, y: f32) {
        self.anchor = Vec2::new(x, y);
        self.offset = Vec2::ZERO;
        self.drag = DragState {
            active: true,
            ..DragState::default()
        };
        self.was_drag = false;
    }

    /// Update the joystick from the pointer at `(x, y)`. Ignored while inactive.
    pub fn move_drag(&mut self, x: f32, y: f32) {
        if !self.drag.active {
            return;
        }
        let delta = Vec2::new(x, y) - self.anchor;
        let distance = delta.length();
        if distance > self.config.tap_threshold {
            self.was_drag = true;
        }
        self.offset = delta;
        self.drag.magnitude = distance.min(self.config.max_radius) / self.config.max_radius;
        if distance > DIRECTION_EPSILON {
            self.drag.dir_x = delta.x / distance;
            self.drag.dir_y = delta.y / distance;
        }
    }

    /// Release the joystick. Fires the tap callback and returns `true` when
    /// the drag never went past the threshold.
    pub fn end_drag(&mut self) -> bool {
        let tapped = self.drag.active && !self.was_drag;
        if tapped {
            tracing::debug!("tap");
            if let Some(cb) = self.on_tap.as_mut() {
                cb();
            }
        }
        self.drag = DragState::default();
        self.offset = Vec2::ZERO;
        tapped
    }

    fn start_look(&mut self, source: Source, x: f32, y: f32) {
        self.look_source = Some(source);
        self.look_last = Vec2::new(x, y);
    }

    fn move_look(&mut self, x: f32, y: f32) {
        let p = Vec2::new(x, y);
        let d = p - self.look_last;
        self.look_last = p;
        self.add_camera_delta(d.x, d.y);
    }

    /// Accumulate a look delta. Deltas add up until the next read.
    pub fn add_camera_delta(&mut self, dx: f32, dy: f32) {
        self.camera_delta.dx += dx;
        self.camera_delta.dy += dy;
    }

    /// Take the look delta gathered since the previous call and reset it.
    pub fn consume_camera_delta(&mut self) -> CameraDelta {
        std::mem::take(&mut self.camera_delta)
    }

    /// Overlay model for the on-screen joystick, present while dragging.
    pub fn joystick_view(&self) -> Option<JoystickView> {
        self.drag
            .active
            .then(|| JoystickView::new(self.anchor, self.offset, self.config.max_radius))
    }

    fn in_look_zone(&self, x: f32) -> bool {
        match self.config.look_zone {
            Some(zone) if self.viewport.x > 0.0 => x >= self.viewport.x * (1.0 - zone),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn tracker() -> InputTracker {
        InputTracker::new(InputConfig::default()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = InputConfig {
            max_radius: -1.0,
            ..Default::default()
        };
        assert!(InputTracker::new(cfg).is_err());
    }

    #[test]
    fn drag_scenario_half_magnitude() {
        let mut t = tracker();
        t.start_drag(100.0, 100.0);
        t.move_drag(140.0, 100.0);
        let d = t.drag();
        assert!(d.active);
        assert!((d.magnitude - 0.5).abs() < 1e-6);
        assert!((d.dir_x - 1.0).abs() < 1e-6);
        assert!(d.dir_y.abs() < 1e-6);
    }

    #[test]
    fn magnitude_monotonic_and_saturating() {
        let mut t = tracker();
        t.start_drag(0.0, 0.0);
        let mut prev = 0.0;
        for i in 0..=200 {
            t.move_drag(i as f32, 0.0);
            let m = t.drag().magnitude;
            assert!(m >= prev);
            assert!((0.0..=1.0).contains(&m));
            if i >= 80 {
                assert_eq!(m, 1.0);
            }
            prev = m;
        }
    }

    #[test]
    fn direction_is_unit_and_survives_jitter() {
        let mut t = tracker();
        t.start_drag(10.0, 10.0);
        t.move_drag(13.0, 14.0);
        let d = *t.drag();
        assert!(((d.dir_x * d.dir_x + d.dir_y * d.dir_y).sqrt() - 1.0).abs() < 1e-5);
        assert!((d.dir_x - 0.6).abs() < 1e-5);

        // Back onto the anchor: direction unchanged, magnitude zero.
        t.move_drag(10.0, 10.0);
        assert_eq!(t.drag().dir_x, d.dir_x);
        assert_eq!(t.drag().dir_y, d.dir_y);
        assert_eq!(t.drag().magnitude, 0.0);
    }

    #[test]
    fn short_press_is_a_tap() {
        let mut t = tracker();
        let taps = Rc::new(Cell::new(0));
        let seen = taps.clone();
        t.set_on_tap(move || seen.set(seen.get() + 1));

        t.start_drag(50.0, 50.0);
        t.move_drag(53.0, 50.0);
        assert!(t.end_drag());
        assert_eq!(taps.get(), 1);
        assert!(!t.drag().active);
        assert_eq!(*t.drag(), DragState::default());
    }

    #[test]
    fn long_drag_is_not_a_tap() {
        let mut t = tracker();
        let taps = Rc::new(Cell::new(0));
        let seen = taps.clone();
        t.set_on_tap(move || seen.set(seen.get() + 1));

        t.start_drag(50.0, 50.0);
        t.move_drag(60.0, 50.0);
        // Returning near the anchor does not turn it back into a tap.
        t.move_drag(51.0, 50.0);
        assert!(!t.end_drag());
        assert_eq!(taps.get(), 0);
    }

    #[test]
    fn moves_while_inactive_are_ignored() {
        let mut t = tracker();
        t.move_drag(500.0, 500.0);
        assert_eq!(*t.drag(), DragState::default());
        assert_eq!(t.handle(InputEvent::MouseMove { x: 9.0, y: 9.0 }), None);
        assert!(!t.drag().active);
    }

    #[test]
    fn camera_delta_drains_once() {
        let mut t = tracker();
        t.add_camera_delta(3.0, -1.0);
        t.add_camera_delta(2.0, 4.0);
        let d = t.consume_camera_delta();
        assert_eq!(d, CameraDelta { dx: 5.0, dy: 3.0 });
        assert!(t.consume_camera_delta().is_zero());
    }

    #[test]
    fn mouse_routing() {
        let mut t = tracker();
        t.handle(InputEvent::MouseDown {
            x: 0.0,
            y: 0.0,
            button: PointerButton::Primary,
        });
        t.handle(InputEvent::MouseMove { x: 0.0, y: -40.0 });
        assert!((t.drag().magnitude - 0.5).abs() < 1e-6);
        assert!((t.drag().dir_y + 1.0).abs() < 1e-6);
        assert_eq!(
            t.handle(InputEvent::MouseUp {
                button: PointerButton::Primary
            }),
            None
        );

        t.handle(InputEvent::MouseDown {
            x: 10.0,
            y: 10.0,
            button: PointerButton::Secondary,
        });
        t.handle(InputEvent::MouseMove { x: 14.0, y: 7.0 });
        t.handle(InputEvent::MouseMove { x: 15.0, y: 7.0 });
        assert!(!t.drag().active);
        assert_eq!(t.consume_camera_delta(), CameraDelta { dx: 5.0, dy: -3.0 });
    }

    #[test]
    fn mouse_click_returns_tap() {
        let mut t = tracker();
        t.handle(InputEvent::MouseDown {
            x: 5.0,
            y: 5.0,
            button: PointerButton::Primary,
        });
        let g = t.handle(InputEvent::MouseUp {
            button: PointerButton::Primary,
        });
        assert_eq!(g, Some(Gesture::Tap));
    }

    #[test]
    fn only_first_touch_is_tracked() {
        let mut t = tracker();
        t.handle(InputEvent::TouchStart { id: 1, x: 100.0, y: 100.0 });
        t.handle(InputEvent::TouchStart { id: 2, x: 300.0, y: 300.0 });
        t.handle(InputEvent::TouchMove { id: 2, x: 900.0, y: 900.0 });
        assert_eq!(t.drag().magnitude, 0.0);

        t.handle(InputEvent::TouchMove { id: 1, x: 120.0, y: 100.0 });
        assert!((t.drag().magnitude - 0.25).abs() < 1e-6);

        // Ending the ignored touch changes nothing.
        t.handle(InputEvent::TouchEnd { id: 2 });
        assert!(t.drag().active);
        t.handle(InputEvent::TouchEnd { id: 1 });
        assert!(!t.drag().active);
    }

    #[test]
    fn touch_in_look_zone_drives_camera() {
        let mut t = tracker();
        t.handle(InputEvent::Resize {
            width: 800.0,
            height: 600.0,
        });
        t.handle(InputEvent::TouchStart { id: 7, x: 700.0, y: 300.0 });
        t.handle(InputEvent::TouchMove { id: 7, x: 690.0, y: 320.0 });
        assert!(!t.drag().active);
        assert_eq!(t.consume_camera_delta(), CameraDelta { dx: -10.0, dy: 20.0 });
        assert_eq!(t.handle(InputEvent::TouchEnd { id: 7 }), None);

        t.handle(InputEvent::TouchStart { id: 8, x: 100.0, y: 300.0 });
        assert!(t.drag().active);
    }

    #[test]
    fn joystick_view_only_while_active() {
        let mut t = tracker();
        assert!(t.joystick_view().is_none());
        t.start_drag(200.0, 200.0);
        t.move_drag(200.0, 300.0);
        let v = t.joystick_view().unwrap();
        assert_eq!(v.origin, Vec2::new(200.0, 200.0));
        assert!((v.knob_offset - Vec2::new(0.0, 80.0)).length() < 1e-4);
        assert!(v.highlighted);
    }
}
