/// Mouse button that started a pointer drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Drives the virtual joystick.
    Primary,
    /// Drives camera look.
    Secondary,
}

/// A raw event from the host UI layer, in screen pixels.
///
/// Hosts (desktop window, browser canvas, test scripts) translate their own
/// events into these; the tracker never sees platform types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown { x: f32, y: f32, button: PointerButton },
    MouseMove { x: f32, y: f32 },
    MouseUp { button: PointerButton },
    TouchStart { id: u64, x: f32, y: f32 },
    TouchMove { id: u64, x: f32, y: f32 },
    TouchEnd { id: u64 },
    /// Viewport size changed; used for the touch look zone.
    Resize { width: f32, height: f32 },
}

/// Higher-level gesture recognised from a complete press/release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Press and release without moving past the drag threshold.
    Tap,
}
