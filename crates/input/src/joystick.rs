use glam::Vec2;

/// Magnitude past which the knob is drawn highlighted.
pub const HIGHLIGHT_MAGNITUDE: f32 = 0.7;
/// Drawn radius of the joystick base, in pixels.
pub const BASE_RADIUS: f32 = 60.0;
/// Drawn radius of the knob, in pixels.
pub const KNOB_RADIUS: f32 = 22.0;

/// What the on-screen joystick overlay should show. Pure data derived from
/// the tracker; the host draws it however it likes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickView {
    /// Base centre: where the drag started.
    pub origin: Vec2,
    /// Knob offset from the origin, clamped to the max radius.
    pub knob_offset: Vec2,
    pub magnitude: f32,
    pub highlighted: bool,
}

impl JoystickView {
    pub fn new(origin: Vec2, offset: Vec2, max_radius: f32) -> Self {
        let distance = offset.length();
        let clamped = distance.min(max_radius);
        let knob_offset = offset / distance.max(1e-3) * clamped;
        let magnitude = clamped / max_radius;
        Self {
            origin,
            knob_offset,
            magnitude,
            highlighted: magnitude > HIGHLIGHT_MAGNITUDE,
        }
    }

    /// Knob centre in screen pixels.
    pub fn knob_center(&self) -> Vec2 {
        self.origin + self.knob_offset
    }

    /// Knob centre for a base drawn with `base_radius` pixels: the clamped
    /// offset rescaled so full deflection touches the rim.
    pub fn knob_center_within(&self, base_radius: f32) -> Vec2 {
        let offset = self.knob_center() - self.origin;
        let len = offset.length();
        if len <= 1e-3 {
            return self.origin;
        }
        self.origin + offset * (self.magnitude * base_radius / len)
    }
}
