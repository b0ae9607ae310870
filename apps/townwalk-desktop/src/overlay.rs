use egui::{Color32, Context as EguiContext, Pos2, Stroke};
use townwalk_control::ViewMode;
use townwalk_input::JoystickView;
use townwalk_input::joystick::{BASE_RADIUS, KNOB_RADIUS};

/// Draw the view toggle and the joystick. Returns true when the toggle was
/// clicked this frame.
pub fn draw(ctx: &EguiContext, mode: ViewMode, joystick: Option<JoystickView>) -> bool {
    let label = match mode {
        ViewMode::ThirdPerson => "First Person",
        ViewMode::FirstPerson => "Third Person",
    };

    let clicked = egui::Area::new(egui::Id::new("view_toggle"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .show(ctx, |ui| {
            ui.add(egui::Button::new(egui::RichText::new(label).size(18.0)).min_size(egui::vec2(140.0, 40.0)))
                .clicked()
        })
        .inner;

    if let Some(j) = joystick {
        // Tracker positions are physical pixels; egui paints in points.
        let ppp = ctx.pixels_per_point();
        let to_pos = |v: glam::Vec2| Pos2::new(v.x / ppp, v.y / ppp);
        let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Foreground, egui::Id::new("joystick")));
        let base = to_pos(j.origin);
        painter.circle(
            base,
            BASE_RADIUS / ppp,
            Color32::from_rgba_unmultiplied(255, 255, 255, 40),
            Stroke::new(2.0, Color32::from_rgba_unmultiplied(255, 255, 255, 120)),
        );
        let knob_color = if j.highlighted {
            Color32::from_rgba_unmultiplied(255, 200, 80, 200)
        } else {
            Color32::from_rgba_unmultiplied(255, 255, 255, 160)
        };
        painter.circle_filled(to_pos(j.knob_center_within(BASE_RADIUS)), KNOB_RADIUS / ppp, knob_color);
    }

    clicked
}
