use glam::{Mat4, Vec3};
use townwalk_common::RenderView;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 500.0;

/// Left-handed, Y-up view-projection for a camera pose. `aspect` is
/// width / height.
pub fn view_projection(view: &RenderView, aspect: f32) -> Mat4 {
    // A target on top of the eye would give a degenerate basis.
    let target = if (view.target - view.eye).length_squared() < 1e-12 {
        view.eye + Vec3::Z
    } else {
        view.target
    };
    let v = Mat4::look_at_lh(view.eye, target, Vec3::Y);
    let p = Mat4::perspective_lh(view.fov, aspect.max(1e-3), NEAR_PLANE, FAR_PLANE);
    p * v
}
