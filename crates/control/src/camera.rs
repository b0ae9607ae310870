use crate::config::CameraConfig;
use glam::Vec3;
use townwalk_common::RenderView;

/// Pitch limit of the head camera, in radians.
pub const PITCH_LIMIT: f32 = 1.2;

/// Spherical orbit camera around a target point.
///
/// `alpha` is the angle around +Y measured from +X, `beta` the angle down
/// from +Y. Position = target + radius·(cos α sin β, cos β, sin α sin β).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    pub fov: f32,
    pub lower_beta: f32,
    pub upper_beta: f32,
    pub lower_radius: f32,
    pub upper_radius: f32,
    pub sensitivity: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            alpha: config.initial_alpha,
            beta: config.initial_beta.max(config.lower_beta).min(config.upper_beta),
            radius: config.initial_radius.max(config.lower_radius).min(config.upper_radius),
            target: Vec3::new(0.0, config.target_height, 0.0),
            fov: config.third_person_fov,
            lower_beta: config.lower_beta,
            upper_beta: config.upper_beta,
            lower_radius: config.lower_radius,
            upper_radius: config.upper_radius,
            sensitivity: config.orbit_sensitivity,
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(ca * sb, cb, sa * sb)
    }

    /// Apply a look drag in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.alpha -= dx * self.sensitivity;
        self.beta = (self.beta - dy * self.sensitivity).max(self.lower_beta).min(self.upper_beta);
    }

    /// Move toward (negative) or away from (positive) the target.
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius + delta).max(self.lower_radius).min(self.upper_radius);
    }

    pub fn view(&self) -> RenderView {
        RenderView {
            eye: self.position(),
            target: self.target,
            fov: self.fov,
        }
    }
}

/// First-person camera pinned at the player's eye height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub position: Vec3,
    pub fov: f32,
    pub head_height: f32,
    pub yaw_sensitivity: f32,
    pub pitch_sensitivity: f32,
}

impl HeadCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            position: Vec3::new(0.0, config.head_height, 0.0),
            fov: config.first_person_fov,
            head_height: config.head_height,
            yaw_sensitivity: config.yaw_sensitivity,
            pitch_sensitivity: config.pitch_sensitivity,
        }
    }

    /// Unit look direction. Yaw 0 looks down +Z; positive yaw turns toward +X.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp)
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.yaw_sensitivity;
        self.pitch = (self.pitch - dy * self.pitch_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Pin the eye above the player's feet.
    pub fn follow(&mut self, feet: Vec3) {
        self.position = feet + Vec3::new(0.0, self.head_height, 0.0);
    }

    pub fn view(&self) -> RenderView {
        RenderView {
            eye: self.position,
            target: self.position + self.forward(),
            fov: self.fov,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn orbit_matches_spherical_formula() {
        let mut cam = OrbitCamera::new(&CameraConfig::default());
        cam.alpha = -PI / 2.0;
        cam.beta = PI / 3.5;
        cam.radius = 18.0;
        cam.target = Vec3::ZERO;
        let (a, b) = (-PI / 2.0, PI / 3.5);
        let expected = 18.0 * Vec3::new(a.cos() * b.sin(), b.cos(), a.sin() * b.sin());
        assert!(close(cam.position(), expected));
        // Behind the player: negative z, above the ground.
        assert!(expected.z < 0.0 && expected.y > 0.0);
    }

    #[test]
    fn inverted_limits_never_panic() {
        let cfg = CameraConfig {
            lower_beta: 1.0,
            upper_beta: 0.5,
            lower_radius: 30.0,
            upper_radius: 10.0,
            ..Default::default()
        };
        let mut cam = OrbitCamera::new(&cfg);
        cam.rotate(10.0, 10.0);
        cam.zoom(1.0);
        assert!(cam.position().is_finite());
    }

    #[test]
    fn beta_and_radius_are_clamped() {
        let mut cam = OrbitCamera::new(&CameraConfig::default());
        cam.rotate(0.0, 10_000.0);
        assert_eq!(cam.beta, cam.lower_beta);
        cam.rotate(0.0, -10_000.0);
        assert_eq!(cam.beta, cam.upper_beta);
        cam.zoom(100.0);
        assert_eq!(cam.radius, 35.0);
        cam.zoom(-100.0);
        assert_eq!(cam.radius, 8.0);
    }

    #[test]
    fn dragging_right_decreases_alpha() {
        let mut cam = OrbitCamera::new(&CameraConfig::default());
        let before = cam.alpha;
        cam.rotate(10.0, 0.0);
        assert!((cam.alpha - (before - 10.0 * cam.sensitivity)).abs() < 1e-6);
    }

    #[test]
    fn head_forward_and_pitch_clamp() {
        let mut cam = HeadCamera::new(&CameraConfig::default());
        assert!(close(cam.forward(), Vec3::Z));
        cam.yaw = PI / 2.0;
        assert!(close(cam.forward(), Vec3::X));

        cam.rotate(0.0, -100_000.0);
        assert_eq!(cam.pitch, PITCH_LIMIT);
        cam.rotate(0.0, 100_000.0);
        assert_eq!(cam.pitch, -PITCH_LIMIT);
        assert!((cam.forward().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn head_follows_player() {
        let mut cam = HeadCamera::new(&CameraConfig::default());
        cam.follow(Vec3::new(3.0, 0.0, -2.0));
        assert_eq!(cam.position, Vec3::new(3.0, 1.35, -2.0));
        let v = cam.view();
        assert!(close(v.target - v.eye, cam.forward()));
        assert_eq!(v.fov, 1.0);
    }
}
