use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use townwalk_common::Color3;

/// Errors from control configuration validation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ControlConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("beta limits must satisfy 0 < lower <= upper < pi, got [{lower}, {upper}]")]
    BetaLimits { lower: f32, upper: f32 },
    #[error("radius limits must satisfy 0 < lower <= upper, got [{lower}, {upper}]")]
    RadiusLimits { lower: f32, upper: f32 },
    #[error("deadzone must be in [0, 1), got {0}")]
    Deadzone(f32),
}

fn positive(field: &'static str, value: f32) -> Result<(), ControlConfigError> {
    if value.is_nan() || value <= 0.0 {
        return Err(ControlConfigError::NotPositive { field, value });
    }
    Ok(())
}

/// Orbit, head camera and transition tunables. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_alpha: f32,
    pub initial_beta: f32,
    pub initial_radius: f32,
    pub lower_beta: f32,
    pub upper_beta: f32,
    pub lower_radius: f32,
    pub upper_radius: f32,
    /// Orbit radians per pixel of look drag.
    pub orbit_sensitivity: f32,
    /// Orbit target height above the player's feet.
    pub target_height: f32,
    pub third_person_fov: f32,
    pub yaw_sensitivity: f32,
    pub pitch_sensitivity: f32,
    /// Eye height above the player's feet in first person.
    pub head_height: f32,
    pub first_person_fov: f32,
    /// Seconds a view switch takes.
    pub transition_duration: f32,
    /// Eased progress past which the player mesh is hidden when entering
    /// first person.
    pub hide_mesh_at: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_alpha: -PI / 2.0,
            initial_beta: PI / 3.5,
            initial_radius: 18.0,
            lower_beta: 0.3,
            upper_beta: PI / 2.5,
            lower_radius: 8.0,
            upper_radius: 35.0,
            orbit_sensitivity: 0.005,
            target_height: 1.0,
            third_person_fov: 0.8,
            yaw_sensitivity: 0.004,
            pitch_sensitivity: 0.004,
            head_height: 1.35,
            first_person_fov: 1.0,
            transition_duration: 0.5,
            hide_mesh_at: 0.75,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ControlConfigError> {
        let (lb, ub) = (self.lower_beta, self.upper_beta);
        if lb.is_nan() || ub.is_nan() || lb <= 0.0 || lb > ub || ub >= PI {
            return Err(ControlConfigError::BetaLimits { lower: lb, upper: ub });
        }
        let (lr, ur) = (self.lower_radius, self.upper_radius);
        if lr.is_nan() || ur.is_nan() || lr <= 0.0 || lr > ur {
            return Err(ControlConfigError::RadiusLimits { lower: lr, upper: ur });
        }
        positive("initial_radius", self.initial_radius)?;
        positive("orbit_sensitivity", self.orbit_sensitivity)?;
        positive("yaw_sensitivity", self.yaw_sensitivity)?;
        positive("pitch_sensitivity", self.pitch_sensitivity)?;
        positive("third_person_fov", self.third_person_fov)?;
        positive("first_person_fov", self.first_person_fov)?;
        positive("transition_duration", self.transition_duration)?;
        Ok(())
    }
}

/// Player movement tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Units per second at full joystick deflection.
    pub max_speed: f32,
    /// Joystick magnitude below which the player stands still.
    pub deadzone: f32,
    /// Turn smoothing rate; the facing closes `dt * turn_rate` of the gap per frame.
    pub turn_rate: f32,
    pub spawn_x: f32,
    pub spawn_z: f32,
    pub color: Color3,
    /// Sweep movement through the collision world instead of moving freely.
    pub collisions: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            deadzone: 0.05,
            turn_rate: 10.0,
            spawn_x: 0.0,
            spawn_z: 8.0,
            color: Color3::new(0.2, 0.6, 0.85),
            collisions: true,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ControlConfigError> {
        positive("max_speed", self.max_speed)?;
        positive("turn_rate", self.turn_rate)?;
        if self.deadzone.is_nan() || !(0.0..1.0).contains(&self.deadzone) {
            return Err(ControlConfigError::Deadzone(self.deadzone));
        }
        Ok(())
    }
}
