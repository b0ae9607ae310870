use glam::{Quat, Vec3};
use townwalk_common::NodeId;
use townwalk_scene::{Scene, SceneError};

/// Hinge angle of a fully open door, in radians. Doors swing outward.
pub const DOOR_OPEN_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;
/// Angular speed of a swinging door, in radians per second.
pub const DOOR_SWING_SPEED: f32 = 3.0;

/// A house door: the hinge node plus its open state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorInfo {
    pub pivot: NodeId,
    pub is_open: bool,
    /// Current hinge angle, between 0 (closed) and [`DOOR_OPEN_ANGLE`].
    pub current_angle: f32,
}

impl DoorInfo {
    pub fn closed(pivot: NodeId) -> Self {
        Self {
            pivot,
            is_open: false,
            current_angle: 0.0,
        }
    }

    pub fn target_angle(&self) -> f32 {
        if self.is_open { DOOR_OPEN_ANGLE } else { 0.0 }
    }

    /// True while the hinge has not reached its target.
    pub fn is_swinging(&self) -> bool {
        self.current_angle != self.target_angle()
    }

    /// Advance the swing by `dt` and write the hinge rotation into the scene.
    pub(crate) fn animate(&mut self, scene: &mut Scene, dt: f32) -> Result<(), SceneError> {
        if !self.is_swinging() {
            return Ok(());
        }
        let target = self.target_angle();
        let step = DOOR_SWING_SPEED * dt;
        let diff = target - self.current_angle;
        self.current_angle = if diff.abs() <= step {
            target
        } else {
            self.current_angle + step * diff.signum()
        };
        let node = scene
            .get_mut(self.pivot)
            .ok_or(SceneError::NodeNotFound(self.pivot))?;
        node.local.rotation = Quat::from_rotation_y(self.current_angle);
        Ok(())
    }
}

/// Index of the door whose hinge is closest to `position` on the ground
/// plane, if any lies within `reach`.
pub(crate) fn nearest(doors: &[DoorInfo], scene: &Scene, position: Vec3, reach: f32) -> Option<usize> {
    let here = position.with_y(0.0);
    doors
        .iter()
        .enumerate()
        .filter_map(|(i, d)| {
            let p = scene.world_position(d.pivot).ok()?;
            let dist = p.with_y(0.0).distance(here);
            (dist <= reach).then_some((i, dist))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}
