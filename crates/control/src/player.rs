use crate::config::{ControlConfigError, PlayerConfig};
use crate::rig::{MoveFrame, ViewMode};
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use townwalk_common::{wrap_angle, NodeId, Transform};
use townwalk_input::DragState;
use townwalk_scene::{CollisionProxy, CollisionWorld, Scene, SceneError};

/// Errors from spawning the player.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("invalid player config: {0}")]
    Config(#[from] ControlConfigError),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// The walking character: a visual root in the scene plus an optional
/// invisible collision proxy that actually does the moving.
#[derive(Debug, Clone)]
pub struct Player {
    root: NodeId,
    position: Vec3,
    rotation: f32,
    target_rotation: f32,
    proxy: Option<CollisionProxy>,
    config: PlayerConfig,
}

impl Player {
    /// Validate `config`, build the character at its spawn point and register
    /// its meshes as shadow casters.
    pub fn spawn(scene: &mut Scene, config: PlayerConfig) -> Result<Self, PlayerError> {
        config.validate()?;
        let position = Vec3::new(config.spawn_x, 0.0, config.spawn_z);
        let prefab = townwalk_assets::character(config.color);
        let root = scene.instantiate(&prefab, None, Transform::from_xyz(position.x, 0.0, position.z))?;
        let casters = scene.add_shadow_casters_below(root);
        tracing::info!(root = %root.short(), casters, x = position.x, z = position.z, "player spawned");
        Ok(Self {
            root,
            position,
            rotation: 0.0,
            target_rotation: 0.0,
            proxy: config.collisions.then(|| CollisionProxy::new(position)),
            config,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Feet position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Facing around +Y in `(-PI, PI]`; 0 faces +Z.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn target_rotation(&self) -> f32 {
        self.target_rotation
    }

    pub fn proxy(&self) -> Option<&CollisionProxy> {
        self.proxy.as_ref()
    }

    /// Advance one frame: move according to the drag, then ease the facing
    /// toward the direction of travel. With a proxy and a collision world the
    /// move is swept and slides along walls.
    pub fn update(
        &mut self,
        dt: f32,
        drag: &DragState,
        frame: MoveFrame,
        scene: &mut Scene,
        collision: Option<&CollisionWorld>,
    ) -> Result<(), SceneError> {
        if drag.active && drag.magnitude > self.config.deadzone {
            let speed = drag.magnitude * self.config.max_speed * dt;
            let v = world_direction(drag.dir_x, -drag.dir_y, frame) * speed;

            match (&mut self.proxy, collision) {
                (Some(proxy), Some(world)) => {
                    world.move_with_collisions(proxy, v);
                    self.position.x = proxy.position.x;
                    self.position.z = proxy.position.z;
                }
                (proxy, _) => {
                    self.position += v;
                    if let Some(p) = proxy {
                        p.position = self.position;
                    }
                }
            }
            self.target_rotation = v.x.atan2(v.z);
        }

        let diff = wrap_angle(self.target_rotation - self.rotation);
        self.rotation = wrap_angle(self.rotation + diff * (dt * self.config.turn_rate).min(1.0));

        let node = scene.get_mut(self.root).ok_or(SceneError::NodeNotFound(self.root))?;
        node.local.position.x = self.position.x;
        node.local.position.z = self.position.z;
        node.local.rotation = Quat::from_rotation_y(self.rotation);
        Ok(())
    }
}

/// Screen-relative joystick input `(x, z)` re-expressed on the ground plane.
/// Returns a horizontal vector with the input's length.
fn world_direction(ix: f32, iz: f32, frame: MoveFrame) -> Vec3 {
    match frame.mode {
        ViewMode::FirstPerson => {
            let (s, c) = frame.fps_yaw.sin_cos();
            Vec3::new(ix * c + iz * s, 0.0, -ix * s + iz * c)
        }
        ViewMode::ThirdPerson => {
            let (s, c) = (frame.camera_alpha + FRAC_PI_2).sin_cos();
            Vec3::new(ix * c - iz * s, 0.0, ix * s + iz * c)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    use townwalk_scene::Aabb;

    fn drag(dir_x: f32, dir_y: f32, magnitude: f32) -> DragState {
        DragState {
            dir_x,
            dir_y,
            magnitude,
            active: true,
        }
    }

    fn third_person(alpha: f32) -> MoveFrame {
        MoveFrame {
            mode: ViewMode::ThirdPerson,
            fps_yaw: 0.0,
            camera_alpha: alpha,
        }
    }

    fn first_person(yaw: f32) -> MoveFrame {
        MoveFrame {
            mode: ViewMode::FirstPerson,
            fps_yaw: yaw,
            camera_alpha: 0.0,
        }
    }

    fn free_player(scene: &mut Scene) -> Player {
        let cfg = PlayerConfig {
            collisions: false,
            spawn_z: 0.0,
            ..Default::default()
        };
        Player::spawn(scene, cfg).unwrap()
    }

    #[test]
    fn spawns_at_configured_point_with_casters() {
        let mut scene = Scene::new();
        let p = Player::spawn(&mut scene, PlayerConfig::default()).unwrap();
        assert_eq!(p.position(), Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(scene.shadow_caster_count(), 8);
        assert!(p.proxy().is_some());
        assert_eq!(scene.world_position(p.root()).unwrap(), Vec3::new(0.0, 0.0, 8.0));
    }

    #[test]
    fn invalid_config_spawns_nothing() {
        let mut scene = Scene::new();
        let cfg = PlayerConfig {
            deadzone: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            Player::spawn(&mut scene, cfg),
            Err(PlayerError::Config(ControlConfigError::Deadzone(_)))
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn deadzone_keeps_player_still() {
        let mut scene = Scene::new();
        let mut p = free_player(&mut scene);
        p.update(0.1, &drag(1.0, 0.0, 0.05), third_person(-PI / 2.0), &mut scene, None)
            .unwrap();
        assert_eq!(p.position(), Vec3::ZERO);

        let mut inactive = drag(1.0, 0.0, 1.0);
        inactive.active = false;
        p.update(0.1, &inactive, third_person(-PI / 2.0), &mut scene, None).unwrap();
        assert_eq!(p.position(), Vec3::ZERO);
    }

    #[test]
    fn default_orbit_pushes_forward_along_plus_z() {
        // Camera at alpha = -PI/2 sits on -Z looking toward +Z; stick up walks away from it.
        let mut scene = Scene::new();
        let mut p = free_player(&mut scene);
        p.update(0.1, &drag(0.0, -1.0, 1.0), third_person(-PI / 2.0), &mut scene, None)
            .unwrap();
        assert!((p.position() - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!(p.target_rotation().abs() < 1e-5);
    }

    #[test]
    fn first_person_walks_where_the_head_looks() {
        let mut scene = Scene::new();
        let mut p = free_player(&mut scene);
        p.update(0.1, &drag(0.0, -1.0, 0.5), first_person(PI / 2.0), &mut scene, None)
            .unwrap();
        assert!((p.position() - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);
        assert!((p.target_rotation() - PI / 2.0).abs() < 1e-5);

        // Strafe right at yaw 0 moves along +X.
        let mut q = free_player(&mut scene);
        q.update(0.1, &drag(1.0, 0.0, 1.0), first_person(0.0), &mut scene, None)
            .unwrap();
        assert!((q.position() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_smoothing_never_overshoots() {
        let mut scene = Scene::new();
        let mut p = free_player(&mut scene);
        // Face backwards (-Z), then release and watch the facing settle.
        p.update(1.0 / 60.0, &drag(0.0, 1.0, 1.0), third_person(-PI / 2.0), &mut scene, None)
            .unwrap();
        let target = p.target_rotation();
        assert!((target.abs() - PI).abs() < 1e-5);
        let idle = DragState::default();
        let mut prev_gap = wrap_angle(target - p.rotation()).abs();
        for _ in 0..120 {
            p.update(1.0 / 60.0, &idle, third_person(-PI / 2.0), &mut scene, None).unwrap();
            let gap = wrap_angle(target - p.rotation()).abs();
            assert!(gap <= prev_gap + 1e-5);
            assert!(p.rotation() > -PI && p.rotation() <= PI);
            prev_gap = gap;
        }
        assert!(prev_gap < 1e-3);
    }

    #[test]
    fn large_dt_snaps_without_overshoot() {
        let mut scene = Scene::new();
        let mut p = free_player(&mut scene);
        p.update(0.5, &drag(1.0, 0.0, 1.0), third_person(-PI / 2.0), &mut scene, None)
            .unwrap();
        assert!((p.rotation() - p.target_rotation()).abs() < 1e-6);
    }

    #[test]
    fn collision_proxy_slides_along_walls() {
        let mut scene = Scene::new();
        let mut p = Player::spawn(
            &mut scene,
            PlayerConfig {
                spawn_z: 0.0,
                ..Default::default()
            },
        )
        .unwrap();
        let mut world = CollisionWorld::new(4.0);
        world.insert(Aabb::new(Vec3::new(1.0, 0.0, -50.0), Vec3::new(2.0, 3.0, 50.0)));

        // Push diagonally into the wall at x = 1 for a while.
        for _ in 0..30 {
            p.update(1.0 / 30.0, &drag(0.7071, -0.7071, 1.0), third_person(-PI / 2.0), &mut scene, Some(&world))
                .unwrap();
        }
        let pos = p.position();
        assert!(pos.x <= 0.6 + 1e-3, "went through the wall: {pos}");
        assert!(pos.z > 1.0, "did not slide: {pos}");
        assert_eq!(pos.y, 0.0);
        let node = scene.get(p.root()).unwrap();
        assert_eq!(node.local.position, pos);
    }

    #[test]
    fn removed_root_is_reported() {
        let mut scene = Scene::new();
        let mut p = free_player(&mut scene);
        scene.remove(p.root()).unwrap();
        let err = p
            .update(0.1, &DragState::default(), third_person(0.0), &mut scene, None)
            .unwrap_err();
        assert_eq!(err, SceneError::NodeNotFound(p.root()));
    }
}
