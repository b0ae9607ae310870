use crate::camera::{HeadCamera, OrbitCamera};
use crate::config::{CameraConfig, ControlConfigError};
use crate::player::Player;
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use townwalk_common::{lerp, smoothstep, RenderView};
use townwalk_input::CameraDelta;
use townwalk_scene::{Scene, SceneError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    ThirdPerson,
    FirstPerson,
}

impl ViewMode {
    pub fn other(self) -> Self {
        match self {
            Self::ThirdPerson => Self::FirstPerson,
            Self::FirstPerson => Self::ThirdPerson,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ThirdPerson => "third-person",
            Self::FirstPerson => "first-person",
        }
    }
}

/// Which frame the player controller should interpret joystick input in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveFrame {
    pub mode: ViewMode,
    pub fps_yaw: f32,
    pub camera_alpha: f32,
}

/// An in-flight view switch. `start` is frozen at toggle time; the end pose
/// is recomputed from the player every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Elapsed fraction of the duration, in `[0, 1]`.
    pub t: f32,
    pub start: RenderView,
    pub target_mode: ViewMode,
}

impl Transition {
    pub fn ease(&self) -> f32 {
        smoothstep(self.t)
    }

    /// Blend of the start pose and `end` at the current eased progress.
    pub fn pose(&self, end: RenderView) -> RenderView {
        let e = self.ease();
        RenderView {
            eye: self.start.eye.lerp(end.eye, e),
            target: self.start.target.lerp(end.target, e),
            fov: lerp(self.start.fov, end.fov, e),
        }
    }
}

/// The camera currently driving the view. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveCamera {
    ThirdPerson,
    FirstPerson,
    Transition(Transition),
}

/// Orbit camera, head camera and the state machine switching between them.
#[derive(Debug, Clone)]
pub struct CameraRig {
    orbit: OrbitCamera,
    head: HeadCamera,
    mode: ViewMode,
    active: ActiveCamera,
    view: RenderView,
    config: CameraConfig,
}

impl CameraRig {
    /// Validate `config` and aim the orbit camera at `player`, so the rig
    /// has a real pose before its first update.
    pub fn new(config: CameraConfig, player: &Player) -> Result<Self, ControlConfigError> {
        config.validate()?;
        let feet = player.position();
        let mut orbit = OrbitCamera::new(&config);
        orbit.target = feet + Vec3::new(0.0, config.target_height, 0.0);
        let mut head = HeadCamera::new(&config);
        head.follow(feet);
        Ok(Self {
            view: orbit.view(),
            orbit,
            head,
            mode: ViewMode::ThirdPerson,
            active: ActiveCamera::ThirdPerson,
            config,
        })
    }

    /// Committed mode. While transitioning this is still the mode being left.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn active(&self) -> &ActiveCamera {
        &self.active
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.active, ActiveCamera::Transition(_))
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn head(&self) -> &HeadCamera {
        &self.head
    }

    /// Pose produced by the last update.
    pub fn view(&self) -> RenderView {
        self.view
    }

    /// Movement frame for the player controller. While transitioning the
    /// destination mode already applies.
    pub fn move_frame(&self) -> MoveFrame {
        let mode = match self.active {
            ActiveCamera::Transition(tr) => tr.target_mode,
            _ => self.mode,
        };
        MoveFrame {
            mode,
            fps_yaw: self.head.yaw,
            camera_alpha: self.orbit.alpha,
        }
    }

    /// Orbit zoom; ignored outside settled third person.
    pub fn zoom(&mut self, delta: f32) {
        if matches!(self.active, ActiveCamera::ThirdPerson) {
            self.orbit.zoom(delta);
        }
    }

    /// Start switching to the other view. Returns false, changing nothing,
    /// when a switch is already in flight.
    pub fn toggle(&mut self, player: &Player, scene: &mut Scene) -> Result<bool, SceneError> {
        if self.is_transitioning() {
            return Ok(false);
        }
        let target_mode = self.mode.other();
        match target_mode {
            ViewMode::FirstPerson => {
                self.head.yaw = player.rotation();
                self.head.pitch = 0.0;
            }
            ViewMode::ThirdPerson => {
                self.orbit.alpha = -self.head.yaw - FRAC_PI_2;
                scene.set_visible(player.root(), true)?;
            }
        }
        self.active = ActiveCamera::Transition(Transition {
            t: 0.0,
            start: self.view,
            target_mode,
        });
        tracing::debug!(from = self.mode.label(), to = target_mode.label(), "view transition started");
        Ok(true)
    }

    /// Advance one frame: follow the player, apply the look delta to the
    /// active camera, or step the transition. Look input arriving during a
    /// transition is dropped.
    pub fn update(
        &mut self,
        dt: f32,
        delta: CameraDelta,
        player: &Player,
        scene: &mut Scene,
    ) -> Result<(), SceneError> {
        let feet = player.position();
        self.orbit.target = feet + Vec3::new(0.0, self.config.target_height, 0.0);
        self.head.follow(feet);

        match self.active {
            ActiveCamera::ThirdPerson => {
                self.orbit.rotate(delta.dx, delta.dy);
                self.view = self.orbit.view();
            }
            ActiveCamera::FirstPerson => {
                self.head.rotate(delta.dx, delta.dy);
                self.view = self.head.view();
            }
            ActiveCamera::Transition(mut tr) => {
                tr.t = (tr.t + dt / self.config.transition_duration).min(1.0);
                let end = self.resting_view(tr.target_mode);
                if tr.t >= 1.0 {
                    self.view = end;
                    self.finish(tr.target_mode, player, scene)?;
                } else {
                    self.view = tr.pose(end);
                    if tr.target_mode == ViewMode::FirstPerson && tr.ease() > self.config.hide_mesh_at {
                        scene.set_visible(player.root(), false)?;
                    }
                    self.active = ActiveCamera::Transition(tr);
                }
            }
        }
        Ok(())
    }

    fn resting_view(&self, mode: ViewMode) -> RenderView {
        match mode {
            ViewMode::ThirdPerson => self.orbit.view(),
            ViewMode::FirstPerson => self.head.view(),
        }
    }

    fn finish(&mut self, mode: ViewMode, player: &Player, scene: &mut Scene) -> Result<(), SceneError> {
        self.mode = mode;
        self.active = match mode {
            ViewMode::ThirdPerson => ActiveCamera::ThirdPerson,
            ViewMode::FirstPerson => ActiveCamera::FirstPerson,
        };
        scene.set_visible(player.root(), mode == ViewMode::ThirdPerson)?;
        tracing::debug!(mode = mode.label(), "view transition finished");
        Ok(())
    }
}
