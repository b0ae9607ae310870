use crate::config::{GameConfig, GameConfigError};
use townwalk_common::RenderView;
use townwalk_control::{CameraRig, ControlConfigError, Player, PlayerError, ViewMode};
use townwalk_input::{Gesture, InputConfigError, InputEvent, InputTracker, JoystickView};
use townwalk_render::{FrameDriver, Renderer};
use townwalk_scene::{CollisionWorld, Scene, SceneError};
use townwalk_world::OpenWorld;

/// Grid cell size of the collision broad phase, in world units.
pub const COLLISION_CELL_SIZE: f32 = 8.0;
/// How close the player must stand to a door for a tap to swing it.
pub const DOOR_REACH: f32 = 2.5;

/// Errors from starting or driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("config error: {0}")]
    Config(#[from] GameConfigError),
    #[error("input error: {0}")]
    Input(#[from] InputConfigError),
    #[error("control config error: {0}")]
    Control(#[from] ControlConfigError),
    #[error("player error: {0}")]
    Player(#[from] PlayerError),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Everything the per-frame callbacks read and write.
pub struct GameState {
    scene: Scene,
    world: OpenWorld,
    player: Player,
    rig: CameraRig,
    tracker: InputTracker,
    collision: Option<CollisionWorld>,
}

impl GameState {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn world(&self) -> &OpenWorld {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    pub fn collision(&self) -> Option<&CollisionWorld> {
        self.collision.as_ref()
    }
}

/// A running demo: the state plus the frame driver that advances it.
pub struct Session {
    state: GameState,
    driver: FrameDriver<GameState>,
}

impl Session {
    /// Build the town, spawn the player, and register the per-frame
    /// callbacks in order: player, camera, doors.
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let _span = tracing::info_span!("session_init").entered();

        let mut scene = Scene::new();
        let world = OpenWorld::build(&mut scene)?;
        let player = Player::spawn(&mut scene, config.player)?;
        let collision = config
            .player
            .collisions
            .then(|| CollisionWorld::from_scene(&scene, COLLISION_CELL_SIZE));
        let rig = CameraRig::new(config.camera, &player)?;
        let tracker = InputTracker::new(config.input)?;

        let mut driver = FrameDriver::new();
        driver.on_update(|s: &mut GameState, dt| {
            let drag = *s.tracker.drag();
            let frame = s.rig.move_frame();
            if let Err(e) = s.player.update(dt, &drag, frame, &mut s.scene, s.collision.as_ref()) {
                tracing::warn!(error = %e, "player update failed");
            }
        });
        driver.on_update(|s: &mut GameState, dt| {
            let delta = s.tracker.consume_camera_delta();
            if let Err(e) = s.rig.update(dt, delta, &s.player, &mut s.scene) {
                tracing::warn!(error = %e, "camera update failed");
            }
        });
        driver.on_update(|s: &mut GameState, dt| {
            if let Err(e) = s.world.animate_doors(&mut s.scene, dt) {
                tracing::warn!(error = %e, "door animation failed");
            }
        });

        tracing::info!(
            nodes = scene.node_count(),
            obstacles = collision.as_ref().map_or(0, CollisionWorld::len),
            "session started"
        );
        Ok(Self {
            state: GameState {
                scene,
                world,
                player,
                rig,
                tracker,
                collision,
            },
            driver,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn frames(&self) -> u64 {
        self.driver.frames()
    }

    /// Route a host event to the tracker. A tap swings the door nearest the
    /// player, if one is within reach; its index is returned.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<usize> {
        if let InputEvent::Resize { width, height } = event {
            tracing::trace!(width, height, "viewport resized");
        }
        match self.state.tracker.handle(event)? {
            Gesture::Tap => {
                let s = &mut self.state;
                let door = s.world.toggle_nearest_door(&s.scene, s.player.position(), DOOR_REACH);
                tracing::debug!(?door, "tap");
                door
            }
        }
    }

    /// Advance one frame. Returns the dispatched delta, or `None` after
    /// [`dispose`](Self::dispose).
    pub fn frame(&mut self, raw_dt: f32) -> Option<f32> {
        self.driver.tick(&mut self.state, raw_dt)
    }

    /// Advance one frame and render it.
    pub fn frame_and_render<R: Renderer>(&mut self, raw_dt: f32, renderer: &R) -> Option<R::Output> {
        self.driver
            .frame(&mut self.state, raw_dt, renderer, |s| (&s.scene, s.rig.view()))
    }

    /// Start switching between third- and first-person. Returns false when a
    /// switch is already running or the session is disposed.
    pub fn toggle_view(&mut self) -> Result<bool, SessionError> {
        if !self.driver.is_running() {
            return Ok(false);
        }
        let s = &mut self.state;
        Ok(s.rig.toggle(&s.player, &mut s.scene)?)
    }

    pub fn zoom(&mut self, delta: f32) {
        self.state.rig.zoom(delta);
    }

    pub fn view(&self) -> RenderView {
        self.state.rig.view()
    }

    pub fn mode(&self) -> ViewMode {
        self.state.rig.mode()
    }

    pub fn joystick_view(&self) -> Option<JoystickView> {
        self.state.tracker.joystick_view()
    }

    /// Stop the frame driver and remove every scene node. Returns the number
    /// of nodes removed; a second call removes nothing.
    pub fn dispose(&mut self) -> usize {
        self.driver.stop();
        self.state.tracker.clear_on_tap();
        self.state.collision = None;
        let removed = self.state.scene.node_count();
        self.state.scene.clear();
        tracing::info!(removed, "session disposed");
        removed
    }
}
