//! Player movement and the camera state machine.
//!
//! Per frame the host runs [`Player::update`] with the tracker's drag state
//! and the rig's [`CameraRig::move_frame`], then [`CameraRig::update`] with
//! the drained look delta. The rig owns exactly one active camera: orbit,
//! head, or an in-flight transition between them.

pub mod camera;
pub mod config;
pub mod player;
pub mod rig;

pub use camera::{HeadCamera, OrbitCamera};
pub use config::{CameraConfig, ControlConfigError, PlayerConfig};
pub use player::{Player, PlayerError};
pub use rig::{ActiveCamera, CameraRig, MoveFrame, Transition, ViewMode};
