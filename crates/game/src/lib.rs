//! Session wiring for the walking demo.
//!
//! A [`Session`] owns the scene, the town, the player, the camera rig and
//! the input tracker, and drives them through a frame driver in a fixed
//! order: player movement, camera, doors.

pub mod config;
pub mod session;

pub use config::{GameConfig, GameConfigError};
pub use session::{GameState, Session, SessionError, COLLISION_CELL_SIZE, DOOR_REACH};
