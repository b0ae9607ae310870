//! The town: a fixed layout of roads, houses, apartment blocks, shops, a park
//! and street furniture, built into a [`townwalk_scene::Scene`] from literal
//! placement tables.

pub mod doors;
pub mod layout;
pub mod town;

pub use doors::{DoorInfo, DOOR_OPEN_ANGLE, DOOR_SWING_SPEED};
pub use town::{LayoutSummary, OpenWorld};
