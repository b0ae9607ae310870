//! Procedural asset builders.
//!
//! Every builder is a pure function from dimensions and colours to a
//! [`Prefab`]: a named root whose child primitives are placed relative to it.
//! Output is deterministic apart from generated material names.
//!
//! # Layout
//! - [`character`]: the box-style player figure.
//! - [`buildings`]: houses (with a hinged door), apartment blocks, shops.
//! - [`street`]: trees, lamps, benches, fences, roads, ground.

pub mod buildings;
pub mod character;
pub mod street;

pub use buildings::{building, house, shop, DOOR_PIVOT};
pub use character::character;
pub use street::{bench, crossing_stripe, fence, ground, road, street_lamp, tree};

pub use townwalk_scene::Prefab;
