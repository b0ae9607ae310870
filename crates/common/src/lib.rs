//! Shared types for every townwalk crate: node ids, transforms, colours,
//! the camera pose handed to renderers, and the small amount of angle/easing
//! math the controllers share.

pub mod math;
pub mod types;

pub use math::{lerp, smoothstep, wrap_angle};
pub use types::{Color3, NodeId, RenderView, Transform};
