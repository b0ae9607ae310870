//! wgpu render backend for the town.
//!
//! Every visible mesh node becomes one instance of a shared primitive
//! (cube, cylinder, sphere, ground plane) scaled to its dimensions. Opaque
//! instances draw first; translucent ones follow with blending and no depth
//! writes.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - Hidden nodes, and nodes under hidden ancestors, are never drawn.

mod batch;
mod camera;
mod gpu;
mod shaders;
mod shapes;

pub use batch::{collect_instances, InstanceBatches, InstanceData, ShapeKey};
pub use camera::{view_projection, FAR_PLANE, NEAR_PLANE};
pub use gpu::{WgpuRenderer, FOG_END, FOG_START, SKY_COLOR};
