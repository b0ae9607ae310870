//! Rendering boundary and frame loop.
//!
//! # Invariants
//! - Renderers read the scene and a camera pose; they never mutate the scene.
//! - The frame driver never dispatches a delta larger than [`MAX_FRAME_DT`].
//!
//! The GPU backend lives in `townwalk-render-wgpu`; [`DebugTextRenderer`]
//! covers headless use and tests behind the same trait.

mod frame;
mod renderer;

pub use frame::{FrameDriver, MAX_FRAME_DT};
pub use renderer::{DebugTextRenderer, Renderer};
pub use townwalk_common::RenderView;

pub fn crate_info() -> &'static str {
    concat!("townwalk-render v", env!("CARGO_PKG_VERSION"))
}
