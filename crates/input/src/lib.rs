//! Input tracking: raw pointer/touch events become a normalized drag vector
//! (the virtual joystick), a drain-once camera-look delta, and tap gestures.
//!
//! # Invariants
//! - Drag direction is unit length whenever it was last updated; tiny jitter
//!   never resets it.
//! - The look delta is delivered at most once: reading it clears it.
//! - Only the first touch point is tracked; later touches are ignored until
//!   it ends.

pub mod config;
pub mod event;
pub mod joystick;
pub mod tracker;

pub use config::{InputConfig, InputConfigError};
pub use event::{Gesture, InputEvent, PointerButton};
pub use joystick::JoystickView;
pub use tracker::{CameraDelta, DragState, InputTracker};
