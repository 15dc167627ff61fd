//! Pointer interaction subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The session runtime translates platform pointer events into calls on
//! [`DragTracker`].

mod drag;

pub use drag::DragTracker;
