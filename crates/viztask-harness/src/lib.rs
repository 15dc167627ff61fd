//! Viztask harness crate.
//!
//! A minimal harness for interactive, GPU-accelerated visual tasks: it owns
//! window + surface setup, shader program construction with readable
//! diagnostics, the per-frame render loop, and the pointer-drag camera
//! gesture, and delegates the actual drawing to a pluggable [`task::Task`].

pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod session;
pub mod shader;
pub mod task;
pub mod time;
pub mod viewport;

pub mod logging;
