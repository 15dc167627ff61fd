//! Task contract.
//!
//! A task is the caller-supplied object that actually draws. The session
//! constructs exactly one task per run, forwards drag deltas to it, and calls
//! [`Task::render`] once per frame with the current surface dimensions.

use anyhow::Result;

use crate::gpu::GpuContext;
use crate::time::FrameTime;
use crate::viewport::RenderSurface;

/// Per-frame GPU handles passed to [`Task::render`].
///
/// Absent when the session was configured without a GPU context
/// (surface-only tasks).
pub struct TaskFrame<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,

    /// Physical size of the render target backing `view`.
    ///
    /// The drawable rect in `surface` never exceeds the window width, but a
    /// short window can be smaller than the aspect-correct height; tasks
    /// should clamp their viewport rect against this.
    pub target_width: u32,
    pub target_height: u32,

    pub time: FrameTime,
}

/// The capability set every task implements.
///
/// A task owns its GPU resources (shader program, buffers); they are created
/// in the task factory and dropped with the task.
pub trait Task {
    /// Draws one frame.
    ///
    /// `surface` carries the most recently committed drawable dimensions;
    /// `frame` is `Some` exactly when the session holds a GPU context.
    fn render(&mut self, surface: &RenderSurface, frame: Option<&mut TaskFrame<'_>>);

    /// Applies a vertical camera-drag delta in pixels.
    ///
    /// The task owns the interpretation and any clamp policy;
    /// [`CameraAngle`](crate::camera::CameraAngle) is the stock one.
    fn drag_camera(&mut self, delta_y: f32);
}

/// Constructor for the session's single task instance.
///
/// Runs once, after the surface (and GPU context, if requested) are ready.
/// Returning an error aborts the session before any frame is rendered.
pub type TaskFactory =
    Box<dyn FnOnce(&RenderSurface, Option<&GpuContext>) -> Result<Box<dyn Task>>>;
