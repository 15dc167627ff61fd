//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - provisioning write-once vertex/index buffers

mod buffer;
mod context;

pub use buffer::{BufferKind, GpuBuffer, create_index_buffer, create_vertex_buffer};
pub use context::{GpuContext, GpuFrame, SurfaceErrorAction};
