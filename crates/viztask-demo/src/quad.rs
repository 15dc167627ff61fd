//! The fixed-quad demo task.
//!
//! Draws a full-screen clip-space quad and lets the fragment stage do the
//! work, driven by `{size, time, camera_angle}` uniforms. Owns its shader
//! program and buffers; everything is created once at construction and
//! dropped with the task.

use std::f32::consts::PI;
use std::path::Path;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};

use viztask_harness::camera::CameraAngle;
use viztask_harness::gpu::{GpuBuffer, GpuContext, create_index_buffer, create_vertex_buffer};
use viztask_harness::shader::{
    PipelineDesc, ShaderPipelineBuilder, ShaderProgram, load_shader_source,
};
use viztask_harness::task::{Task, TaskFrame};
use viztask_harness::viewport::RenderSurface;

/// Full-screen quad in clip space, xyz per vertex.
const QUAD_POSITIONS: [f32; 12] = [
    -1.0, -1.0, 0.0, //
    -1.0, 1.0, 0.0, //
    1.0, 1.0, 0.0, //
    1.0, -1.0, 0.0,
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (3 * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadUniforms {
    size: [f32; 2],
    time: f32,
    camera_angle: f32,
}

/// Maps monotonic elapsed seconds to the scene's animation phase.
///
/// Ten phase units per second, wrapping every sixty units, scaled onto a
/// half-turn per thirty units.
fn scene_time(elapsed: f32) -> f32 {
    (PI / 30.0) * ((10.0 * elapsed) % 60.0)
}

pub struct QuadTask {
    angle: CameraAngle,
    program: ShaderProgram,
    position_vbo: GpuBuffer,
    index_ibo: GpuBuffer,
    uniform_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl QuadTask {
    pub fn new(surface: &RenderSurface, gpu: &GpuContext) -> Result<Self> {
        let shader_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
        let vertex_src = load_shader_source(shader_dir.join("quad.vert.wgsl"))?;
        let fragment_src = load_shader_source(shader_dir.join("quad.frag.wgsl"))?;

        let device = gpu.device();

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("quad bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<QuadUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let program = ShaderPipelineBuilder::new(device).build(
            &vertex_src,
            &fragment_src,
            &PipelineDesc {
                vertex_layouts: &[position_layout()],
                bind_group_layouts: &[&bind_group_layout],
                ..PipelineDesc::new("quad pipeline", gpu.surface_format())
            },
        )?;

        let position_vbo =
            create_vertex_buffer(device, &QUAD_POSITIONS).context("quad position buffer")?;
        let index_ibo = create_index_buffer(device, &QUAD_INDICES).context("quad index buffer")?;

        let uniform_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quad uniforms"),
            size: std::mem::size_of::<QuadUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quad bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        log::info!(
            "quad task ready ({}x{} drawable, {} indices)",
            surface.width,
            surface.height,
            index_ibo.len()
        );

        Ok(Self {
            angle: CameraAngle::default(),
            program,
            position_vbo,
            index_ibo,
            uniform_ubo,
            bind_group,
        })
    }
}

impl Task for QuadTask {
    fn render(&mut self, surface: &RenderSurface, frame: Option<&mut TaskFrame<'_>>) {
        let Some(frame) = frame else {
            return;
        };

        let uniforms = QuadUniforms {
            size: [surface.width as f32, surface.height as f32],
            time: scene_time(frame.time.elapsed),
            camera_angle: self.angle.radians(),
        };
        frame
            .queue
            .write_buffer(&self.uniform_ubo, 0, bytemuck::bytes_of(&uniforms));

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        // The drawable rect can be taller than a squashed window; keep the
        // viewport inside the render target.
        let vw = surface.width.min(frame.target_width);
        let vh = surface.height.min(frame.target_height);
        if vw == 0 || vh == 0 {
            return;
        }
        rpass.set_viewport(0.0, 0.0, vw as f32, vh as f32, 0.0, 1.0);

        rpass.set_pipeline(&self.program.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.position_vbo.raw().slice(..));
        rpass.set_index_buffer(self.index_ibo.raw().slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_ibo.len(), 0, 0..1);
    }

    fn drag_camera(&mut self, delta_y: f32) {
        self.angle.drag(delta_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn scene_time_starts_at_zero() {
        assert!(close(scene_time(0.0), 0.0));
    }

    #[test]
    fn scene_time_half_turn_at_three_seconds() {
        assert!(close(scene_time(3.0), PI));
    }

    #[test]
    fn scene_time_wraps_every_six_seconds() {
        assert!(close(scene_time(6.0), 0.0));
        assert!(close(scene_time(7.5), scene_time(1.5)));
    }

    #[test]
    fn uniform_block_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<QuadUniforms>(), 16);
    }
}
