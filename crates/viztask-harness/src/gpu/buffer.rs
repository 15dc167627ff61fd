use anyhow::Result;
use wgpu::util::DeviceExt;

/// Target kind of a static GPU buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    /// Vertex-attribute data, stored as 32-bit floats.
    Vertex,
    /// Index data, stored as unsigned 16-bit integers.
    Index,
}

/// A GPU-resident buffer holding one static dataset.
///
/// Write-once/read-many: the data is uploaded at creation and never touched
/// again. No partial-update or streaming path exists.
pub struct GpuBuffer {
    raw: wgpu::Buffer,
    kind: BufferKind,
    len: u32,
}

impl GpuBuffer {
    pub fn raw(&self) -> &wgpu::Buffer {
        &self.raw
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Number of elements (floats or indices) uploaded at creation.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Uploads vertex-attribute data to a new GPU buffer.
pub fn create_vertex_buffer(device: &wgpu::Device, data: &[f32]) -> Result<GpuBuffer> {
    create(
        device,
        BufferKind::Vertex,
        bytemuck::cast_slice(data),
        data.len(),
        wgpu::BufferUsages::VERTEX,
        "viztask vertex buffer",
    )
}

/// Uploads index data to a new GPU buffer.
pub fn create_index_buffer(device: &wgpu::Device, data: &[u16]) -> Result<GpuBuffer> {
    create(
        device,
        BufferKind::Index,
        bytemuck::cast_slice(data),
        data.len(),
        wgpu::BufferUsages::INDEX,
        "viztask index buffer",
    )
}

fn create(
    device: &wgpu::Device,
    kind: BufferKind,
    contents: &[u8],
    len: usize,
    usage: wgpu::BufferUsages,
    label: &str,
) -> Result<GpuBuffer> {
    // Allocation failure is fatal to task construction; GPU memory
    // exhaustion is not locally recoverable, so there is no retry.
    let scope = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

    let raw = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage,
    });

    if let Some(err) = pollster::block_on(scope.pop()) {
        anyhow::bail!("GPU buffer allocation failed ({kind:?}, {len} elements): {err}");
    }

    Ok(GpuBuffer {
        raw,
        kind,
        len: len as u32,
    })
}
