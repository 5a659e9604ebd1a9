//! Drawable Meshes
//!
//! The [`Drawable`] trait is the one seam between scene content and the
//! passes: a drawable only records vertex/index state and a draw call into an
//! already-configured render pass. Full-screen passes skip it entirely and
//! use a bufferless triangle (`draw(0..3, 0..1)`).

use bytemuck::{Pod, Zeroable};

/// Anything that can record its own draw call into a prepared render pass.
pub trait Drawable {
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>);
}

/// Interleaved vertex: position, normal, uv.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A mesh uploaded to the GPU, optionally indexed.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    /// Index count when indexed, vertex count otherwise.
    draw_count: u32,
}

impl GpuMesh {
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        vertices: &[Vertex],
        indices: Option<&[u16]>,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let (index_buffer, draw_count) = match indices {
            Some(indices) => {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                (Some(buffer), indices.len() as u32)
            }
            None => (None, vertices.len() as u32),
        };

        Self {
            vertex_buffer,
            index_buffer,
            draw_count,
        }
    }
}

impl Drawable for GpuMesh {
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        if let Some(index_buffer) = &self.index_buffer {
            pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.draw_count, 0, 0..1);
        } else {
            pass.draw(0..self.draw_count, 0..1);
        }
    }
}
