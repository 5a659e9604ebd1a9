//! GPU Uniform Data
//!
//! `Pod`/`Zeroable` structs mirroring the WGSL uniform blocks, plus the
//! [`SharedUniforms`] buffers used by more than one pass: the per-frame
//! camera block and the dynamic-offset per-object table.
//!
//! Struct layouts carry explicit padding so the Rust side matches WGSL
//! std140-style alignment exactly.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

use crate::renderer::frame_state::FrameState;
use crate::scene::lighting::{LightingState, MAX_POINT_LIGHTS, PointLight};

/// Per-frame camera uniforms (group 0 of the geometry and skybox passes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub proj: Mat4,
    pub view_proj: Mat4,
    pub camera_pos: Vec4,
}

impl FrameUniforms {
    #[must_use]
    pub fn from_frame(frame: &FrameState) -> Self {
        Self {
            view: frame.view,
            proj: frame.projection,
            view_proj: frame.view_proj,
            camera_pos: frame.camera_position.extend(1.0),
        }
    }
}

/// Per-object uniforms, stored stride-aligned in the shared model table and
/// selected with a dynamic offset.
///
/// `flags.x == 1` selects the material texture over the flat `color`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ModelUniforms {
    pub model: Mat4,
    pub color: Vec4,
    pub flags: [u32; 4],
}

impl ModelUniforms {
    #[must_use]
    pub fn textured(model: Mat4) -> Self {
        Self {
            model,
            color: Vec4::ONE,
            flags: [1, 0, 0, 0],
        }
    }

    #[must_use]
    pub fn flat(model: Mat4, color: Vec3) -> Self {
        Self {
            model,
            color: color.extend(1.0),
            flags: [0; 4],
        }
    }
}

/// One point light as the lighting shader sees it.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GpuPointLight {
    pub position: Vec4,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    /// (constant, linear, quadratic, unused)
    pub attenuation: Vec4,
}

impl From<&PointLight> for GpuPointLight {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.extend(1.0),
            ambient: light.ambient.extend(0.0),
            diffuse: light.diffuse.extend(0.0),
            specular: light.specular.extend(0.0),
            attenuation: light.attenuation.extend(0.0),
        }
    }
}

/// Uniform block of the lighting resolve pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct LightUniforms {
    pub light_space: Mat4,
    pub dir_direction: Vec4,
    pub dir_ambient: Vec4,
    pub dir_diffuse: Vec4,
    pub dir_specular: Vec4,
    pub camera_pos: Vec4,
    pub points: [GpuPointLight; MAX_POINT_LIGHTS],
    pub point_count: u32,
    pub shadows_enabled: u32,
    pub _pad: [u32; 2],
}

impl LightUniforms {
    #[must_use]
    pub fn build(frame: &FrameState, lighting: &LightingState, shadows_enabled: bool) -> Self {
        let mut points = [GpuPointLight::zeroed(); MAX_POINT_LIGHTS];
        for (slot, light) in points.iter_mut().zip(lighting.points()) {
            *slot = GpuPointLight::from(light);
        }
        Self {
            light_space: frame.light_space,
            dir_direction: lighting.directional.direction.extend(0.0),
            dir_ambient: lighting.directional.ambient.extend(0.0),
            dir_diffuse: lighting.directional.diffuse.extend(0.0),
            dir_specular: lighting.directional.specular.extend(0.0),
            camera_pos: frame.camera_position.extend(1.0),
            points,
            point_count: lighting.points().len() as u32,
            shadows_enabled: u32::from(shadows_enabled),
            _pad: [0; 2],
        }
    }
}

/// Direction flag of one blur iteration.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct BlurUniforms {
    pub horizontal: u32,
    pub _pad: [u32; 3],
}

/// Exposure block of the present pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PresentUniforms {
    pub exposure: f32,
    pub _pad: [u32; 3],
}

/// Channel selector of the debug overlay.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct DebugUniforms {
    pub channel: u32,
    pub _pad: [u32; 3],
}

// ---------------------------------------------------------------------------
// Shared buffers
// ---------------------------------------------------------------------------

/// Number of per-object slots in the model table. The demo draw list uses 15
/// (9 grid objects + floor + 4 markers + arrow).
pub const MODEL_SLOT_CAPACITY: u32 = 16;

/// Uniform buffers and bind-group layouts shared across passes.
///
/// - group layout `frame_layout`: one [`FrameUniforms`] block
/// - group layout `model_layout`: the dynamic-offset [`ModelUniforms`] table
/// - group layout `material_layout`: albedo texture + sampler
pub struct SharedUniforms {
    pub frame_buffer: wgpu::Buffer,
    pub frame_layout: wgpu::BindGroupLayout,
    pub frame_bind_group: wgpu::BindGroup,

    pub model_buffer: wgpu::Buffer,
    pub model_stride: u32,
    pub model_layout: wgpu::BindGroupLayout,
    pub model_bind_group: wgpu::BindGroup,

    pub material_layout: wgpu::BindGroupLayout,
}

impl SharedUniforms {
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let min_alignment = device.limits().min_uniform_buffer_offset_alignment.max(1);
        let model_stride = align_to(std::mem::size_of::<ModelUniforms>() as u32, min_alignment);

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame BindGroup Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<FrameUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame BindGroup"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Uniform Buffer"),
            size: u64::from(model_stride) * u64::from(MODEL_SLOT_CAPACITY),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model BindGroup Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ModelUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model BindGroup"),
            layout: &model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &model_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniforms>() as u64),
                }),
            }],
        });

        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material BindGroup Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            frame_buffer,
            frame_layout,
            frame_bind_group,
            model_buffer,
            model_stride,
            model_layout,
            model_bind_group,
            material_layout,
        }
    }

    /// Uploads the per-frame camera block.
    pub fn write_frame(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Uploads the per-object table, one stride-aligned slot per entry.
    pub fn write_models(&self, queue: &wgpu::Queue, models: &[ModelUniforms]) {
        debug_assert!(models.len() <= MODEL_SLOT_CAPACITY as usize);
        let mut staged = vec![0u8; self.model_stride as usize * models.len()];
        for (index, model) in models.iter().enumerate() {
            let offset = index * self.model_stride as usize;
            let bytes = bytemuck::bytes_of(model);
            staged[offset..offset + bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.model_buffer, 0, &staged);
    }

    /// Dynamic offset of one model slot.
    #[inline]
    #[must_use]
    pub fn model_offset(&self, slot: u32) -> u32 {
        slot * self.model_stride
    }
}

/// Rounds `value` up to the next multiple of `alignment`.
#[must_use]
pub fn align_to(value: u32, alignment: u32) -> u32 {
    value.div_ceil(alignment) * alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_to_rounds_up() {
        assert_eq!(align_to(96, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
        assert_eq!(align_to(0, 64), 0);
    }

    #[test]
    fn uniform_blocks_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<ModelUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<GpuPointLight>() % 16, 0);
    }
}
