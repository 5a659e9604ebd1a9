//! Shadow Depth Pass
//!
//! Depth-only render of all shadow casters from the directional light's
//! point of view. Clears the shadow map to 1.0 every frame; when shadows are
//! disabled only the clear runs, so the lighting resolve samples an empty
//! (fully lit) map.

use glam::Mat4;

use crate::renderer::graph::context::{ExecuteContext, PrepareContext};
use crate::renderer::graph::node::RenderNode;
use crate::renderer::drawable::{Drawable, Vertex};
use crate::renderer::targets::{DEPTH_FORMAT, TargetId};
use crate::renderer::uniforms::SharedUniforms;

pub struct ShadowDepthPass {
    pipeline: wgpu::RenderPipeline,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    enabled: bool,
}

impl ShadowDepthPass {
    #[must_use]
    pub fn new(device: &wgpu::Device, shared: &SharedUniforms) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Depth Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(include_str!(
                "../../../../shaders/shadow_depth.wgsl"
            ))),
        });

        let light_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shadow Light BindGroup Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Mat4>() as u64),
                },
                count: None,
            }],
        });

        let light_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shadow Light Uniform Buffer"),
            size: std::mem::size_of::<Mat4>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Light BindGroup"),
            layout: &light_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shadow Depth Pipeline Layout"),
            bind_group_layouts: &[&light_layout, &shared.model_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shadow Depth Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            // Depth-only: no fragment stage, no color targets.
            fragment: None,
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            light_buffer,
            light_bind_group,
            enabled: true,
        }
    }
}

impl RenderNode for ShadowDepthPass {
    fn name(&self) -> &'static str {
        "Shadow Depth Pass"
    }

    fn writes(&self) -> &'static [TargetId] {
        &[TargetId::ShadowMap]
    }

    fn prepare(&mut self, ctx: &mut PrepareContext<'_>) {
        self.enabled = ctx.settings.shadows_enabled;
        if self.enabled {
            ctx.queue.write_buffer(
                &self.light_buffer,
                0,
                bytemuck::bytes_of(&ctx.frame.light_space),
            );
        }
    }

    fn run(&self, ctx: &ExecuteContext<'_>, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Depth Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: ctx.targets.view(TargetId::ShadowMap),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if !self.enabled {
            return;
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.light_bind_group, &[]);

        for item in ctx.draw_items.iter().filter(|item| item.casts_shadow) {
            pass.set_bind_group(1, &ctx.shared.model_bind_group, &[ctx
                .shared
                .model_offset(item.slot)]);
            ctx.content.mesh(item.mesh).draw(&mut pass);
        }
    }
}
