//! Geometry Pass (G-Buffer Fill)
//!
//! Renders every scene drawable into three color attachments plus depth:
//! world position, world normal (+ emissive strength in alpha) and
//! albedo + specular intensity. The framebuffer binding is validated against
//! the pass's declared arity (exactly 3 color + depth) at construction.

use crate::errors::Result;
use crate::renderer::drawable::{Drawable, Vertex};
use crate::renderer::graph::context::ExecuteContext;
use crate::renderer::graph::node::RenderNode;
use crate::renderer::targets::{
    ALBEDO_FORMAT, AttachmentRequirements, DEPTH_FORMAT, FramebufferBinding, HDR_FORMAT, TargetId,
};
use crate::renderer::uniforms::SharedUniforms;

/// Depth state of the G-buffer fill: write-enabled, standard less compare.
#[must_use]
pub fn geometry_depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

pub struct GeometryPass {
    pipeline: wgpu::RenderPipeline,
    binding: FramebufferBinding,
}

impl GeometryPass {
    pub fn new(device: &wgpu::Device, shared: &SharedUniforms) -> Result<Self> {
        let binding = FramebufferBinding {
            color: vec![
                TargetId::GBufferPosition,
                TargetId::GBufferNormal,
                TargetId::GBufferAlbedo,
            ],
            depth: Some(TargetId::GBufferDepth),
        };
        binding.validate(AttachmentRequirements {
            color_count: 3,
            needs_depth: true,
        })?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Geometry Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(include_str!(
                "../../../../shaders/geometry.wgsl"
            ))),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Geometry Pipeline Layout"),
            bind_group_layouts: &[
                &shared.frame_layout,
                &shared.model_layout,
                &shared.material_layout,
            ],
            immediate_size: 0,
        });

        let color_target = |format| {
            Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Geometry Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[
                    color_target(HDR_FORMAT),
                    color_target(HDR_FORMAT),
                    color_target(ALBEDO_FORMAT),
                ],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(geometry_depth_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self { pipeline, binding })
    }
}

impl RenderNode for GeometryPass {
    fn name(&self) -> &'static str {
        "Geometry Pass"
    }

    fn writes(&self) -> &'static [TargetId] {
        &[
            TargetId::GBufferPosition,
            TargetId::GBufferNormal,
            TargetId::GBufferAlbedo,
            TargetId::GBufferDepth,
        ]
    }

    fn run(&self, ctx: &ExecuteContext<'_>, encoder: &mut wgpu::CommandEncoder) {
        let color_attachments: Vec<Option<wgpu::RenderPassColorAttachment<'_>>> = self
            .binding
            .color
            .iter()
            .map(|id| {
                Some(wgpu::RenderPassColorAttachment {
                    view: ctx.targets.view(*id),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })
            })
            .collect();

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Geometry Pass"),
            color_attachments: &color_attachments,
            depth_stencil_attachment: self.binding.depth.map(|id| {
                wgpu::RenderPassDepthStencilAttachment {
                    view: ctx.targets.view(id),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &ctx.shared.frame_bind_group, &[]);

        for item in ctx.draw_items {
            pass.set_bind_group(1, &ctx.shared.model_bind_group, &[ctx
                .shared
                .model_offset(item.slot)]);
            pass.set_bind_group(2, ctx.content.material(item.material), &[]);
            ctx.content.mesh(item.mesh).draw(&mut pass);
        }
    }
}
